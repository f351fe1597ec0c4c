// src/auth/mod.rs
//! OAuth2 sign-in against the Microsoft identity platform.
//!
//! The flow is the standard authorization-code grant with PKCE: build a
//! consent URL carrying a random anti-forgery state, get the user's
//! browser onto it, receive the redirect (loopback listener or a pasted
//! URL), check the state, then trade the one-time code for a bearer
//! token over the back channel.

mod redirect;
mod store;

pub use redirect::{RedirectListener, RedirectQuery};
pub use store::TokenStore;

use crate::config::AuthSettings;
use crate::constants::{NATIVE_CLIENT_REDIRECT, REDIRECT_CALLBACK_PATH};
use crate::error::AppError;
use crate::types::AccessToken;
use oauth2::basic::BasicClient;
use oauth2::{
    AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, EndpointNotSet, EndpointSet,
    PkceCodeChallenge, PkceCodeVerifier, RedirectUrl, RequestTokenError, Scope, TokenResponse,
    TokenUrl,
};
use url::Url;

/// BasicClient with the authorization and token endpoints configured.
type ConfiguredClient =
    BasicClient<EndpointSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

/// How the authorization redirect gets back to us.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectMode {
    /// Loopback listener: the browser lands on 127.0.0.1 and the code
    /// arrives without the user touching anything.
    Listener { port: u16 },
    /// No listener: Microsoft parks the browser on its native-client
    /// page and the user pastes the final URL back into the terminal.
    Manual,
}

/// Drives one interactive sign-in and produces a bearer token.
pub struct AuthorizationCodeFlow {
    client: ConfiguredClient,
    scopes: Vec<Scope>,
    mode: RedirectMode,
    open_browser: bool,
}

impl AuthorizationCodeFlow {
    pub fn new(settings: &AuthSettings) -> Result<Self, AppError> {
        let redirect_uri = match settings.redirect {
            RedirectMode::Listener { port } => {
                format!("http://localhost:{}{}", port, REDIRECT_CALLBACK_PATH)
            }
            RedirectMode::Manual => NATIVE_CLIENT_REDIRECT.to_string(),
        };

        let mut client = BasicClient::new(ClientId::new(settings.client_id.clone()))
            .set_auth_uri(AuthUrl::new(settings.authorize_endpoint()).map_err(|source| {
                AppError::BuildUrl {
                    kind: "authorization",
                    source,
                }
            })?)
            .set_token_uri(TokenUrl::new(settings.token_endpoint()).map_err(|source| {
                AppError::BuildUrl {
                    kind: "token",
                    source,
                }
            })?)
            .set_redirect_uri(RedirectUrl::new(redirect_uri).map_err(|source| {
                AppError::BuildUrl {
                    kind: "redirect",
                    source,
                }
            })?);

        if let Some(secret) = &settings.client_secret {
            client = client.set_client_secret(ClientSecret::new(secret.clone()));
        }

        Ok(Self {
            client,
            scopes: settings
                .scopes
                .iter()
                .map(|scope| Scope::new(scope.clone()))
                .collect(),
            mode: settings.redirect,
            open_browser: settings.open_browser,
        })
    }

    /// Builds the consent URL. Returns the URL plus the anti-forgery
    /// state and PKCE verifier the rest of the flow needs.
    pub fn authorize_url(&self) -> (Url, CsrfToken, PkceCodeVerifier) {
        let (challenge, verifier) = PkceCodeChallenge::new_random_sha256();

        let mut request = self.client.authorize_url(CsrfToken::new_random);
        for scope in &self.scopes {
            request = request.add_scope(scope.clone());
        }

        let (url, state) = request.set_pkce_challenge(challenge).url();
        (url, state, verifier)
    }

    /// Runs the whole interactive login: show the URL, collect the
    /// redirect, verify the state, exchange the code.
    pub async fn login(&self) -> Result<AccessToken, AppError> {
        // Bind before showing the URL so the redirect target exists by
        // the time the user clicks through consent.
        let listener = match self.mode {
            RedirectMode::Listener { port } => Some(RedirectListener::bind(port).await?),
            RedirectMode::Manual => None,
        };

        let (url, state, verifier) = self.authorize_url();

        println!("Visit the following URL to authorize this application:\n");
        println!("{}\n", url);

        if self.open_browser {
            match open::that(url.as_str()) {
                Ok(()) => log::debug!("Opened the authorization URL in a browser"),
                Err(e) => log::warn!("Could not open a browser ({}); open the URL manually", e),
            }
        }

        let query = match listener {
            Some(listener) => listener.recv().await?,
            None => redirect::read_pasted_redirect()?,
        };

        let code = validated_code(query, &state)?;
        self.exchange(code, verifier).await
    }

    /// Trades the one-time authorization code for a bearer token.
    async fn exchange(
        &self,
        code: AuthorizationCode,
        verifier: PkceCodeVerifier,
    ) -> Result<AccessToken, AppError> {
        // Token requests must not follow redirects.
        let http_client = oauth2::reqwest::ClientBuilder::new()
            .redirect(oauth2::reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| AppError::ExchangeFailed(format!("cannot build token client: {}", e)))?;

        let response = self
            .client
            .exchange_code(code)
            .set_pkce_verifier(verifier)
            .request_async(&http_client)
            .await
            .map_err(|err| match err {
                RequestTokenError::ServerResponse(server) => {
                    AppError::ExchangeFailed(server.to_string())
                }
                other => AppError::ExchangeFailed(other.to_string()),
            })?;

        log::info!(
            "Token endpoint answered (expires_in: {:?})",
            response.expires_in()
        );
        AccessToken::new(response.access_token().secret().as_str())
    }
}

/// Checks a delivered redirect against the expected state and digs out
/// the authorization code.
fn validated_code(
    query: RedirectQuery,
    expected_state: &CsrfToken,
) -> Result<AuthorizationCode, AppError> {
    // A provider-reported failure beats everything else in the query.
    if let Some((error, description)) = query.error {
        return Err(AppError::AuthorizationDenied { error, description });
    }

    match query.state.as_deref() {
        None => return Err(AppError::MissingState(query.url.clone())),
        Some(state) if state != expected_state.secret().as_str() => {
            return Err(AppError::StateMismatch {
                expected: expected_state.secret().clone(),
                received: state.to_string(),
            });
        }
        Some(_) => {}
    }

    match query.code {
        Some(code) => Ok(AuthorizationCode::new(code)),
        None => Err(AppError::MissingAuthCode(query.url)),
    }
}
