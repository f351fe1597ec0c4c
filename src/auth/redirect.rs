// src/auth/redirect.rs
//! Delivery of the authorization redirect.
//!
//! Two delivery paths end in the same place: a [`RedirectQuery`] parsed
//! out of the URL the identity platform sent the browser to. The
//! loopback listener speaks just enough HTTP to read one GET request
//! line and answer it; the manual path reads the URL off stdin.

use crate::constants::REDIRECT_CALLBACK_PATH;
use crate::error::AppError;
use std::io::{self, Write};
use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use url::Url;

const SUCCESS_PAGE: &str =
    "Authorization received. You can close this tab and return to the terminal.";
const DENIED_PAGE: &str =
    "Authorization failed. You can close this tab; details are in the terminal.";

/// Parameters delivered by the authorization redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectQuery {
    /// The URL the parameters were parsed from, kept for error reporting.
    pub url: String,
    pub code: Option<String>,
    pub state: Option<String>,
    /// Provider-reported failure as (error, error_description).
    pub error: Option<(String, String)>,
}

impl RedirectQuery {
    /// Parses `code`, `state` and `error` out of a redirect URL.
    /// Unknown parameters are ignored.
    pub fn from_url(raw: &str) -> Result<Self, AppError> {
        let trimmed = raw.trim();
        let url = Url::parse(trimmed).map_err(|source| AppError::ParseRedirectUrl {
            url: trimmed.to_string(),
            source,
        })?;

        let mut code = None;
        let mut state = None;
        let mut error_kind: Option<String> = None;
        let mut error_description: Option<String> = None;

        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "code" => code = Some(value.into_owned()),
                "state" => state = Some(value.into_owned()),
                "error" => error_kind = Some(value.into_owned()),
                "error_description" => error_description = Some(value.into_owned()),
                _ => {}
            }
        }

        Ok(Self {
            url: trimmed.to_string(),
            code,
            state,
            error: error_kind.map(|kind| (kind, error_description.unwrap_or_default())),
        })
    }
}

/// Loopback listener the redirect URI points at.
pub struct RedirectListener {
    listener: TcpListener,
}

impl RedirectListener {
    /// Binds 127.0.0.1 on the given port. Port 0 picks a free one.
    pub async fn bind(port: u16) -> Result<Self, AppError> {
        let addr = format!("127.0.0.1:{}", port);
        let listener =
            TcpListener::bind(&addr)
                .await
                .map_err(|source| AppError::BindRedirectListener {
                    addr: addr.clone(),
                    source,
                })?;
        log::info!("Listening for the authorization redirect on {}", addr);
        Ok(Self { listener })
    }

    /// The address actually bound, needed when the port was 0.
    pub fn local_addr(&self) -> Result<SocketAddr, AppError> {
        Ok(self.listener.local_addr()?)
    }

    /// Accepts connections until one hits the callback path, answers it,
    /// and returns the parsed query. A listener delivers one redirect.
    pub async fn recv(self) -> Result<RedirectQuery, AppError> {
        loop {
            let (stream, peer) = self
                .listener
                .accept()
                .await
                .map_err(AppError::AcceptRedirectConnection)?;
            log::debug!("Redirect connection from {}", peer);

            if let Some(query) = handle_connection(stream).await? {
                return Ok(query);
            }
        }
    }
}

/// Reads the stdin-pasted redirect URL (manual mode).
pub fn read_pasted_redirect() -> Result<RedirectQuery, AppError> {
    print!("Paste the full redirect URL here: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    RedirectQuery::from_url(&line)
}

/// Serves one connection. `Ok(None)` means it wasn't the callback and
/// the listener should keep waiting.
async fn handle_connection(mut stream: TcpStream) -> Result<Option<RedirectQuery>, AppError> {
    let request_line = match read_request_line(&mut stream).await {
        Ok(line) => line,
        Err(e) => {
            log::debug!("Dropped a redirect connection mid-read: {}", e);
            return Ok(None);
        }
    };

    let Some(target) = request_target(&request_line) else {
        respond(&mut stream, "400 Bad Request", "Malformed request.").await;
        return Ok(None);
    };

    if !is_callback_path(&target) {
        respond(&mut stream, "404 Not Found", "Nothing here.").await;
        return Ok(None);
    }

    // The target is origin-form ("/oauth/callback?..."); give it a base
    // so it parses as a full URL.
    let query = match RedirectQuery::from_url(&format!("http://localhost{}", target)) {
        Ok(query) => query,
        Err(e) => {
            respond(
                &mut stream,
                "400 Bad Request",
                "Could not parse the callback query.",
            )
            .await;
            return Err(e);
        }
    };

    if query.error.is_some() {
        respond(&mut stream, "200 OK", DENIED_PAGE).await;
    } else {
        respond(&mut stream, "200 OK", SUCCESS_PAGE).await;
    }
    Ok(Some(query))
}

/// Reads until the first line of the request is complete.
async fn read_request_line(stream: &mut TcpStream) -> io::Result<String> {
    let mut buf = Vec::with_capacity(1024);
    let mut chunk = [0u8; 512];

    loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if buf.contains(&b'\n') || buf.len() > 8192 {
            break;
        }
    }

    let text = String::from_utf8_lossy(&buf);
    Ok(text.lines().next().unwrap_or_default().to_string())
}

/// Extracts the target from a request line like `GET /path?q HTTP/1.1`.
fn request_target(request_line: &str) -> Option<String> {
    let mut parts = request_line.split_whitespace();
    let method = parts.next()?;
    let target = parts.next()?;
    if method != "GET" {
        return None;
    }
    Some(target.to_string())
}

/// Exact-path match: `/oauth/callback` with or without a query, but not
/// `/oauth/callback2`.
fn is_callback_path(target: &str) -> bool {
    match target.strip_prefix(REDIRECT_CALLBACK_PATH) {
        Some(rest) => rest.is_empty() || rest.starts_with('?'),
        None => false,
    }
}

async fn respond(stream: &mut TcpStream, status: &str, message: &str) {
    let page = format!(
        "<!DOCTYPE html><html><head><title>onenote2todo</title></head><body><p>{}</p></body></html>",
        message
    );
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        page.len(),
        page
    );

    if let Err(e) = stream.write_all(response.as_bytes()).await {
        log::debug!("Could not answer a redirect connection: {}", e);
    }
    let _ = stream.shutdown().await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_url_extracts_code_and_state() {
        let query = RedirectQuery::from_url(
            "http://localhost:9999/oauth/callback?code=M.C123_BAY.2.abc&state=xyzzy&session_state=ignored",
        )
        .unwrap();
        assert_eq!(query.code.as_deref(), Some("M.C123_BAY.2.abc"));
        assert_eq!(query.state.as_deref(), Some("xyzzy"));
        assert_eq!(query.error, None);
    }

    #[test]
    fn test_from_url_percent_decodes_values() {
        let query = RedirectQuery::from_url(
            "https://login.microsoftonline.com/common/oauth2/nativeclient?error=access_denied&error_description=The%20user%20denied%20access",
        )
        .unwrap();
        assert_eq!(
            query.error,
            Some((
                "access_denied".to_string(),
                "The user denied access".to_string()
            ))
        );
    }

    #[test]
    fn test_from_url_tolerates_missing_parameters() {
        let query = RedirectQuery::from_url("http://localhost:9999/oauth/callback").unwrap();
        assert_eq!(query.code, None);
        assert_eq!(query.state, None);
        assert_eq!(query.error, None);
    }

    #[test]
    fn test_from_url_trims_pasted_whitespace() {
        let query =
            RedirectQuery::from_url("  http://localhost:9999/oauth/callback?code=abc \n").unwrap();
        assert_eq!(query.code.as_deref(), Some("abc"));
    }

    #[test]
    fn test_from_url_rejects_non_urls() {
        assert!(matches!(
            RedirectQuery::from_url("not a url"),
            Err(AppError::ParseRedirectUrl { .. })
        ));
    }

    #[test]
    fn test_request_target_only_accepts_get() {
        assert_eq!(
            request_target("GET /oauth/callback?code=1 HTTP/1.1"),
            Some("/oauth/callback?code=1".to_string())
        );
        assert_eq!(request_target("POST /oauth/callback HTTP/1.1"), None);
        assert_eq!(request_target(""), None);
    }

    #[test]
    fn test_is_callback_path_is_exact() {
        assert!(is_callback_path("/oauth/callback"));
        assert!(is_callback_path("/oauth/callback?code=1"));
        assert!(!is_callback_path("/oauth/callback2"));
        assert!(!is_callback_path("/favicon.ico"));
        assert!(!is_callback_path("/"));
    }
}
