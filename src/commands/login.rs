// src/commands/login.rs
//! `login` — interactive OAuth2 sign-in, then persist the token.

use crate::auth::{AuthorizationCodeFlow, TokenStore};
use crate::config::AuthSettings;
use crate::error::AppError;

pub async fn run(store: &TokenStore, settings: &AuthSettings) -> Result<(), AppError> {
    log::info!(
        "Signing in to tenant '{}' with scopes {:?}",
        settings.tenant,
        settings.scopes
    );

    let flow = AuthorizationCodeFlow::new(settings)?;
    let token = flow.login().await?;
    store.save(&token)?;

    println!(
        "✓ Authorization successful, token saved to {}",
        store.path().display()
    );
    Ok(())
}
