// src/config.rs
//! Command-line surface and resolved settings.
//!
//! The clap structs are the raw user input; [`AuthSettings`] is the
//! validated form the login flow consumes, with the app registration
//! pulled from the environment rather than the command line.

use crate::auth::RedirectMode;
use crate::constants::{
    DEFAULT_REDIRECT_PORT, DEFAULT_SCOPES, DEFAULT_TENANT, DEFAULT_TODO_TAG, DEFAULT_TOKEN_FILE,
    LOGIN_BASE, MS_CLIENT_ID_VAR, MS_CLIENT_SECRET_VAR, MS_TENANT_VAR,
};
use crate::error::AppError;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// File the access token is persisted in
    #[arg(long, global = true, default_value = DEFAULT_TOKEN_FILE)]
    pub token_file: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

/// One subcommand per thing the tool does.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in to Microsoft and persist the access token
    Login {
        /// Paste the redirect URL by hand instead of running a local listener
        #[arg(long, default_value_t = false)]
        manual: bool,

        /// Port for the loopback redirect listener
        #[arg(long, default_value_t = DEFAULT_REDIRECT_PORT)]
        port: u16,

        /// Extra OAuth scope to request (repeatable)
        #[arg(long = "scope")]
        scopes: Vec<String>,

        /// Don't try to open the authorization URL in a browser
        #[arg(long, default_value_t = false)]
        no_browser: bool,
    },

    /// List the signed-in user's notebooks
    Notebooks {
        /// Cap the number of items per response ($top)
        #[arg(long)]
        top: Option<u32>,

        /// Raw OData $filter expression, e.g. "startswith(displayName, 'U')"
        #[arg(long)]
        filter: Option<String>,
    },

    /// List the signed-in user's sections
    Sections {
        /// Cap the number of items per response ($top)
        #[arg(long)]
        top: Option<u32>,

        /// Raw OData $filter expression
        #[arg(long)]
        filter: Option<String>,
    },

    /// List the signed-in user's pages
    Pages {
        /// Cap the number of items per response ($top)
        #[arg(long)]
        top: Option<u32>,

        /// Sort expression ($orderby), e.g. "title" or "lastModifiedDateTime desc"
        #[arg(long)]
        orderby: Option<String>,

        /// Raw OData $filter expression
        #[arg(long, conflicts_with = "notebook")]
        filter: Option<String>,

        /// Only pages in the notebook with this display name
        #[arg(long)]
        notebook: Option<String>,
    },

    /// Show one page's metadata
    Page {
        /// Page id
        id: String,
    },

    /// Fetch a page's HTML content
    Content {
        /// Page id
        id: String,

        /// Write the HTML here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Find tagged to-do fragments across pages
    Todos {
        /// Only pages in the notebook with this display name
        #[arg(long)]
        notebook: Option<String>,

        /// Tag to look for in page HTML
        #[arg(long, default_value = DEFAULT_TODO_TAG)]
        tag: String,
    },

    /// Extract tagged fragments from a local HTML file
    Scan {
        /// HTML file to scan
        file: PathBuf,

        /// Tag to look for
        #[arg(long, default_value = DEFAULT_TODO_TAG)]
        tag: String,
    },
}

/// Resolved sign-in settings: `login` arguments merged with environment.
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub client_id: String,
    pub client_secret: Option<String>,
    pub tenant: String,
    pub scopes: Vec<String>,
    pub redirect: RedirectMode,
    pub open_browser: bool,
}

impl AuthSettings {
    /// Resolves sign-in settings from the `login` arguments and the
    /// environment. The client id is the one thing that cannot be
    /// defaulted; everything else has a sensible fallback.
    pub fn resolve(
        manual: bool,
        port: u16,
        extra_scopes: Vec<String>,
        no_browser: bool,
    ) -> Result<Self, AppError> {
        let client_id = std::env::var(MS_CLIENT_ID_VAR).map_err(|_| {
            AppError::MissingConfiguration(format!(
                "{} environment variable not set",
                MS_CLIENT_ID_VAR
            ))
        })?;
        let client_secret = std::env::var(MS_CLIENT_SECRET_VAR).ok();
        let tenant =
            std::env::var(MS_TENANT_VAR).unwrap_or_else(|_| DEFAULT_TENANT.to_string());

        Ok(Self {
            client_id,
            client_secret,
            tenant,
            scopes: merge_scopes(extra_scopes),
            redirect: if manual {
                RedirectMode::Manual
            } else {
                RedirectMode::Listener { port }
            },
            // Manual mode leaves the browser to the user; that's the point of it.
            open_browser: !no_browser && !manual,
        })
    }

    /// URL of the tenant's authorization endpoint.
    pub fn authorize_endpoint(&self) -> String {
        format!("{}/{}/oauth2/v2.0/authorize", LOGIN_BASE, self.tenant)
    }

    /// URL of the tenant's token endpoint.
    pub fn token_endpoint(&self) -> String {
        format!("{}/{}/oauth2/v2.0/token", LOGIN_BASE, self.tenant)
    }
}

/// Default scopes plus any extras, duplicates dropped.
fn merge_scopes(extra: Vec<String>) -> Vec<String> {
    let mut scopes: Vec<String> = DEFAULT_SCOPES.iter().map(|s| s.to_string()).collect();
    for scope in extra {
        if !scopes.contains(&scope) {
            scopes.push(scope);
        }
    }
    scopes
}
