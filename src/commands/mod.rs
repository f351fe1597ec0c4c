// src/commands/mod.rs
//! One handler per subcommand.
//!
//! Handlers own the terminal output; everything they print comes from
//! library calls that are tested on their own. The dispatch below is
//! the only place that knows which subcommand needs a signed-in client
//! and which (login, scan) works without one.

mod content;
mod login;
mod notebooks;
mod page;
mod pages;
mod scan;
mod sections;
mod todos;

use crate::api::GraphClient;
use crate::auth::TokenStore;
use crate::config::{AuthSettings, Cli, Command};
use crate::error::AppError;

/// Dispatches the parsed command line to its handler.
pub async fn run(cli: Cli) -> Result<(), AppError> {
    let store = TokenStore::new(&cli.token_file);

    match cli.command {
        Command::Login {
            manual,
            port,
            scopes,
            no_browser,
        } => {
            let settings = AuthSettings::resolve(manual, port, scopes, no_browser)?;
            login::run(&store, &settings).await
        }
        Command::Notebooks { top, filter } => {
            notebooks::run(&signed_in(&store)?, top, filter).await
        }
        Command::Sections { top, filter } => sections::run(&signed_in(&store)?, top, filter).await,
        Command::Pages {
            top,
            orderby,
            filter,
            notebook,
        } => pages::run(&signed_in(&store)?, top, orderby, filter, notebook).await,
        Command::Page { id } => page::run(&signed_in(&store)?, &id).await,
        Command::Content { id, output } => content::run(&signed_in(&store)?, &id, output).await,
        Command::Todos { notebook, tag } => {
            todos::run(&signed_in(&store)?, notebook.as_deref(), &tag).await
        }
        Command::Scan { file, tag } => scan::run(&file, &tag),
    }
}

/// Builds a Graph client from the persisted token.
fn signed_in(store: &TokenStore) -> Result<GraphClient, AppError> {
    let token = store.load()?;
    log::debug!("Using access token {}", token);
    GraphClient::new(&token)
}
