// src/lib.rs
//! onenote2todo library — signs in to Microsoft Graph, lists OneNote
//! notebooks, sections and pages, and pulls tagged to-do fragments out
//! of page HTML.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling** — `AppError`, `GraphErrorCode`
//! - **Configuration** — `Cli`, `Command`, `AuthSettings`
//! - **Domain model** — `Notebook`, `Section`, `Page`, `ListResponse`
//! - **API client** — `GraphClient`, `OneNoteRepository`,
//!   `fetch_all_items`, `QueryOptions`
//! - **Sign-in** — `AuthorizationCodeFlow`, `TokenStore`, `AccessToken`
//! - **Scanning** — `find_tagged_fragments`, `TodoFinder`

pub mod api;
pub mod auth;
pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod model;
pub mod tags;
pub mod todo;
pub mod types;

// --- Error Handling ---
pub use crate::error::{AppError, GraphErrorCode};

// --- Configuration ---
pub use crate::config::{AuthSettings, Cli, Command};

// --- Domain Model ---
pub use crate::model::{
    ExternalLink, Identity, IdentitySet, Notebook, Page, ResourceLinks, Section,
};

// --- API Client ---
pub use crate::api::{
    fetch_all_items, Collected, GraphClient, ListResponse, OneNoteRepository, QueryOptions,
};

// --- Sign-in ---
pub use crate::auth::{AuthorizationCodeFlow, RedirectMode, TokenStore};
pub use crate::types::AccessToken;

// --- Scanning ---
pub use crate::tags::find_tagged_fragments;
pub use crate::todo::{PageTodos, TodoFinder, TodoReport};
