// src/api/mod.rs
//! Microsoft Graph interaction — the ability to read OneNote content.
//!
//! This module provides a data-oriented interface to the OneNote
//! endpoints, with clear separation between I/O operations, decoding,
//! and business logic.

pub mod client;
mod pagination;
pub mod query;
mod responses;

use crate::error::AppError;
use crate::model::{Notebook, Page, Section};

/// The ability to read OneNote content for the signed-in user.
///
/// This is the fundamental algebra for API interaction.
/// Business logic depends on this trait, never on HTTP details.
///
/// List operations take raw query pairs instead of a builder because a
/// continuation link hands back parameters (`$skiptoken` and friends)
/// that no builder produces; [`QueryOptions::to_pairs`] bridges the two.
#[async_trait::async_trait]
pub trait OneNoteRepository: Send + Sync {
    async fn list_notebooks(
        &self,
        query: &[(String, String)],
    ) -> Result<ListResponse<Notebook>, AppError>;

    async fn list_sections(
        &self,
        query: &[(String, String)],
    ) -> Result<ListResponse<Section>, AppError>;

    async fn list_pages(
        &self,
        query: &[(String, String)],
    ) -> Result<ListResponse<Page>, AppError>;

    async fn get_page(&self, id: &str, query: &[(String, String)]) -> Result<Page, AppError>;

    /// Returns the page's HTML, not JSON.
    async fn get_page_content(&self, id: &str) -> Result<String, AppError>;
}

// Re-export the public interface
pub use client::GraphClient;
pub use pagination::{continuation_query, fetch_all_items, Collected};
pub use query::{filter_notebook_name, odata_quote, QueryOptions};
pub use responses::{GraphErrorBody, GraphErrorPayload, ListResponse};
