// src/todo.rs
//! The to-do pipeline: walk the page collection, pull each page's HTML,
//! keep the tagged fragments.
//!
//! The pipeline runs over the [`OneNoteRepository`] trait rather than
//! the HTTP client, so tests can script the backend. Content requests
//! are fired per batch, all in flight at once, and awaited before the
//! walk follows the continuation link — memory stays bounded by Graph's
//! batch size instead of the collection size, and results come out in
//! API page order.

use crate::api::{continuation_query, filter_notebook_name, OneNoteRepository, QueryOptions};
use crate::constants::DEFAULT_TODO_TAG;
use crate::error::AppError;
use crate::model::Page;
use crate::tags::find_tagged_fragments;
use futures::future;

/// Stands in for a parent name when the page carries none.
const UNKNOWN_PARENT: &str = "(unknown)";

/// Tagged fragments found on one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTodos {
    pub notebook: String,
    pub section: String,
    pub title: String,
    /// Fragments in document order, at least one.
    pub fragments: Vec<String>,
}

impl PageTodos {
    /// `Notebook/Section/Title` path for report headers.
    pub fn location(&self) -> String {
        format!("{}/{}/{}", self.notebook, self.section, self.title)
    }
}

/// Outcome of one full walk over the page collection.
#[derive(Debug, Clone, Default)]
pub struct TodoReport {
    /// Pages that carried at least one fragment, in API page order.
    pub pages: Vec<PageTodos>,
    /// Every page whose content was fetched and scanned.
    pub pages_scanned: usize,
    /// Collection total Graph reported via `@odata.count`.
    pub total_pages: Option<i64>,
}

impl TodoReport {
    /// Fragments across all pages.
    pub fn fragment_count(&self) -> usize {
        self.pages.iter().map(|page| page.fragments.len()).sum()
    }
}

/// Finds tagged fragments across the signed-in user's pages.
pub struct TodoFinder<'a, R: OneNoteRepository + ?Sized> {
    repository: &'a R,
    tag: String,
}

impl<'a, R: OneNoteRepository + ?Sized> TodoFinder<'a, R> {
    pub fn new(repository: &'a R) -> Self {
        Self {
            repository,
            tag: DEFAULT_TODO_TAG.to_string(),
        }
    }

    /// Scan for a different tag than `to-do`.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Walks every page, optionally just one notebook's, and scans each
    /// page's HTML for the tag.
    ///
    /// Pages are requested sorted by title with their parents expanded
    /// so the report can name where each fragment lives.
    pub async fn find(&self, notebook: Option<&str>) -> Result<TodoReport, AppError> {
        let mut options = QueryOptions::new()
            .with_count()
            .order_by("title")
            .expand("parentNotebook")
            .expand("parentSection");
        if let Some(name) = notebook {
            options = options.filter(filter_notebook_name(name));
        }

        let mut report = TodoReport::default();
        let mut query = options.to_pairs();

        loop {
            let batch = self.repository.list_pages(&query).await?;
            if report.total_pages.is_none() {
                report.total_pages = batch.count;
            }

            self.scan_batch(&batch.value, &mut report).await?;

            match batch.next_link {
                Some(link) => query = continuation_query(&link)?,
                None => break,
            }
        }

        log::info!(
            "Scanned {} page(s), {} carried '{}' fragments",
            report.pages_scanned,
            report.pages.len(),
            self.tag
        );
        Ok(report)
    }

    /// Fetches one batch's HTML, every request in flight at once, and
    /// appends the pages that carried fragments. Any fetch error aborts
    /// the whole run.
    async fn scan_batch(&self, pages: &[Page], report: &mut TodoReport) -> Result<(), AppError> {
        log::debug!("Fetching content for a batch of {} page(s)", pages.len());

        let contents = future::join_all(
            pages
                .iter()
                .map(|page| self.repository.get_page_content(&page.id)),
        )
        .await;

        for (page, content) in pages.iter().zip(contents) {
            report.pages_scanned += 1;

            let fragments = find_tagged_fragments(&content?, &self.tag);
            if fragments.is_empty() {
                continue;
            }

            report.pages.push(PageTodos {
                notebook: parent_or_unknown(page.notebook_name()),
                section: parent_or_unknown(page.section_name()),
                title: page.title.clone(),
                fragments,
            });
        }

        Ok(())
    }
}

fn parent_or_unknown(name: Option<&str>) -> String {
    match name {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => UNKNOWN_PARENT.to_string(),
    }
}
