// src/api/client.rs
//! Pure HTTP client wrapper for Microsoft Graph.
//!
//! This module provides a thin wrapper around reqwest for making
//! bearer-authenticated GET requests to the OneNote endpoints. It
//! handles authentication and error mapping without business logic.

use crate::constants::{ERROR_BODY_PREVIEW_LENGTH, GRAPH_API_BASE};
use crate::error::{AppError, GraphErrorCode};
use crate::model::{Notebook, Page, Section};
use crate::types::AccessToken;
use reqwest::{header, Client, Response};
use serde::de::DeserializeOwned;

use super::responses::{GraphErrorBody, ListResponse};

/// A thin wrapper around reqwest Client for Microsoft Graph requests.
#[derive(Clone)]
pub struct GraphClient {
    client: Client,
}

impl GraphClient {
    /// Creates a new HTTP client that sends the bearer token on every request.
    pub fn new(token: &AccessToken) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(token)?)
            .build()?;
        Ok(Self { client })
    }

    /// Creates the default headers for Graph requests.
    fn create_headers(token: &AccessToken) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", token.as_str());
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&auth_header).map_err(|e| {
                AppError::InvalidToken(format!("not usable in an Authorization header: {}", e))
            })?,
        );

        Ok(headers)
    }

    /// Makes a GET request and returns the raw body text.
    ///
    /// Page content is HTML, not JSON, so the text form is the primitive
    /// and [`GraphClient::get_json`] builds on it.
    pub async fn get_text(
        &self,
        endpoint: &str,
        query: &[(String, String)],
    ) -> Result<String, AppError> {
        let url = format!("{}/{}", GRAPH_API_BASE, endpoint);
        log::debug!("GET {} ({} query pairs)", url, query.len());

        let response = self.client.get(url).query(query).send().await?;
        let response = ensure_success(response).await?;
        Ok(response.text().await?)
    }

    /// Makes a GET request and decodes the JSON body.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(String, String)],
    ) -> Result<T, AppError> {
        let body = self.get_text(endpoint, query).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait::async_trait]
impl super::OneNoteRepository for GraphClient {
    async fn list_notebooks(
        &self,
        query: &[(String, String)],
    ) -> Result<ListResponse<Notebook>, AppError> {
        self.get_json("me/onenote/notebooks", query).await
    }

    async fn list_sections(
        &self,
        query: &[(String, String)],
    ) -> Result<ListResponse<Section>, AppError> {
        self.get_json("me/onenote/sections", query).await
    }

    async fn list_pages(
        &self,
        query: &[(String, String)],
    ) -> Result<ListResponse<Page>, AppError> {
        self.get_json("me/onenote/pages", query).await
    }

    async fn get_page(&self, id: &str, query: &[(String, String)]) -> Result<Page, AppError> {
        let endpoint = format!("me/onenote/pages/{}", id);
        self.get_json(&endpoint, query).await
    }

    async fn get_page_content(&self, id: &str) -> Result<String, AppError> {
        let endpoint = format!("me/onenote/pages/{}/content", id);
        self.get_text(&endpoint, &[]).await
    }
}

/// Turns a non-2xx response into a typed Graph error.
///
/// Graph error bodies carry `{"error": {"code", "message"}}`; when the
/// body doesn't parse as that shape, the HTTP status and a preview of
/// the raw body stand in.
async fn ensure_success(response: Response) -> Result<Response, AppError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().to_string();
    let body = response.text().await.unwrap_or_default();

    let (code, message) = match serde_json::from_str::<GraphErrorBody>(&body) {
        Ok(parsed) => {
            if let Some(inner) = &parsed.error.inner_error {
                log::debug!("Graph innerError: {}", inner);
            }
            (
                GraphErrorCode::from_api_response(&parsed.error.code),
                parsed.error.message,
            )
        }
        Err(_) => {
            let message = if body.trim().is_empty() {
                status.to_string()
            } else {
                preview(&body, ERROR_BODY_PREVIEW_LENGTH)
            };
            (GraphErrorCode::from_http_status(status.as_u16()), message)
        }
    };

    log::warn!("Graph request failed: {} {} ({})", status, url, code);
    Err(AppError::GraphService {
        code,
        message,
        status,
    })
}

/// Truncates an error body for display, respecting char boundaries.
fn preview(body: &str, limit: usize) -> String {
    if body.len() <= limit {
        return body.to_string();
    }
    let mut end = limit;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
