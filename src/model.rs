// src/model.rs
//! OneNote resource records as Microsoft Graph returns them.
//!
//! Every struct tolerates sparse payloads: `$select` trims responses down
//! to a handful of fields, so everything that can be absent is either an
//! `Option` or falls back to its default. Parent references are only
//! populated when the request asked for them with `$expand`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One identity (user, application, or device) attached to a resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Identity {
    pub id: Option<String>,
    pub display_name: Option<String>,
}

/// Graph `identitySet`: who created or last touched a resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IdentitySet {
    pub user: Option<Identity>,
    pub application: Option<Identity>,
    pub device: Option<Identity>,
}

/// A clickable URL wrapped in Graph's `externalLink` shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExternalLink {
    pub href: Option<String>,
}

/// Links for opening a resource in the OneNote client or on the web.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResourceLinks {
    pub one_note_client_url: Option<ExternalLink>,
    pub one_note_web_url: Option<ExternalLink>,
}

impl ResourceLinks {
    /// The web URL, when Graph supplied one.
    pub fn web_href(&self) -> Option<&str> {
        self.one_note_web_url.as_ref()?.href.as_deref()
    }
}

/// A OneNote notebook.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Notebook {
    pub id: String,
    /// API URL of this notebook itself.
    #[serde(rename = "self")]
    pub self_link: Option<String>,
    pub display_name: String,
    pub created_date_time: Option<DateTime<Utc>>,
    pub last_modified_date_time: Option<DateTime<Utc>>,
    pub created_by: Option<IdentitySet>,
    pub last_modified_by: Option<IdentitySet>,
    pub is_default: bool,
    pub is_shared: bool,
    /// "Owner", "Contributor", or "Reader" on shared notebooks.
    pub user_role: Option<String>,
    /// Collection URL for the sections inside this notebook.
    pub sections_url: Option<String>,
    pub section_groups_url: Option<String>,
    pub links: Option<ResourceLinks>,
}

/// A section inside a notebook.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Section {
    pub id: String,
    #[serde(rename = "self")]
    pub self_link: Option<String>,
    pub display_name: String,
    pub created_date_time: Option<DateTime<Utc>>,
    pub last_modified_date_time: Option<DateTime<Utc>>,
    pub created_by: Option<IdentitySet>,
    pub last_modified_by: Option<IdentitySet>,
    pub is_default: bool,
    /// Collection URL for the pages inside this section.
    pub pages_url: Option<String>,
    pub links: Option<ResourceLinks>,
    /// Populated only when the request expanded `parentNotebook`.
    pub parent_notebook: Option<Notebook>,
}

/// A OneNote page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Page {
    pub id: String,
    #[serde(rename = "self")]
    pub self_link: Option<String>,
    pub title: String,
    pub created_date_time: Option<DateTime<Utc>>,
    pub last_modified_date_time: Option<DateTime<Utc>>,
    pub created_by_app_id: Option<String>,
    /// URL of the page's HTML content endpoint.
    pub content_url: Option<String>,
    /// Inline HTML. Graph serves it from the content endpoint instead,
    /// so list and get responses leave this absent.
    pub content: Option<String>,
    /// Graph sends `null` here unless page levels were requested.
    pub level: Option<i32>,
    pub order: Option<i32>,
    pub links: Option<ResourceLinks>,
    /// Populated only when the request expanded `parentNotebook`.
    pub parent_notebook: Option<Notebook>,
    /// Populated only when the request expanded `parentSection`.
    pub parent_section: Option<Section>,
}

impl Page {
    /// Display name of the expanded parent notebook, if any.
    pub fn notebook_name(&self) -> Option<&str> {
        self.parent_notebook
            .as_ref()
            .map(|notebook| notebook.display_name.as_str())
    }

    /// Display name of the expanded parent section, if any.
    pub fn section_name(&self) -> Option<&str> {
        self.parent_section
            .as_ref()
            .map(|section| section.display_name.as_str())
    }

    /// The page's web URL, if Graph supplied links.
    pub fn web_href(&self) -> Option<&str> {
        self.links.as_ref()?.web_href()
    }
}
