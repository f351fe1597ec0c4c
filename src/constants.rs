// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role. Reading these constants should tell you the story of
//! how the tool operates: which service it talks to, how a login redirect
//! is delivered, and what a tagged to-do looks like in page HTML.

// ---------------------------------------------------------------------------
// Microsoft Graph boundaries
// ---------------------------------------------------------------------------

/// Base URL for Microsoft Graph. Every OneNote request is resolved
/// against this root, including the continuation links Graph hands back.
pub const GRAPH_API_BASE: &str = "https://graph.microsoft.com/v1.0";

/// Maximum characters shown when previewing error response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;

// ---------------------------------------------------------------------------
// OAuth login
// ---------------------------------------------------------------------------

/// Base URL of the Microsoft identity platform. The authorization and
/// token endpoints live at `{LOGIN_BASE}/{tenant}/oauth2/v2.0/...`.
pub const LOGIN_BASE: &str = "https://login.microsoftonline.com";

/// Tenant used when none is configured.
///
/// "common" accepts both personal Microsoft accounts and work/school
/// accounts, which is what a single-user notes tool wants.
pub const DEFAULT_TENANT: &str = "common";

/// Redirect URI for the manual (paste-the-URL) login mode.
///
/// This page is served by Microsoft itself, so no local listener is
/// needed; after consent the authorization code sits in the browser's
/// address bar for the user to copy.
pub const NATIVE_CLIENT_REDIRECT: &str =
    "https://login.microsoftonline.com/common/oauth2/nativeclient";

/// Port the loopback redirect listener binds by default.
pub const DEFAULT_REDIRECT_PORT: u16 = 9999;

/// Path component of the loopback redirect URI.
///
/// Browsers also ask for favicons and such; requests for any other path
/// are answered with 404 and the listener keeps waiting.
pub const REDIRECT_CALLBACK_PATH: &str = "/oauth/callback";

/// OAuth scopes requested during login. `Notes.Read` grants read access
/// to the signed-in user's OneNote content.
pub const DEFAULT_SCOPES: &[&str] = &["Notes.Read", "offline_access"];

/// Where the access token is persisted between runs.
pub const DEFAULT_TOKEN_FILE: &str = "token.txt";

/// Environment variable carrying the app registration's client id.
/// Kept out of the command line so it stays out of shell history.
pub const MS_CLIENT_ID_VAR: &str = "MS_CLIENT_ID";

/// Environment variable carrying the optional client secret. Public
/// clients (the registration kind this tool expects) don't have one.
pub const MS_CLIENT_SECRET_VAR: &str = "MS_CLIENT_SECRET";

/// Environment variable overriding the sign-in tenant.
pub const MS_TENANT_VAR: &str = "MS_TENANT";

// ---------------------------------------------------------------------------
// Tag scanning
// ---------------------------------------------------------------------------

/// Attribute OneNote uses to mark tagged elements in page HTML.
///
/// The value is a comma-separated list of tag names, e.g.
/// `data-tag="to-do"` or `data-tag="to-do:completed,important"`.
pub const TAG_ATTRIBUTE: &str = "data-tag";

/// Tag value the to-do extractor looks for by default.
pub const DEFAULT_TODO_TAG: &str = "to-do";
