// src/auth/store.rs
//! Access-token persistence: one token string in one file.
//!
//! The token file is the only state this tool keeps between runs. No
//! refresh token, no expiry bookkeeping; when Graph starts answering
//! 401 the user signs in again and the file gets rewritten.

use crate::error::AppError;
use crate::types::AccessToken;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Reads and writes the persisted access token.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the raw token string. On Unix the file ends up readable
    /// by the owner only.
    pub fn save(&self, token: &AccessToken) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(&self.path, token.as_str())?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))?;
        }

        log::info!("Access token written to {}", self.path.display());
        Ok(())
    }

    /// Reads the persisted token back. A missing file gets its own error
    /// so the user is told to log in rather than shown a raw ENOENT.
    pub fn load(&self) -> Result<AccessToken, AppError> {
        let raw = fs::read_to_string(&self.path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                AppError::TokenNotFound {
                    path: self.path.clone(),
                    source,
                }
            } else {
                AppError::Io(source)
            }
        })?;

        AccessToken::new(raw)
    }
}
