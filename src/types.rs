// src/types.rs
//! Domain-specific newtypes for type safety and validation.

use crate::error::AppError;
use std::fmt;

/// Bearer token for Microsoft Graph requests.
///
/// The raw string is what the token endpoint returned and what gets
/// persisted to disk. Wrapping it keeps it from leaking into logs:
/// `Display` redacts everything past a short prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Create a new access token with validation.
    ///
    /// Leading and trailing whitespace is trimmed so a token file edited
    /// by hand (trailing newline, say) still loads.
    pub fn new(token: impl Into<String>) -> Result<Self, AppError> {
        let token = token.into();
        let token = token.trim();

        if token.is_empty() {
            return Err(AppError::InvalidToken(
                "access token is empty".to_string(),
            ));
        }

        // Anything that can't sit in an Authorization header is rejected
        // here rather than at request time.
        if !token.chars().all(|c| c.is_ascii_graphic()) {
            return Err(AppError::InvalidToken(
                "access token contains whitespace or non-printable characters".to_string(),
            ));
        }

        Ok(Self(token.to_string()))
    }

    /// Get the token as a string reference
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Create an access token without validation (only for testing)
    #[cfg(test)]
    pub fn new_unchecked(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl fmt::Display for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Redact the token in display
        let prefix: String = self.0.chars().take(8).collect();
        write!(f, "{}...", prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_token_validation() {
        assert!(AccessToken::new("EwBYA8l6BAAUO9chh8cJscQLmU+LSWpbnr0vmwwAA").is_ok());
        assert!(AccessToken::new("").is_err());
        assert!(AccessToken::new("   ").is_err());
        assert!(AccessToken::new("two tokens").is_err());
        assert!(AccessToken::new("tab\there").is_err());
    }

    #[test]
    fn test_access_token_trims_surrounding_whitespace() {
        let token = AccessToken::new("abc123def456\n").unwrap();
        assert_eq!(token.as_str(), "abc123def456");
    }

    #[test]
    fn test_display_redacts_token() {
        let token = AccessToken::new_unchecked("EwBYA8l6BAAUO9chh8cJscQLmU");
        let shown = token.to_string();
        assert_eq!(shown, "EwBYA8l6...");
        assert!(!shown.contains("BAAUO9chh8cJscQLmU"));
    }
}
