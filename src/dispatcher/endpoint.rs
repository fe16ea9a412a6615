//! Backend action paths and endpoint resolution.

use url::Url;

use crate::error::{ApiError, Result};

/// Action paths, relative to the base endpoint.
pub mod actions {
    pub const PROFILE: &str = "profile";
    pub const CONTACTS: &str = "profile/contacts";
    pub const MFA_TOKEN: &str = "profile/mfatoken";
    pub const QUARANTINE: &str = "profile/quarantine";
    pub const LOCATION: &str = "profile/location";
    pub const AREA_EXIT: &str = "profile/areaexit";
}

/// Validate a base endpoint and normalize it to have no trailing slash.
pub(crate) fn normalize_base(base: &str) -> Result<String> {
    let url = Url::parse(base.trim())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ApiError::UnsupportedEndpoint(base.to_string()));
    }
    Ok(url.as_str().trim_end_matches('/').to_string())
}

/// Join `action` onto `base` with exactly one `/` between them.
pub(crate) fn resolve(base: &str, action: &str) -> Result<Url> {
    let action = action.trim().trim_start_matches('/');
    if action.is_empty() {
        return Err(ApiError::EmptyAction);
    }
    Ok(Url::parse(&format!(
        "{}/{}",
        base.trim_end_matches('/'),
        action
    ))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_trailing_slash() {
        assert_eq!(
            normalize_base("https://api.example.com/v1/").unwrap(),
            "https://api.example.com/v1"
        );
        assert_eq!(
            normalize_base("https://api.example.com").unwrap(),
            "https://api.example.com"
        );
    }

    #[test]
    fn test_normalize_rejects_relative_and_non_http() {
        assert!(matches!(
            normalize_base("api/v1"),
            Err(ApiError::InvalidEndpoint(_))
        ));
        assert!(matches!(
            normalize_base("ftp://api.example.com"),
            Err(ApiError::UnsupportedEndpoint(_))
        ));
    }

    #[test]
    fn test_resolve_joins_with_single_slash() {
        let base = "https://api.example.com/v1";
        assert_eq!(
            resolve(base, actions::CONTACTS).unwrap().as_str(),
            "https://api.example.com/v1/profile/contacts"
        );
        assert_eq!(
            resolve("https://api.example.com/v1/", "/profile").unwrap().as_str(),
            "https://api.example.com/v1/profile"
        );
    }

    #[test]
    fn test_resolve_rejects_empty_action() {
        assert!(matches!(
            resolve("https://api.example.com", ""),
            Err(ApiError::EmptyAction)
        ));
        assert!(matches!(
            resolve("https://api.example.com", "/"),
            Err(ApiError::EmptyAction)
        ));
    }
}
