//! Check-in token wire format.
//!
//! The value embedded in a QR code is `emas://checkin/<token>` where
//! `<token>` is the registration's opaque check-in token. The scheme and
//! namespace literals are part of the wire contract shared with every QR
//! code already printed or on a phone screen; changing them invalidates all
//! of those.

use thiserror::Error;

pub const PREFIX: &str = "emas://checkin/";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Invalid QR code format")]
    InvalidFormat,
}

/// Render a registration's check-in token as the QR payload. Pure and
/// idempotent: the same token always yields the same payload.
pub fn issue(checkin_token: &str) -> String {
    format!("{PREFIX}{checkin_token}")
}

/// Extract the check-in token from a scanned payload. Accepts exactly the
/// format `issue` produces; everything else is malformed.
pub fn parse(payload: &str) -> Result<&str, TokenError> {
    let token = payload
        .strip_prefix(PREFIX)
        .ok_or(TokenError::InvalidFormat)?;

    if token.is_empty() || token.contains('/') || token.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(TokenError::InvalidFormat);
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issuance_is_idempotent() {
        let token = "4b8c5ad4-6c8e-4b2f-9f3a-70c1a9e3d861";
        assert_eq!(issue(token), issue(token));
        assert_eq!(issue(token), "emas://checkin/4b8c5ad4-6c8e-4b2f-9f3a-70c1a9e3d861");
    }

    #[test]
    fn parse_round_trips_issue() {
        let token = "4b8c5ad4-6c8e-4b2f-9f3a-70c1a9e3d861";
        assert_eq!(parse(&issue(token)), Ok(token));
    }

    #[test]
    fn garbage_is_malformed() {
        assert_eq!(parse("garbage-not-a-uri"), Err(TokenError::InvalidFormat));
    }

    #[test]
    fn foreign_scheme_is_malformed() {
        assert_eq!(
            parse("https://checkin/4b8c5ad4"),
            Err(TokenError::InvalidFormat)
        );
    }

    #[test]
    fn empty_token_is_malformed() {
        assert_eq!(parse("emas://checkin/"), Err(TokenError::InvalidFormat));
    }

    #[test]
    fn extra_path_segments_are_malformed() {
        assert_eq!(
            parse("emas://checkin/abc/def"),
            Err(TokenError::InvalidFormat)
        );
    }

    #[test]
    fn embedded_whitespace_is_malformed() {
        assert_eq!(
            parse("emas://checkin/abc def"),
            Err(TokenError::InvalidFormat)
        );
    }
}
