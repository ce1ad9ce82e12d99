//! Response status policy.
//!
//! A response is rejected when its status is one of the fail codes, or when
//! ok codes are configured and its status is not one of them. Fail codes are
//! checked first.

use reqwest::StatusCode;

use crate::error::Error;

/// Maximum number of body bytes quoted in a status error.
pub const SNIPPET_LEN: usize = 50;

/// Returns the leading bytes of `body` as text, at most [`SNIPPET_LEN`] bytes.
///
/// # Example
///
/// ```rust
/// use volley::utils::body_snippet;
///
/// assert_eq!(body_snippet(b"short"), "short");
/// assert_eq!(body_snippet(&[b'x'; 80]).len(), 50);
/// ```
pub fn body_snippet(body: &[u8]) -> String {
    let end = body.len().min(SNIPPET_LEN);
    String::from_utf8_lossy(body.get(..end).unwrap_or_default()).into_owned()
}

/// Applies the fail/ok code policy to a response.
///
/// Empty code lists disable the corresponding check.
pub fn check_status(
    status: StatusCode,
    body: &[u8],
    ok_codes: &[u16],
    fail_codes: &[u16],
) -> Result<(), Error> {
    let code = status.as_u16();
    let rejected =
        fail_codes.contains(&code) || (!ok_codes.is_empty() && !ok_codes.contains(&code));

    if rejected {
        return Err(Error::Status {
            status,
            snippet: body_snippet(body),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_policy_accepts_everything() {
        assert!(check_status(StatusCode::INTERNAL_SERVER_ERROR, b"", &[], &[]).is_ok());
    }

    #[test]
    fn test_fail_codes_take_precedence() {
        let err = check_status(StatusCode::FORBIDDEN, b"nope", &[403], &[403]).unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));
    }

    #[test]
    fn test_ok_codes_reject_others() {
        assert!(check_status(StatusCode::FORBIDDEN, b"", &[200], &[]).is_err());
        assert!(check_status(StatusCode::OK, b"", &[200, 201], &[]).is_ok());
    }

    #[test]
    fn test_fail_codes_only() {
        assert!(check_status(StatusCode::OK, b"", &[], &[500]).is_ok());
        assert!(check_status(StatusCode::INTERNAL_SERVER_ERROR, b"", &[], &[500]).is_err());
    }

    #[test]
    fn test_snippet_is_clamped() {
        assert_eq!(body_snippet(b""), "");
        assert_eq!(body_snippet(b"Server error"), "Server error");
        let long = "a".repeat(120);
        assert_eq!(body_snippet(long.as_bytes()), "a".repeat(SNIPPET_LEN));
    }

    #[test]
    fn test_snippet_tolerates_split_utf8() {
        // 49 ASCII bytes then a two-byte character cut in half.
        let mut body = "a".repeat(49).into_bytes();
        body.extend_from_slice("é".as_bytes());
        let snippet = body_snippet(&body);
        assert!(snippet.starts_with(&"a".repeat(49)));
        assert!(snippet.ends_with('\u{FFFD}'));
    }

    #[test]
    fn test_status_error_carries_snippet() {
        let body = "x".repeat(200);
        match check_status(StatusCode::BAD_GATEWAY, body.as_bytes(), &[200], &[]) {
            Err(Error::Status { status, snippet }) => {
                assert_eq!(status, StatusCode::BAD_GATEWAY);
                assert_eq!(snippet.len(), SNIPPET_LEN);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
