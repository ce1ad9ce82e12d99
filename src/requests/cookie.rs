//! Request cookies.

use std::fmt;

/// A cookie sent with a request.
///
/// Only the name and value travel in the `Cookie` request header; the
/// attributes describe where the cookie came from and are kept for callers
/// that forward cookies between requests.
///
/// ```rust
/// use volley::Cookie;
///
/// let cookie = Cookie::new("token", "abc").path("/api").secure(true);
/// assert_eq!(cookie.to_string(), "token=abc");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cookie {
    /// Cookie name.
    pub name: String,
    /// Cookie value.
    pub value: String,
    /// Path attribute.
    pub path: Option<String>,
    /// Domain attribute.
    pub domain: Option<String>,
    /// Secure attribute.
    pub secure: bool,
    /// HttpOnly attribute.
    pub http_only: bool,
}

impl Cookie {
    /// Creates a cookie without attributes.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            ..Self::default()
        }
    }

    /// Sets the path attribute.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Sets the domain attribute.
    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Sets the secure attribute.
    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Sets the http-only attribute.
    pub fn http_only(mut self, http_only: bool) -> Self {
        self.http_only = http_only;
        self
    }
}

impl<N: Into<String>, V: Into<String>> From<(N, V)> for Cookie {
    fn from((name, value): (N, V)) -> Self {
        Cookie::new(name, value)
    }
}

impl fmt::Display for Cookie {
    /// Formats the `name=value` pair used in the `Cookie` header.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

/// Joins cookies into a `Cookie` header value, after any `existing` value.
pub(crate) fn cookie_header(existing: Option<&str>, cookies: &[Cookie]) -> String {
    existing
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .into_iter()
        .chain(cookies.iter().map(Cookie::to_string))
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_header_joins_pairs() {
        let cookies = [Cookie::new("id", "1"), Cookie::from(("test", "test"))];
        assert_eq!(cookie_header(None, &cookies), "id=1; test=test");
    }

    #[test]
    fn test_cookie_header_appends_to_existing() {
        let cookies = [Cookie::new("id", "1")];
        assert_eq!(cookie_header(Some("a=b"), &cookies), "a=b; id=1");
        assert_eq!(cookie_header(Some(""), &cookies), "id=1");
    }

    #[test]
    fn test_attributes_are_not_sent() {
        let cookie = Cookie::new("sid", "x")
            .domain("example.com")
            .path("/")
            .http_only(true);
        assert_eq!(cookie.to_string(), "sid=x");
        assert_eq!(cookie.domain.as_deref(), Some("example.com"));
    }
}
