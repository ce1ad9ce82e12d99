//! Method shortcuts.
//!
//! Each function starts a [`RequestPlan`] with the method and URL already
//! set:
//!
//! ```rust
//! let plan = volley::delete("http://localhost/books/7");
//! assert_eq!(plan.method_name(), "DELETE");
//! assert_eq!(plan.url_str(), "http://localhost/books/7");
//! ```

use reqwest::Method;

use super::builder::RequestPlan;

/// Starts an empty plan.
pub fn requests<'a>() -> RequestPlan<'a> {
    RequestPlan::new()
}

fn plan<'a>(method: Method, url: impl Into<String>) -> RequestPlan<'a> {
    RequestPlan::new().method(method).url(url)
}

/// Starts a GET plan.
pub fn get<'a>(url: impl Into<String>) -> RequestPlan<'a> {
    plan(Method::GET, url)
}

/// Starts a POST plan.
pub fn post<'a>(url: impl Into<String>) -> RequestPlan<'a> {
    plan(Method::POST, url)
}

/// Starts a PUT plan.
pub fn put<'a>(url: impl Into<String>) -> RequestPlan<'a> {
    plan(Method::PUT, url)
}

/// Starts a PATCH plan.
pub fn patch<'a>(url: impl Into<String>) -> RequestPlan<'a> {
    plan(Method::PATCH, url)
}

/// Starts a DELETE plan.
pub fn delete<'a>(url: impl Into<String>) -> RequestPlan<'a> {
    plan(Method::DELETE, url)
}

/// Starts a HEAD plan.
pub fn head<'a>(url: impl Into<String>) -> RequestPlan<'a> {
    plan(Method::HEAD, url)
}

/// Starts an OPTIONS plan.
pub fn options<'a>(url: impl Into<String>) -> RequestPlan<'a> {
    plan(Method::OPTIONS, url)
}

/// Starts a TRACE plan.
pub fn trace<'a>(url: impl Into<String>) -> RequestPlan<'a> {
    plan(Method::TRACE, url)
}

/// Starts a CONNECT plan.
pub fn connect<'a>(url: impl Into<String>) -> RequestPlan<'a> {
    plan(Method::CONNECT, url)
}
