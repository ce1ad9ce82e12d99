//! Fluent request plan builder.
//!
//! A [`RequestPlan`] accumulates everything needed to issue one request.
//! Every configuration call takes the plan by value and returns it, so calls
//! chain freely and in any order. Scalar settings (method, URL, body sources,
//! status codes, outputs) are last-write-wins; headers, cookies and
//! extensions accumulate.
//!
//! No configuration call performs I/O or validation. Problems such as a bad
//! URL template or an invalid header name are reported by
//! [`RequestPlan::execute`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::collections::HashMap;
//!
//! # async fn example() -> Result<(), volley::Error> {
//! let mut book: HashMap<String, String> = HashMap::new();
//! volley::post("http://localhost/books")
//!     .header("Authorization", "Bearer token")
//!     .json(&serde_json::json!({"title": "A book"}))
//!     .ok_codes([200, 201])
//!     .response_json(&mut book)
//!     .execute()
//!     .await?;
//! # Ok(())
//! # }
//! ```

use std::fmt::{self, Display};
use std::sync::Arc;

use bytes::Bytes;
use serde::{de::DeserializeOwned, Serialize};

use super::config::{Body, JsonSlot, Output};
use super::cookie::Cookie;
use crate::extension::{Chain, Extension};
use crate::http::HttpClient;
use crate::utils::format_template;

/// Configuration of a single HTTP request, consumed by
/// [`execute`](RequestPlan::execute).
///
/// `'a` is the lifetime of the caller-owned output slots set with
/// [`response_raw`](Self::response_raw), [`response_json`](Self::response_json)
/// or [`output`](Self::output).
#[derive(Default)]
pub struct RequestPlan<'a> {
    pub(crate) method: Option<String>,
    pub(crate) url: String,
    pub(crate) url_error: Option<String>,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) cookies: Vec<Cookie>,
    pub(crate) body: Body,
    pub(crate) ok_codes: Vec<u16>,
    pub(crate) fail_codes: Vec<u16>,
    pub(crate) raw_output: Option<&'a mut Vec<u8>>,
    pub(crate) json_output: Option<JsonSlot<'a>>,
    pub(crate) client: Option<HttpClient>,
    pub(crate) chain: Chain,
}

impl fmt::Debug for RequestPlan<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestPlan")
            .field("method", &self.method_name())
            .field("url", &self.url)
            .field("url_error", &self.url_error)
            .field("headers", &self.headers)
            .field("cookies", &self.cookies)
            .field("body", &self.body)
            .field("ok_codes", &self.ok_codes)
            .field("fail_codes", &self.fail_codes)
            .field("raw_output", &self.raw_output.is_some())
            .field("json_output", &self.json_output.is_some())
            .field("client", &self.client)
            .field("chain", &self.chain)
            .finish()
    }
}

impl<'a> RequestPlan<'a> {
    /// Creates an empty plan. The method defaults to GET.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the HTTP method.
    pub fn method(mut self, method: impl AsRef<str>) -> Self {
        self.method = Some(method.as_ref().to_string());
        self
    }

    /// Sets the URL verbatim.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self.url_error = None;
        self
    }

    /// Sets the URL from a `{}` template filled with `args`.
    ///
    /// Arguments are inserted as-is, without percent-encoding. A template
    /// that does not match its arguments makes
    /// [`execute`](Self::execute) fail with
    /// [`Error::InvalidOption`](crate::Error::InvalidOption).
    ///
    /// ```rust
    /// let plan = volley::requests().url_fmt("http://localhost/users/{}", &[&42]);
    /// assert_eq!(plan.url_str(), "http://localhost/users/42");
    /// ```
    pub fn url_fmt(mut self, template: &str, args: &[&dyn Display]) -> Self {
        match format_template(template, args) {
            Ok(url) => {
                self.url = url;
                self.url_error = None;
            }
            Err(e) => self.url_error = Some(e),
        }
        self
    }

    /// Adds a header value. Existing values for the same name are kept.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Adds several header values. Existing values are kept.
    pub fn headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.headers
            .extend(headers.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Adds a cookie.
    pub fn cookie(mut self, cookie: impl Into<Cookie>) -> Self {
        self.cookies.push(cookie.into());
        self
    }

    /// Adds several cookies.
    pub fn cookies<I, C>(mut self, cookies: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Cookie>,
    {
        self.cookies.extend(cookies.into_iter().map(Into::into));
        self
    }

    /// Sets a raw body with an optional content type.
    ///
    /// Only sent when neither a form nor a JSON body is set.
    pub fn body(mut self, data: impl Into<Bytes>, content_type: Option<&str>) -> Self {
        self.body.data = Some((data.into(), content_type.map(str::to_string)));
        self
    }

    /// Sets a form body, sent as `application/x-www-form-urlencoded`.
    ///
    /// Pairs are encoded sorted by key. A form body replaces any JSON or raw
    /// body, even one set later.
    pub fn form<I, K, V>(mut self, form: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.body.form = Some(
            form.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Sets a JSON body, sent as `application/json`.
    ///
    /// The value is serialized immediately; a serialization failure is
    /// reported by [`execute`](Self::execute) as
    /// [`Error::Encode`](crate::Error::Encode). Ignored when a form body is set.
    pub fn json<T: Serialize + ?Sized>(self, value: &T) -> Self {
        self.json_encoded(serde_json::to_vec(value))
    }

    /// Sets an already serialized JSON body.
    pub(crate) fn json_encoded(mut self, encoded: Result<Vec<u8>, serde_json::Error>) -> Self {
        self.body.json = Some(encoded);
        self
    }

    /// Sets the accepted status codes, replacing previous ones.
    ///
    /// When non-empty, any other status fails the request.
    pub fn ok_codes(mut self, codes: impl IntoIterator<Item = u16>) -> Self {
        self.ok_codes = codes.into_iter().collect();
        self
    }

    /// Sets the rejected status codes, replacing previous ones.
    ///
    /// Checked before the accepted codes.
    pub fn fail_codes(mut self, codes: impl IntoIterator<Item = u16>) -> Self {
        self.fail_codes = codes.into_iter().collect();
        self
    }

    /// Sets where the response body is written.
    ///
    /// The raw and JSON destinations are independent slots: setting one
    /// replaces a previous destination of the same kind only, and when both
    /// are set the body is copied to the raw one and decoded into the JSON
    /// one.
    pub fn output(self, output: Output<'a>) -> Self {
        match output {
            Output::Bytes(out) => self.response_raw(out),
            Output::Json(slot) => Self {
                json_output: Some(slot),
                ..self
            },
        }
    }

    /// Copies the response body into `out`.
    pub fn response_raw(mut self, out: &'a mut Vec<u8>) -> Self {
        self.raw_output = Some(out);
        self
    }

    /// Decodes the response body as JSON into `out`.
    pub fn response_json<T>(mut self, out: &'a mut T) -> Self
    where
        T: DeserializeOwned + Send,
    {
        self.json_output = Some(JsonSlot::new(out));
        self
    }

    /// Starts from `client` instead of a fresh default client.
    pub fn client(mut self, client: HttpClient) -> Self {
        self.client = Some(client);
        self
    }

    /// Registers an extension for every capability it reports.
    pub fn with<E: Extension>(self, extension: E) -> Self {
        self.with_shared(Arc::new(extension))
    }

    /// Registers a shared extension, e.g. one reused across requests.
    ///
    /// The extension is invoked by every plan it is registered with, possibly
    /// concurrently.
    pub fn with_shared<E: Extension + ?Sized>(mut self, extension: Arc<E>) -> Self {
        self.chain.register(extension);
        self
    }

    /// Get the method that will be sent.
    pub fn method_name(&self) -> &str {
        self.method.as_deref().unwrap_or("GET")
    }

    /// Get the URL that will be requested.
    pub fn url_str(&self) -> &str {
        &self.url
    }

    /// Get the accumulated headers, in insertion order.
    pub fn header_pairs(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Get the accumulated cookies.
    pub fn cookie_list(&self) -> &[Cookie] {
        &self.cookies
    }

    /// Get the accepted status codes.
    pub fn ok_status_codes(&self) -> &[u16] {
        &self.ok_codes
    }

    /// Get the rejected status codes.
    pub fn fail_status_codes(&self) -> &[u16] {
        &self.fail_codes
    }

    /// Get the number of registered client overrides.
    pub fn client_override_count(&self) -> usize {
        self.chain.clients.len()
    }

    /// Get the number of registered request overrides.
    pub fn request_override_count(&self) -> usize {
        self.chain.requests.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extension::{client_fn, request_fn, RetryExtension};
    use reqwest::Method;

    #[test]
    fn test_defaults() {
        let plan = RequestPlan::new();
        assert_eq!(plan.method_name(), "GET");
        assert_eq!(plan.url_str(), "");
        assert!(plan.header_pairs().is_empty());
        assert!(plan.cookie_list().is_empty());
        assert_eq!(plan.client_override_count(), 0);
    }

    #[test]
    fn test_scalars_are_last_write_wins() {
        let plan = RequestPlan::new()
            .method("POST")
            .url("http://a/")
            .method(Method::PUT)
            .url("http://b/");
        assert_eq!(plan.method_name(), "PUT");
        assert_eq!(plan.url_str(), "http://b/");
    }

    #[test]
    fn test_headers_accumulate() {
        let plan = RequestPlan::new()
            .header("X-Test", "1")
            .headers([("X-Test", "2"), ("Accept", "*/*")])
            .header("X-Test", "3");
        let values: Vec<_> = plan
            .header_pairs()
            .iter()
            .filter(|(k, _)| k == "X-Test")
            .map(|(_, v)| v.as_str())
            .collect();
        assert_eq!(values, ["1", "2", "3"]);
        assert_eq!(plan.header_pairs().len(), 4);
    }

    #[test]
    fn test_cookies_accumulate() {
        let plan = RequestPlan::new()
            .cookie(("id", "1"))
            .cookies([Cookie::new("test", "test"), Cookie::new("x", "y")]);
        assert_eq!(plan.cookie_list().len(), 3);
        assert_eq!(plan.cookie_list()[0], Cookie::new("id", "1"));
    }

    #[test]
    fn test_status_codes_are_replaced() {
        let plan = RequestPlan::new()
            .ok_codes([200, 201])
            .ok_codes([204])
            .fail_codes([500])
            .fail_codes(Vec::new());
        assert_eq!(plan.ok_status_codes(), &[204]);
        assert!(plan.fail_status_codes().is_empty());
    }

    #[test]
    fn test_url_fmt_error_is_kept_until_replaced() {
        let plan = RequestPlan::new().url_fmt("http://h/{}", &[]);
        assert!(plan.url_error.is_some());
        let plan = plan.url_fmt("http://h/{}", &[&"ok"]);
        assert!(plan.url_error.is_none());
        assert_eq!(plan.url_str(), "http://h/ok");
    }

    #[test]
    fn test_with_sorts_capabilities() {
        let plan = RequestPlan::new()
            .with(RetryExtension::default())
            .with(client_fn(Ok))
            .with(request_fn(Ok));
        assert_eq!(plan.client_override_count(), 2);
        assert_eq!(plan.request_override_count(), 1);
    }

    #[test]
    fn test_output_sets_matching_slot() {
        let mut raw = Vec::new();
        let mut value = serde_json::Value::Null;
        let plan = RequestPlan::new()
            .output(Output::Bytes(&mut raw))
            .output(Output::json(&mut value));
        assert!(plan.raw_output.is_some());
        assert!(plan.json_output.is_some());
    }

    #[test]
    fn test_debug_lists_configuration() {
        let plan = RequestPlan::new().url("http://localhost/");
        let debug = format!("{:?}", plan);
        assert!(debug.contains("RequestPlan"));
        assert!(debug.contains("http://localhost/"));
    }
}
