//! Option-function interface.
//!
//! An alternative to chaining: a request is described as a list of
//! [`RequestOption`] values applied in order to a GET plan, then executed by
//! [`run`]. Options may fail; the first failure aborts with
//! [`Error::InvalidOption`] before any extension runs or any request is sent.
//!
//! # Examples
//!
//! ```rust,no_run
//! use volley::options::{self, with_cookies, with_header, with_output, with_url};
//! use volley::{Cookie, Output};
//!
//! # async fn example() -> Result<(), volley::Error> {
//! let mut info = serde_json::Value::Null;
//! options::get(vec![
//!     with_url("http://localhost:8000/path/"),
//!     with_header("accept", "application/json"),
//!     with_cookies([Cookie::new("id", "1")]),
//!     with_output(Output::json(&mut info)),
//! ])
//! .await?;
//! # Ok(())
//! # }
//! ```

use std::fmt::{self, Display};
use std::sync::Arc;

use bytes::Bytes;
use reqwest::Method;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::extension::{BoxError, Extension};
use crate::http::HttpClient;
use crate::requests::{Cookie, Output, RequestPlan, Response};
use crate::utils::format_template;

type Apply<'a> =
    Box<dyn FnOnce(&mut RequestPlan<'a>) -> std::result::Result<(), BoxError> + Send + 'a>;

/// A single configuration step applied to a [`RequestPlan`].
pub struct RequestOption<'a>(Apply<'a>);

impl fmt::Debug for RequestOption<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RequestOption")
    }
}

impl<'a> RequestOption<'a> {
    /// Creates an option from a closure.
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce(&mut RequestPlan<'a>) -> std::result::Result<(), BoxError> + Send + 'a,
    {
        Self(Box::new(f))
    }

    /// Creates an option from an infallible builder step.
    fn step<F>(f: F) -> Self
    where
        F: FnOnce(RequestPlan<'a>) -> RequestPlan<'a> + Send + 'a,
    {
        Self::new(move |plan| {
            *plan = f(std::mem::take(plan));
            Ok(())
        })
    }

    fn apply(self, plan: &mut RequestPlan<'a>) -> Result<()> {
        (self.0)(plan).map_err(|e| Error::InvalidOption(e.to_string()))
    }
}

/// Sets the method.
pub fn with_method<'a>(method: impl AsRef<str>) -> RequestOption<'a> {
    let method = method.as_ref().to_string();
    RequestOption::step(move |plan| plan.method(method))
}

/// Sets the URL verbatim.
pub fn with_url<'a>(url: impl Into<String>) -> RequestOption<'a> {
    let url = url.into();
    RequestOption::step(move |plan| plan.url(url))
}

/// Sets the URL from a `{}` template; fails when arguments do not match.
pub fn with_url_fmt<'a>(template: &str, args: &[&dyn Display]) -> RequestOption<'a> {
    let url = format_template(template, args);
    RequestOption::new(move |plan| {
        *plan = std::mem::take(plan).url(url?);
        Ok(())
    })
}

/// Adds a header value.
pub fn with_header<'a>(key: impl Into<String>, value: impl Into<String>) -> RequestOption<'a> {
    let (key, value) = (key.into(), value.into());
    RequestOption::step(move |plan| plan.header(key, value))
}

/// Adds several header values.
pub fn with_headers<'a, I, K, V>(headers: I) -> RequestOption<'a>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let headers: Vec<(String, String)> = headers
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect();
    RequestOption::step(move |plan| plan.headers(headers))
}

/// Adds cookies.
pub fn with_cookies<'a, I, C>(cookies: I) -> RequestOption<'a>
where
    I: IntoIterator<Item = C>,
    C: Into<Cookie>,
{
    let cookies: Vec<Cookie> = cookies.into_iter().map(Into::into).collect();
    RequestOption::step(move |plan| plan.cookies(cookies))
}

/// Sets where the response body is written.
pub fn with_output(output: Output<'_>) -> RequestOption<'_> {
    RequestOption::step(move |plan| plan.output(output))
}

/// Sets the accepted status codes.
pub fn with_ok_status_codes<'a>(codes: impl IntoIterator<Item = u16>) -> RequestOption<'a> {
    let codes: Vec<u16> = codes.into_iter().collect();
    RequestOption::step(move |plan| plan.ok_codes(codes))
}

/// Sets the rejected status codes.
pub fn with_err_status_codes<'a>(codes: impl IntoIterator<Item = u16>) -> RequestOption<'a> {
    let codes: Vec<u16> = codes.into_iter().collect();
    RequestOption::step(move |plan| plan.fail_codes(codes))
}

/// Registers extensions, in order.
pub fn with_extensions<'a, I>(extensions: I) -> RequestOption<'a>
where
    I: IntoIterator<Item = Arc<dyn Extension>>,
{
    let extensions: Vec<Arc<dyn Extension>> = extensions.into_iter().collect();
    RequestOption::step(move |plan| {
        extensions
            .into_iter()
            .fold(plan, |plan, extension| plan.with_shared(extension))
    })
}

/// Sets a raw body with an optional content type.
pub fn with_body<'a>(data: impl Into<Bytes>, content_type: Option<&str>) -> RequestOption<'a> {
    let data = data.into();
    let content_type = content_type.map(str::to_string);
    RequestOption::step(move |plan| plan.body(data, content_type.as_deref()))
}

/// Sets a form body.
pub fn with_form<'a, I, K, V>(form: I) -> RequestOption<'a>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let form: Vec<(String, String)> = form
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect();
    RequestOption::step(move |plan| plan.form(form))
}

/// Sets a JSON body. Serialization failures are reported at execution.
pub fn with_json<'a, T: Serialize + ?Sized>(value: &T) -> RequestOption<'a> {
    let encoded = serde_json::to_vec(value);
    RequestOption::step(move |plan| plan.json_encoded(encoded))
}

/// Starts from `client` instead of a fresh default client.
pub fn with_client<'a>(client: HttpClient) -> RequestOption<'a> {
    RequestOption::step(move |plan| plan.client(client))
}

/// Applies options in order to a GET plan.
pub fn build<'a, I>(options: I) -> Result<RequestPlan<'a>>
where
    I: IntoIterator<Item = RequestOption<'a>>,
{
    let mut plan = RequestPlan::new().method(Method::GET);
    for option in options {
        option.apply(&mut plan)?;
    }
    Ok(plan)
}

/// Applies options in order and executes the resulting plan.
pub async fn run<'a, I>(options: I) -> Result<Response>
where
    I: IntoIterator<Item = RequestOption<'a>>,
{
    build(options)?.execute().await
}

async fn run_with<'a, I>(method: Method, options: I) -> Result<Response>
where
    I: IntoIterator<Item = RequestOption<'a>>,
{
    run(options.into_iter().chain([with_method(method)])).await
}

/// Runs a GET request; the method overrides any [`with_method`] option.
pub async fn get<'a, I>(options: I) -> Result<Response>
where
    I: IntoIterator<Item = RequestOption<'a>>,
{
    run_with(Method::GET, options).await
}

/// Runs a POST request; the method overrides any [`with_method`] option.
pub async fn post<'a, I>(options: I) -> Result<Response>
where
    I: IntoIterator<Item = RequestOption<'a>>,
{
    run_with(Method::POST, options).await
}

/// Runs a PUT request; the method overrides any [`with_method`] option.
pub async fn put<'a, I>(options: I) -> Result<Response>
where
    I: IntoIterator<Item = RequestOption<'a>>,
{
    run_with(Method::PUT, options).await
}

/// Runs a PATCH request; the method overrides any [`with_method`] option.
pub async fn patch<'a, I>(options: I) -> Result<Response>
where
    I: IntoIterator<Item = RequestOption<'a>>,
{
    run_with(Method::PATCH, options).await
}

/// Runs a DELETE request; the method overrides any [`with_method`] option.
pub async fn delete<'a, I>(options: I) -> Result<Response>
where
    I: IntoIterator<Item = RequestOption<'a>>,
{
    run_with(Method::DELETE, options).await
}
