//! Request plan execution.
//!
//! Execution runs strictly in order and stops at the first failure:
//!
//! 1. resolve the body (form, else JSON, else raw data)
//! 2. rewrite the client with every client override
//! 3. build the request and apply content type, headers and cookies
//! 4. rewrite the request with every request override
//! 5. send it, exactly once
//! 6. read the whole body and apply the fail/ok status policy
//! 7. hand the body to the raw and JSON outputs
//!
//! Nothing touches the network before step 5, so a failing extension never
//! produces a request.

use bytes::Bytes;
use reqwest::{
    header::{HeaderName, HeaderValue, CONTENT_TYPE, COOKIE},
    Method, Url,
};
use tracing::{debug, trace};

use super::builder::RequestPlan;
use super::config::ResolvedBody;
use super::cookie::{cookie_header, Cookie};
use super::response::Response;
use crate::error::{Error, Result, Stage};
use crate::utils::check_status;

impl RequestPlan<'_> {
    /// Executes the plan and returns the buffered response.
    ///
    /// Performs exactly one call on the client; extensions such as
    /// [`RetryExtension`](crate::extension::RetryExtension) may add their own.
    ///
    /// # Errors
    ///
    /// Each stage fails with its own [`Error`] variant; see the module
    /// documentation for the order of stages.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # async fn example() -> Result<(), volley::Error> {
    /// let mut raw = Vec::new();
    /// let response = volley::get("http://localhost/health")
    ///     .fail_codes([500, 503])
    ///     .response_raw(&mut raw)
    ///     .execute()
    ///     .await?;
    /// assert_eq!(response.bytes().as_ref(), raw.as_slice());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn execute(self) -> Result<Response> {
        let RequestPlan {
            method,
            url,
            url_error,
            headers,
            cookies,
            body,
            ok_codes,
            fail_codes,
            raw_output,
            json_output,
            client,
            chain,
        } = self;

        if let Some(e) = url_error {
            return Err(Error::InvalidOption(e));
        }

        let ResolvedBody {
            bytes,
            content_type,
        } = body.resolve().map_err(|source| Error::Encode { source })?;

        // Create client instance and apply client overrides.
        let client = chain
            .apply_client(client.unwrap_or_default())
            .map_err(|source| Error::Middleware {
                stage: Stage::Client,
                source,
            })?;
        trace!(overrides = chain.clients.len(), "Client overrides applied");
        let client = client
            .build()
            .map_err(|source| Error::ClientBuild { source })?;

        let mut request = new_request(method.as_deref(), &url, bytes)?;

        if let Some(content_type) = content_type.filter(|ct| !ct.is_empty()) {
            let value = HeaderValue::from_str(&content_type).map_err(|e| {
                let message = format!("invalid content type {:?}: {}", content_type, e);
                Error::RequestConstruction(message)
            })?;
            request.headers_mut().insert(CONTENT_TYPE, value);
        }

        for (key, value) in &headers {
            let (name, value) = header_pair(key, value)?;
            request.headers_mut().append(name, value);
        }

        add_cookies(&mut request, &cookies)?;

        let request = chain
            .apply_request(request)
            .map_err(|source| Error::Middleware {
                stage: Stage::Request,
                source,
            })?;

        debug!(method = %request.method(), url = %request.url(), "Sending request");
        let response = client.execute(request).await?;

        let status = response.status();
        let response_headers = response.headers().clone();
        let response_url = response.url().clone();
        let body = response
            .bytes()
            .await
            .map_err(|source| Error::BodyRead { source })?;
        debug!(%status, size = body.len(), "Received response");

        if let Err(e) = check_status(status, &body, &ok_codes, &fail_codes) {
            debug!(%status, "Response status rejected");
            return Err(e);
        }

        if let Some(out) = raw_output {
            *out = body.to_vec();
        }

        if let Some(slot) = json_output {
            slot.decode(&body)
                .map_err(|source| Error::Decode { source })?;
        }

        Ok(Response::new(status, response_headers, response_url, body))
    }
}

/// Builds the transport request from method, URL and body.
fn new_request(method: Option<&str>, url: &str, body: Option<Bytes>) -> Result<reqwest::Request> {
    let method = match method {
        None => Method::GET,
        Some("") => return Err(Error::RequestConstruction("empty method".into())),
        Some(m) => Method::from_bytes(m.as_bytes())
            .map_err(|e| Error::RequestConstruction(format!("invalid method {:?}: {}", m, e)))?,
    };

    if url.is_empty() {
        return Err(Error::RequestConstruction("empty url".into()));
    }
    let url = Url::parse(url)
        .map_err(|e| Error::RequestConstruction(format!("invalid url {:?}: {}", url, e)))?;

    let mut request = reqwest::Request::new(method, url);
    *request.body_mut() = body.map(reqwest::Body::from);
    Ok(request)
}

fn header_pair(key: &str, value: &str) -> Result<(HeaderName, HeaderValue)> {
    let name = HeaderName::from_bytes(key.as_bytes())
        .map_err(|e| Error::RequestConstruction(format!("invalid header name {:?}: {}", key, e)))?;
    let value = HeaderValue::from_str(value).map_err(|e| {
        Error::RequestConstruction(format!("invalid value for header {:?}: {}", key, e))
    })?;
    Ok((name, value))
}

/// Appends cookies to the request's `Cookie` header.
fn add_cookies(request: &mut reqwest::Request, cookies: &[Cookie]) -> Result<()> {
    if cookies.is_empty() {
        return Ok(());
    }

    let existing = request
        .headers()
        .get(COOKIE)
        .and_then(|value| value.to_str().ok());
    let joined = cookie_header(existing, cookies);
    let value = HeaderValue::from_str(&joined)
        .map_err(|e| Error::RequestConstruction(format!("invalid cookie {:?}: {}", joined, e)))?;
    request.headers_mut().insert(COOKIE, value);
    Ok(())
}
