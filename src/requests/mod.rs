//! Request plans: building, executing and reading responses.
//!
//! This module provides the [`RequestPlan`] builder and its executor. A plan
//! collects the method, URL, headers, cookies, body, status policy, outputs
//! and extensions of one request, and is consumed by
//! [`RequestPlan::execute`].
//!
//! # Overview
//!
//! - `builder` - The fluent [`RequestPlan`] builder
//! - `config` - Body sources and output targets
//! - `cookie` - Request cookies
//! - `executor` - The execution pipeline behind [`RequestPlan::execute`]
//! - `response` - The buffered [`Response`]
//! - `shortcuts` - `get`, `post` and the other method shortcuts
//!
//! # Examples
//!
//! ## Reading Raw Bytes
//!
//! ```rust,no_run
//! # async fn example() -> Result<(), volley::Error> {
//! let mut raw = Vec::new();
//! volley::get("http://localhost/status")
//!     .response_raw(&mut raw)
//!     .execute()
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Posting a Form
//!
//! ```rust,no_run
//! # async fn example() -> Result<(), volley::Error> {
//! volley::post("http://localhost/login")
//!     .form([("user", "alice"), ("password", "secret")])
//!     .fail_codes([401, 403])
//!     .execute()
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod config;
pub mod cookie;
mod executor;
pub mod response;
pub mod shortcuts;

pub use builder::RequestPlan;
pub use config::{JsonSlot, Output, OutputKind, FORM_CONTENT_TYPE, JSON_CONTENT_TYPE};
pub use cookie::Cookie;
pub use response::Response;
pub use shortcuts::{connect, delete, get, head, options, patch, post, put, requests, trace};
