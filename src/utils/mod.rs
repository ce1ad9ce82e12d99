//! Shared utility functions.
//!
//! This module contains the helpers used by the request builder and the
//! executor:
//!
//! - [`template`] - Runtime `{}` URL templating
//! - [`status`] - Status code policy and error body snippets

pub mod status;
pub mod template;

pub use status::{body_snippet, check_status, SNIPPET_LEN};
pub use template::format_template;
