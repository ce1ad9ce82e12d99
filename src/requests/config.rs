//! Plan data: body sources and output targets.

use std::fmt;

use bytes::Bytes;
use serde::de::DeserializeOwned;

/// Content type of form bodies.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
/// Content type of JSON bodies.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// How a response body is handed back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    /// The raw body bytes.
    Bytes,
    /// The body decoded as JSON.
    Json,
}

type Decoder<'a> = Box<dyn FnOnce(&[u8]) -> Result<(), serde_json::Error> + Send + 'a>;

/// A caller-owned slot the response body is decoded into.
pub struct JsonSlot<'a>(Decoder<'a>);

impl<'a> JsonSlot<'a> {
    /// Creates a slot writing into `out`.
    pub fn new<T>(out: &'a mut T) -> Self
    where
        T: DeserializeOwned + Send,
    {
        Self(Box::new(move |body: &[u8]| {
            *out = serde_json::from_slice(body)?;
            Ok(())
        }))
    }

    pub(crate) fn decode(self, body: &[u8]) -> Result<(), serde_json::Error> {
        (self.0)(body)
    }
}

impl fmt::Debug for JsonSlot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("JsonSlot")
    }
}

/// Destination of a response body, borrowed until execution returns.
///
/// ```rust
/// use volley::Output;
///
/// let mut raw = Vec::new();
/// let output = Output::Bytes(&mut raw);
/// assert_eq!(output.kind(), volley::OutputKind::Bytes);
/// ```
#[derive(Debug)]
pub enum Output<'a> {
    /// Receives the full body.
    Bytes(&'a mut Vec<u8>),
    /// Receives the body decoded as JSON.
    Json(JsonSlot<'a>),
}

impl<'a> Output<'a> {
    /// Creates a JSON output writing into `out`.
    pub fn json<T>(out: &'a mut T) -> Self
    where
        T: DeserializeOwned + Send,
    {
        Output::Json(JsonSlot::new(out))
    }

    /// Gets the decode kind of this output.
    pub fn kind(&self) -> OutputKind {
        match self {
            Output::Bytes(_) => OutputKind::Bytes,
            Output::Json(_) => OutputKind::Json,
        }
    }
}

/// Body sources accumulated by the plan.
///
/// All three may be set; [`Body::resolve`] picks one.
#[derive(Debug, Default)]
pub(crate) struct Body {
    pub(crate) data: Option<(Bytes, Option<String>)>,
    pub(crate) form: Option<Vec<(String, String)>>,
    pub(crate) json: Option<Result<Vec<u8>, serde_json::Error>>,
}

/// The body actually sent, with its content type.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct ResolvedBody {
    pub(crate) bytes: Option<Bytes>,
    pub(crate) content_type: Option<String>,
}

impl Body {
    /// Picks the body to send: form, else JSON, else raw data.
    pub(crate) fn resolve(self) -> Result<ResolvedBody, serde_json::Error> {
        if let Some(mut form) = self.form {
            // Keys are sorted, values keep their order within a key.
            form.sort_by(|a, b| a.0.cmp(&b.0));
            let encoded = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(&form)
                .finish();
            return Ok(ResolvedBody {
                bytes: Some(Bytes::from(encoded)),
                content_type: Some(FORM_CONTENT_TYPE.to_string()),
            });
        }

        if let Some(json) = self.json {
            return Ok(ResolvedBody {
                bytes: Some(Bytes::from(json?)),
                content_type: Some(JSON_CONTENT_TYPE.to_string()),
            });
        }

        Ok(match self.data {
            Some((bytes, content_type)) => ResolvedBody {
                bytes: Some(bytes),
                content_type,
            },
            None => ResolvedBody::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_empty_body() {
        assert_eq!(Body::default().resolve().unwrap(), ResolvedBody::default());
    }

    #[test]
    fn test_raw_body_keeps_content_type() {
        let body = Body {
            data: Some((Bytes::from_static(b"<a/>"), Some("text/xml".into()))),
            ..Body::default()
        };
        let resolved = body.resolve().unwrap();
        assert_eq!(resolved.bytes.as_deref(), Some(&b"<a/>"[..]));
        assert_eq!(resolved.content_type.as_deref(), Some("text/xml"));
    }

    #[test]
    fn test_json_wins_over_raw() {
        let body = Body {
            data: Some((Bytes::from_static(b"raw"), None)),
            json: Some(serde_json::to_vec(&serde_json::json!({"a": 1}))),
            ..Body::default()
        };
        let resolved = body.resolve().unwrap();
        assert_eq!(resolved.bytes.as_deref(), Some(&br#"{"a":1}"#[..]));
        assert_eq!(resolved.content_type.as_deref(), Some(JSON_CONTENT_TYPE));
    }

    #[test]
    fn test_form_wins_over_json_and_skips_its_error() {
        let mut bad = HashMap::new();
        bad.insert((1, 2), "tuple keys are not valid json");

        let body = Body {
            form: Some(pairs(&[("title", "A book"), ("id", "7")])),
            json: Some(serde_json::to_vec(&bad)),
            ..Body::default()
        };
        let resolved = body.resolve().unwrap();
        assert_eq!(resolved.bytes.as_deref(), Some(&b"id=7&title=A+book"[..]));
        assert_eq!(resolved.content_type.as_deref(), Some(FORM_CONTENT_TYPE));
    }

    #[test]
    fn test_form_keeps_value_order_within_key() {
        let body = Body {
            form: Some(pairs(&[("tag", "b"), ("a", "1"), ("tag", "a")])),
            ..Body::default()
        };
        let resolved = body.resolve().unwrap();
        assert_eq!(resolved.bytes.as_deref(), Some(&b"a=1&tag=b&tag=a"[..]));
    }

    #[test]
    fn test_json_encode_failure_surfaces() {
        let mut bad = HashMap::new();
        bad.insert((1, 2), "x");
        let body = Body {
            json: Some(serde_json::to_vec(&bad)),
            ..Body::default()
        };
        assert!(body.resolve().is_err());
    }

    #[test]
    fn test_json_slot_decodes() {
        let mut out: HashMap<String, bool> = HashMap::new();
        JsonSlot::new(&mut out)
            .decode(br#"{"success":true}"#)
            .unwrap();
        assert_eq!(out.get("success"), Some(&true));
    }
}
