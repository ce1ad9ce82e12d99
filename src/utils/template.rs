//! Runtime URL templating.
//!
//! Templates use `{}` placeholders filled positionally, with `{{` and `}}`
//! as escapes for literal braces. Nothing is percent-encoded: the caller is
//! responsible for producing a valid URL.

use std::fmt::{Display, Write};

/// Fills the `{}` placeholders of `template` with `args`, in order.
///
/// Fails when the number of placeholders and arguments differ, or when a
/// brace is neither a placeholder nor an escape.
///
/// # Example
///
/// ```rust
/// use volley::utils::format_template;
///
/// let url = format_template("http://localhost/users/{}/posts/{}", &[&42, &"draft"]);
/// assert_eq!(url.unwrap(), "http://localhost/users/42/posts/draft");
/// ```
pub fn format_template(template: &str, args: &[&dyn Display]) -> Result<String, String> {
    let mut out = String::with_capacity(template.len());
    let mut args = args.iter();
    let mut chars = template.chars().peekable();
    let mut position = 0;

    while let Some(c) = chars.next() {
        let next = chars.peek().copied();
        match (c, next) {
            ('{', Some('{')) | ('}', Some('}')) => {
                out.push(c);
                chars.next();
            }
            ('{', Some('}')) => {
                chars.next();
                let arg = args.next().ok_or_else(|| {
                    format!("missing argument for placeholder {} in {:?}", position, template)
                })?;
                write!(out, "{}", arg).map_err(|e| e.to_string())?;
                position += 1;
            }
            ('{', _) | ('}', _) => {
                return Err(format!("unmatched brace in {:?}", template));
            }
            _ => out.push(c),
        }
    }

    let extra = args.count();
    if extra > 0 {
        return Err(format!(
            "{} extra argument(s) for {} placeholder(s) in {:?}",
            extra, position, template
        ));
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_placeholders() {
        assert_eq!(
            format_template("http://localhost/path/", &[]).unwrap(),
            "http://localhost/path/"
        );
    }

    #[test]
    fn test_positional_substitution() {
        let url = format_template("http://{}:{}/{}", &[&"host", &8000, &"path"]).unwrap();
        assert_eq!(url, "http://host:8000/path");
    }

    #[test]
    fn test_escaped_braces() {
        let url = format_template("http://h/{{id}}/{}", &[&1]).unwrap();
        assert_eq!(url, "http://h/{id}/1");
    }

    #[test]
    fn test_values_are_not_escaped() {
        let url = format_template("http://h/?q={}", &[&"a b&c"]).unwrap();
        assert_eq!(url, "http://h/?q=a b&c");
    }

    #[test]
    fn test_missing_argument() {
        let err = format_template("http://h/{}/{}", &[&1]).unwrap_err();
        assert!(err.contains("missing argument"));
    }

    #[test]
    fn test_extra_argument() {
        let err = format_template("http://h/{}", &[&1, &2]).unwrap_err();
        assert!(err.contains("extra argument"));
    }

    #[test]
    fn test_unmatched_brace() {
        assert!(format_template("http://h/{id}", &[]).is_err());
        assert!(format_template("http://h/}", &[]).is_err());
    }
}
