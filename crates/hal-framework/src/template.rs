//! # URL Templates
//!
//! A resource is registered under a URL template such as `/todos/<todo>` or
//! `/files/<path:name>`. Placeholders are written `<[converter:]name>`; the converter
//! prefix belongs to the routing layer and is ignored here.
//!
//! [`UrlTemplate`] does three things with a template:
//!
//! 1. Lists the placeholder names in declaration order, so positional parameters can
//!    be paired with them ([`UrlTemplate::merge`]).
//! 2. Re-decodes `%2F` in inbound parameter values. The HTTP server decodes every
//!    percent-escape in the path except `%2F`, which it leaves alone so the path does
//!    not gain separators. Placeholder values therefore arrive with `%2F` still in
//!    them and have to be finished here.
//! 3. Substitutes bound values back into the template ([`UrlTemplate::resolve`]),
//!    percent-encoding each value as a single path segment, `/` included.
//!
//! Only inbound values get the `%2F` fix-up; outbound hrefs are encoded exactly once.

use crate::error::{HalError, HalResult};
use crate::params::Params;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;
use std::borrow::Cow;
use std::fmt;
use std::sync::OnceLock;

/// Characters escaped inside a single path segment. Everything but `A-Z a-z 0-9 - . _ ~`.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Characters escaped in a complete href, which keeps its `/` separators.
const HREF: &AsciiSet = &PATH_SEGMENT.remove(b'/');

fn placeholder_re() -> &'static Regex {
    static PLACEHOLDER_RE: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER_RE
        .get_or_init(|| Regex::new(r"<(?:[^:>]*:)?([^>]*)>").expect("Invalid regex constant"))
}

fn encoded_slash_re() -> &'static Regex {
    static ENCODED_SLASH_RE: OnceLock<Regex> = OnceLock::new();
    ENCODED_SLASH_RE.get_or_init(|| Regex::new(r"(?i)%2F").expect("Invalid regex constant"))
}

/// A parsed URL template with its placeholder names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTemplate {
    raw: String,
    placeholders: Vec<String>,
}

impl UrlTemplate {
    /// Parses a template, rejecting unbalanced or nested brackets, empty names and
    /// names used twice.
    pub fn parse(raw: &str) -> HalResult<Self> {
        let malformed = |reason: &str| HalError::MalformedTemplate {
            template: raw.to_string(),
            reason: reason.to_string(),
        };

        let mut open = false;
        for c in raw.chars() {
            match (c, open) {
                ('<', true) => return Err(malformed("nested '<'")),
                ('>', false) => return Err(malformed("'>' without matching '<'")),
                ('<', false) => open = true,
                ('>', true) => open = false,
                _ => {}
            }
        }
        if open {
            return Err(malformed("unterminated placeholder"));
        }

        let mut placeholders: Vec<String> = Vec::new();
        for captures in placeholder_re().captures_iter(raw) {
            let name = captures[1].to_string();
            if name.is_empty() {
                return Err(malformed("empty placeholder name"));
            }
            if placeholders.contains(&name) {
                return Err(malformed(&format!("placeholder '{name}' used twice")));
            }
            placeholders.push(name);
        }

        Ok(Self {
            raw: raw.to_string(),
            placeholders,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Placeholder names in declaration order.
    pub fn placeholders(&self) -> &[String] {
        &self.placeholders
    }

    /// Merges positional and named parameters into one map.
    ///
    /// Positional values pair with the placeholders in order; named values are laid on
    /// top and win on conflict. Every placeholder must end up bound, and every
    /// placeholder value has `%2F` re-decoded into `/`.
    pub fn merge(&self, positional: &[String], named: &Params) -> HalResult<Params> {
        if positional.len() > self.placeholders.len() {
            return Err(self.arity_mismatch(positional.len()));
        }

        let mut merged: Params = self
            .placeholders
            .iter()
            .zip(positional)
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        for (name, value) in named.iter() {
            merged.insert(name, value);
        }

        for name in &self.placeholders {
            let decoded = match merged.get(name) {
                Some(value) => decode_path_separators(value).into_owned(),
                None if !positional.is_empty() => {
                    return Err(self.arity_mismatch(positional.len()))
                }
                None => return Err(HalError::MissingParameter(name.clone())),
            };
            merged.insert(name.as_str(), decoded);
        }
        Ok(merged)
    }

    /// Substitutes every placeholder with its percent-encoded value.
    pub fn resolve(&self, params: &Params) -> HalResult<String> {
        if let Some(missing) = self.placeholders.iter().find(|name| !params.contains(name)) {
            return Err(HalError::MissingParameter(missing.clone()));
        }
        let resolved = placeholder_re().replace_all(&self.raw, |captures: &regex::Captures| {
            let value = params.get(&captures[1]).unwrap_or_default();
            utf8_percent_encode(value, PATH_SEGMENT).to_string()
        });
        Ok(resolved.into_owned())
    }

    fn arity_mismatch(&self, actual: usize) -> HalError {
        HalError::ArityMismatch {
            template: self.raw.clone(),
            expected: self.placeholders.len(),
            actual,
        }
    }
}

impl fmt::Display for UrlTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Turns any `%2F` (either case) left in an inbound value into `/`.
pub fn decode_path_separators(value: &str) -> Cow<'_, str> {
    encoded_slash_re().replace_all(value, "/")
}

/// Percent-encodes a full href, keeping `/` as a separator.
pub(crate) fn encode_href(href: &str) -> String {
    utf8_percent_encode(href, HREF).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders_in_declaration_order() {
        let template = UrlTemplate::parse("/lists/<int:list>/todos/<todo>").unwrap();
        assert_eq!(template.placeholders(), ["list", "todo"]);
    }

    #[test]
    fn test_template_without_placeholders_resolves_to_itself() {
        let template = UrlTemplate::parse("/todos").unwrap();
        assert!(template.placeholders().is_empty());
        assert_eq!(template.resolve(&Params::new()).unwrap(), "/todos");
    }

    #[test]
    fn test_malformed_templates_are_rejected() {
        for raw in ["/todos/<todo", "/todos/todo>", "/<a<b>>", "/todos/<>", "/<a>/<int:a>"] {
            let err = UrlTemplate::parse(raw).unwrap_err();
            assert!(
                matches!(err, HalError::MalformedTemplate { .. }),
                "{raw} should be malformed"
            );
        }
    }

    #[test]
    fn test_resolve_encodes_slash_and_reserved_characters() {
        let template = UrlTemplate::parse("/files/<path:name>").unwrap();
        let params = Params::new().with("name", "docs/read me?.md");
        assert_eq!(
            template.resolve(&params).unwrap(),
            "/files/docs%2Fread%20me%3F.md"
        );
    }

    #[test]
    fn test_resolve_reports_missing_placeholder() {
        let template = UrlTemplate::parse("/todos/<todo>").unwrap();
        let err = template.resolve(&Params::new()).unwrap_err();
        assert!(matches!(err, HalError::MissingParameter(name) if name == "todo"));
    }

    #[test]
    fn test_merge_pairs_positional_and_overlays_named() {
        let template = UrlTemplate::parse("/lists/<list>/todos/<todo>").unwrap();
        let merged = template
            .merge(
                &["groceries".to_string(), "milk".to_string()],
                &Params::new().with("todo", "eggs").with("extra", "1"),
            )
            .unwrap();
        assert_eq!(merged.get("list"), Some("groceries"));
        assert_eq!(merged.get("todo"), Some("eggs"));
        assert_eq!(merged.get("extra"), Some("1"));
    }

    #[test]
    fn test_merge_redecodes_encoded_slashes_in_placeholders_only() {
        let template = UrlTemplate::parse("/files/<path:name>").unwrap();
        let merged = template
            .merge(
                &[],
                &Params::new().with("name", "a%2Fb%2fc").with("q", "x%2Fy"),
            )
            .unwrap();
        assert_eq!(merged.get("name"), Some("a/b/c"));
        assert_eq!(merged.get("q"), Some("x%2Fy"));
    }

    #[test]
    fn test_merge_arity_mismatch() {
        let template = UrlTemplate::parse("/todos/<todo>").unwrap();
        let too_many = template
            .merge(&["a".to_string(), "b".to_string()], &Params::new())
            .unwrap_err();
        assert!(matches!(
            too_many,
            HalError::ArityMismatch { expected: 1, actual: 2, .. }
        ));

        let two = UrlTemplate::parse("/lists/<list>/todos/<todo>").unwrap();
        let too_few = two.merge(&["a".to_string()], &Params::new()).unwrap_err();
        assert!(matches!(
            too_few,
            HalError::ArityMismatch { expected: 2, actual: 1, .. }
        ));
    }

    #[test]
    fn test_slash_round_trip_is_not_double_processed() {
        // Inbound "a%2Fb" decodes to "a/b"; the self href encodes it back exactly once.
        let template = UrlTemplate::parse("/files/<name>").unwrap();
        let merged = template
            .merge(&[], &Params::new().with("name", "a%2Fb"))
            .unwrap();
        assert_eq!(template.resolve(&merged).unwrap(), "/files/a%2Fb");
    }

    #[test]
    fn test_encode_href_keeps_separators() {
        assert_eq!(encode_href("/todos/to do"), "/todos/to%20do");
    }
}
