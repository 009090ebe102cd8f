//! # Render Parameters
//!
//! Clients steer rendering with two query parameters:
//!
//! - `embed`: how many levels of `_embedded` resources to expand. A non-negative
//!   integer is taken literally; otherwise the value is read as a boolean token, where
//!   a truthy token means "unbounded" and anything else means `0`.
//! - `links`: whether `_links` are rendered, read as a boolean token. Absent means `false`.
//!
//! Truthy tokens are `true`, `yes`, `1`, `t` and `y`, compared case-insensitively.

use std::fmt;
use url::form_urlencoded;

/// Remaining embedding budget. `None` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbedDepth(Option<u32>);

impl Default for EmbedDepth {
    fn default() -> Self {
        EmbedDepth::NONE
    }
}

impl EmbedDepth {
    /// Embed nothing.
    pub const NONE: EmbedDepth = EmbedDepth(Some(0));

    /// Recurse until no further embeddings exist.
    ///
    /// Against a cyclic embedding graph this only terminates because of the
    /// registry's nesting limit (see [`HalConfig`](crate::HalConfig)).
    pub const UNBOUNDED: EmbedDepth = EmbedDepth(None);

    pub fn levels(levels: u32) -> Self {
        EmbedDepth(Some(levels))
    }

    pub fn get(self) -> Option<u32> {
        self.0
    }

    pub fn is_unbounded(self) -> bool {
        self.0.is_none()
    }

    /// True while at least one more level may be expanded.
    pub fn allows_embedding(self) -> bool {
        self.0 != Some(0)
    }

    /// The budget handed to embedded resources one level down.
    pub fn decremented(self) -> Self {
        EmbedDepth(self.0.map(|levels| levels.saturating_sub(1)))
    }
}

impl fmt::Display for EmbedDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(levels) => write!(f, "{levels}"),
            None => f.write_str("unbounded"),
        }
    }
}

/// Per-request rendering options, fixed for the duration of one render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderParameters {
    pub embed: EmbedDepth,
    pub include_links: bool,
}

impl RenderParameters {
    pub fn new(embed: EmbedDepth, include_links: bool) -> Self {
        Self {
            embed,
            include_links,
        }
    }

    /// Interprets raw `embed` / `links` query values.
    pub fn from_query(embed: Option<&str>, links: Option<&str>) -> Self {
        let embed = match embed {
            Some(raw) if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) => {
                // Digit strings too long for u32 are as good as unbounded.
                raw.parse().map(EmbedDepth::levels).unwrap_or(EmbedDepth::UNBOUNDED)
            }
            other if is_truthy(other) => EmbedDepth::UNBOUNDED,
            _ => EmbedDepth::NONE,
        };
        Self {
            embed,
            include_links: is_truthy(links),
        }
    }
}

/// Raw `embed` and `links` values as they arrived on the request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderQuery {
    pub embed: Option<String>,
    pub links: Option<String>,
}

impl RenderQuery {
    pub fn new(embed: Option<&str>, links: Option<&str>) -> Self {
        Self {
            embed: embed.map(str::to_string),
            links: links.map(str::to_string),
        }
    }

    /// Picks `embed` and `links` out of a raw query string such as `embed=1&links=yes`.
    ///
    /// Keys and values are percent-decoded, `+` is read as a space, and the last
    /// occurrence of a key wins. Other keys are ignored.
    pub fn from_query_string(query: &str) -> Self {
        form_urlencoded::parse(query.trim_start_matches('?').as_bytes()).fold(
            Self::default(),
            |mut parsed, (key, value)| {
                match &*key {
                    "embed" => parsed.embed = Some(value.into_owned()),
                    "links" => parsed.links = Some(value.into_owned()),
                    _ => {}
                }
                parsed
            },
        )
    }

    pub fn parameters(&self) -> RenderParameters {
        RenderParameters::from_query(self.embed.as_deref(), self.links.as_deref())
    }
}

/// Whether a raw value is one of the accepted truthy tokens.
pub fn is_truthy(value: Option<&str>) -> bool {
    value.is_some_and(|v| {
        ["true", "yes", "1", "t", "y"]
            .iter()
            .any(|token| v.eq_ignore_ascii_case(token))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embed_integer_depth() {
        let params = RenderParameters::from_query(Some("2"), None);
        assert_eq!(params.embed, EmbedDepth::levels(2));
        assert_eq!(params.embed.get(), Some(2));
        assert!(!params.include_links);
    }

    #[test]
    fn test_embed_boolean_tokens() {
        for token in ["true", "YES", "t", "Y"] {
            let params = RenderParameters::from_query(Some(token), None);
            assert!(params.embed.is_unbounded(), "{token} should be unbounded");
        }
        for token in ["false", "no", "-1", "2.5", ""] {
            let params = RenderParameters::from_query(Some(token), None);
            assert_eq!(params.embed, EmbedDepth::NONE, "{token} should embed nothing");
        }
        assert_eq!(RenderParameters::from_query(None, None).embed, EmbedDepth::NONE);
    }

    #[test]
    fn test_one_is_a_depth_not_a_token() {
        assert_eq!(
            RenderParameters::from_query(Some("1"), None).embed,
            EmbedDepth::levels(1)
        );
    }

    #[test]
    fn test_huge_depth_is_unbounded() {
        let params = RenderParameters::from_query(Some("99999999999999999999"), None);
        assert!(params.embed.is_unbounded());
        assert_eq!(params.embed.get(), None);
    }

    #[test]
    fn test_links_tokens() {
        assert!(RenderParameters::from_query(None, Some("True")).include_links);
        assert!(RenderParameters::from_query(None, Some("1")).include_links);
        assert!(!RenderParameters::from_query(None, Some("on")).include_links);
        assert!(!RenderParameters::from_query(None, None).include_links);
    }

    #[test]
    fn test_depth_decrement() {
        assert_eq!(EmbedDepth::levels(2).decremented(), EmbedDepth::levels(1));
        assert_eq!(EmbedDepth::NONE.decremented(), EmbedDepth::NONE);
        assert_eq!(EmbedDepth::UNBOUNDED.decremented(), EmbedDepth::UNBOUNDED);
        assert!(!EmbedDepth::levels(1).decremented().allows_embedding());
    }

    #[test]
    fn test_query_string_parsing() {
        let query = RenderQuery::from_query_string("?embed=1&page=3&links=y%65s&embed=2");
        assert_eq!(query.embed.as_deref(), Some("2"));
        assert_eq!(query.links.as_deref(), Some("yes"));
        assert_eq!(
            query.parameters(),
            RenderParameters::new(EmbedDepth::levels(2), true)
        );
        assert_eq!(RenderQuery::from_query_string(""), RenderQuery::default());

        let spaced = RenderQuery::from_query_string("links=+yes&embed");
        assert_eq!(spaced.links.as_deref(), Some(" yes"));
        assert_eq!(spaced.embed.as_deref(), Some(""));
        assert_eq!(spaced.parameters(), RenderParameters::default());
    }
}
