//! # Links
//!
//! A [`Link`] is one relation in a document's `_links` map. It carries any number of
//! targets, each an href plus extra attributes such as `title`:
//!
//! ```rust
//! use hal_framework::{Link, LinkTarget};
//! use serde_json::json;
//!
//! let collection = Link::new("collection").href("/todos");
//! assert_eq!(collection.value(), Some(json!({"href": "/todos"})));
//!
//! let items = Link::new("items")
//!     .target(LinkTarget::new("/todos/todo1").attr("title", "todo1"))
//!     .target(LinkTarget::new("/todos/todo2").attr("title", "todo2"));
//! assert_eq!(
//!     items.value(),
//!     Some(json!([
//!         {"href": "/todos/todo1", "title": "todo1"},
//!         {"href": "/todos/todo2", "title": "todo2"},
//!     ]))
//! );
//! ```
//!
//! A link with no targets renders as nothing at all, one target renders as an object
//! and two or more render as an array. [`Link::always_as_list`] forces the array form
//! whenever there is at least one target.

use crate::template::encode_href;
use serde_json::{Map, Value};

/// One target of a link: an href and its extra attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTarget {
    href: String,
    attributes: Vec<(String, String)>,
}

impl LinkTarget {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            attributes: Vec::new(),
        }
    }

    /// Adds an extra attribute rendered next to `href`.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn href(&self) -> &str {
        &self.href
    }

    fn to_value(&self, encode: bool) -> Value {
        let href = if encode {
            encode_href(&self.href)
        } else {
            self.href.clone()
        };
        let mut object = Map::new();
        object.insert("href".to_string(), Value::String(href));
        // Attributes are applied after href and may override it.
        for (name, value) in &self.attributes {
            object.insert(name.clone(), Value::String(value.clone()));
        }
        Value::Object(object)
    }
}

impl From<&str> for LinkTarget {
    fn from(href: &str) -> Self {
        LinkTarget::new(href)
    }
}

impl From<String> for LinkTarget {
    fn from(href: String) -> Self {
        LinkTarget::new(href)
    }
}

/// A relation name and its targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    rel: String,
    targets: Vec<LinkTarget>,
    always_as_list: bool,
    encode: bool,
}

impl Link {
    /// A link whose hrefs are percent-encoded when rendered.
    pub fn new(rel: impl Into<String>) -> Self {
        Self {
            rel: rel.into(),
            targets: Vec::new(),
            always_as_list: false,
            encode: true,
        }
    }

    /// A link whose hrefs are used verbatim, for hrefs that are already encoded.
    pub fn unencoded(rel: impl Into<String>) -> Self {
        Self {
            encode: false,
            ..Self::new(rel)
        }
    }

    pub fn href(self, href: impl Into<String>) -> Self {
        self.target(LinkTarget::new(href))
    }

    pub fn target(mut self, target: impl Into<LinkTarget>) -> Self {
        self.targets.push(target.into());
        self
    }

    pub fn targets<I, T>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<LinkTarget>,
    {
        self.targets.extend(targets.into_iter().map(Into::into));
        self
    }

    pub fn always_as_list(mut self) -> Self {
        self.always_as_list = true;
        self
    }

    pub fn rel(&self) -> &str {
        &self.rel
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// The rendered value, or `None` when the link has no targets.
    pub fn value(&self) -> Option<Value> {
        let mut rendered = self.targets.iter().map(|t| t.to_value(self.encode));
        match self.targets.len() {
            0 => None,
            1 if !self.always_as_list => rendered.next(),
            _ => Some(Value::Array(rendered.collect())),
        }
    }
}
