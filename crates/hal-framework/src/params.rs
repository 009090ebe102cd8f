//! # Resource Parameters
//!
//! Producers receive their parameters as a [`Params`] map keyed by placeholder name.
//! Callers that address a resource (the routing layer, or an [`Embedded`](crate::Embedded)
//! declaration) bind those parameters with a [`Binding`]: either positionally, in the
//! order the placeholders appear in the target's URL template, or by name.

use crate::error::{HalError, HalResult};
use std::collections::BTreeMap;

/// Named string parameters handed to resource producers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Inserts a value, replacing any previous value for `name`.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Like [`get`](Self::get), but a missing parameter is an error.
    ///
    /// Producers use this for the placeholders of their own template:
    ///
    /// ```rust
    /// use hal_framework::{Params, ProducerResult};
    ///
    /// fn lookup(params: &Params) -> ProducerResult<String> {
    ///     let todo = params.require("todo")?;
    ///     Ok(todo.to_uppercase())
    /// }
    ///
    /// assert_eq!(lookup(&Params::new().with("todo", "todo1")).unwrap(), "TODO1");
    /// assert!(lookup(&Params::new()).is_err());
    /// ```
    pub fn require(&self, name: &str) -> HalResult<&str> {
        self.get(name)
            .ok_or_else(|| HalError::MissingParameter(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for Params {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

/// How a caller binds parameters to a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    /// Values matched against the target template's placeholders, in declaration order.
    Positional(Vec<String>),
    /// Values passed through by placeholder name.
    Named(Params),
}

impl Binding {
    pub fn positional<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Binding::Positional(values.into_iter().map(Into::into).collect())
    }

    pub fn named(params: impl Into<Params>) -> Self {
        Binding::Named(params.into())
    }

    /// A binding with no parameters, for resources whose template has no placeholders.
    pub fn empty() -> Self {
        Binding::Named(Params::new())
    }
}

impl From<Params> for Binding {
    fn from(params: Params) -> Self {
        Binding::Named(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_reports_missing_name() {
        let params = Params::new().with("todo", "todo1");
        assert_eq!(params.require("todo").unwrap(), "todo1");
        let err = params.require("list").unwrap_err();
        assert!(matches!(err, HalError::MissingParameter(name) if name == "list"));
    }

    #[test]
    fn test_insert_overwrites() {
        let mut params = Params::from([("todo", "a")]);
        params.insert("todo", "b");
        assert_eq!(params.get("todo"), Some("b"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_binding_constructors() {
        assert_eq!(
            Binding::positional(["todo1"]),
            Binding::Positional(vec!["todo1".to_string()])
        );
        assert_eq!(
            Binding::named([("todo", "todo1")]),
            Binding::Named(Params::new().with("todo", "todo1"))
        );
    }
}
