//! Position of a field inside the response tree.
//!
//! A [`FieldPath`] is a reverse linked list: every node owns its key and points
//! at its parent node. Separate resolver invocations build separate nodes for
//! the same position, so equality is structural over the whole chain and never
//! based on pointer identity.

use std::{
    fmt::{self, Display, Formatter},
    sync::Arc,
};

#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(untagged)]
pub enum PathKey {
    Field(String),
    Index(usize),
}

impl PathKey {
    pub fn as_field(&self) -> Option<&str> {
        match self {
            PathKey::Field(name) => Some(name),
            PathKey::Index(_) => None,
        }
    }
}

impl Display for PathKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PathKey::Field(name) => write!(f, "{name}"),
            PathKey::Index(idx) => write!(f, "{idx}"),
        }
    }
}

impl From<&str> for PathKey {
    fn from(name: &str) -> Self {
        PathKey::Field(name.to_string())
    }
}

impl From<String> for PathKey {
    fn from(name: String) -> Self {
        PathKey::Field(name)
    }
}

impl From<usize> for PathKey {
    fn from(idx: usize) -> Self {
        PathKey::Index(idx)
    }
}

/// Serializes like graphql-js `ResponsePath`: `{ "key": .., "prev": .. }`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize)]
pub struct FieldPath {
    key: PathKey,
    prev: Option<Arc<FieldPath>>,
}

impl FieldPath {
    pub fn root(key: impl Into<PathKey>) -> Self {
        Self {
            key: key.into(),
            prev: None,
        }
    }

    #[must_use]
    pub fn child(&self, key: impl Into<PathKey>) -> Self {
        Self {
            key: key.into(),
            prev: Some(Arc::new(self.clone())),
        }
    }

    pub fn key(&self) -> &PathKey {
        &self.key
    }

    pub fn prev(&self) -> Option<&FieldPath> {
        self.prev.as_deref()
    }

    /// Both paths hang below the same parent node, compared structurally.
    pub fn is_sibling_of(&self, other: &FieldPath) -> bool {
        self.prev == other.prev
    }

    /// Iterate from this node up to the root.
    pub fn ancestors(&self) -> Ancestors<'_> {
        Ancestors(Some(self))
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut keys = self.ancestors().map(FieldPath::key).collect::<Vec<_>>();
        keys.reverse();

        for (i, key) in keys.into_iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{key}")?;
        }

        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Ancestors<'a>(Option<&'a FieldPath>);

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a FieldPath;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.0?;
        self.0 = current.prev();
        Some(current)
    }
}
