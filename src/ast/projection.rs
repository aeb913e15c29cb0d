use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::ast::Expr;

/// Ordered name-to-expression map describing the selected output fields.
///
/// Keys are unique and iterate in first-occurrence order. Inserting an
/// existing key overwrites the value in place without moving the key, so
/// `a, b AS a` collapses to a single entry holding `b`'s expression at
/// `a`'s original position.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Projection {
    entries: Vec<(String, Expr)>,
}

impl Projection {
    pub fn new() -> Self {
        Projection { entries: vec![] }
    }

    /// Insert a field, updating in place on key collision.
    pub fn insert(&mut self, key: String, expr: Expr) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, value)) => *value = expr,
            None => self.entries.push((key, expr)),
        }
    }

    /// Look up a field expression by name.
    pub fn get(&self, key: &str) -> Option<&Expr> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterate entries in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Expr)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate keys in first-occurrence order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// Serialized as a map so the JSON rendering preserves field order.
impl Serialize for Projection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, expr) in &self.entries {
            map.serialize_entry(key, expr)?;
        }
        map.end()
    }
}
