//! Repeatable "array" fields.
//!
//! Every item of an array field carries a row token (`id`) that identifies it
//! across edits. Tokens are assigned when an item is appended and are never
//! handed out again, so they are safe to use as render keys.

use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Stable identity token of an array item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(String);

impl RowId {
    /// Generates a fresh, time-ordered token.
    pub fn generate() -> Self {
        Self(Uuid::now_v7().simple().to_string())
    }

    /// Returns the token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RowId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One item of an array field together with its row token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row<T> {
    /// Row token; absent on content that was never saved by the CMS.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RowId>,
    /// Item fields.
    #[serde(flatten)]
    pub item: T,
}

impl<T> Row<T> {
    /// Returns a key suitable for keyed rendering, falling back to `index`.
    pub fn render_key(&self, index: usize) -> String {
        self.id
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| format!("row-{index}"))
    }
}

impl<T> Deref for Row<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.item
    }
}

/// Ordered list of rows of an array field.
///
/// Deserializes from a JSON array, `null` or a missing field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Rows<T> {
    rows: Vec<Row<T>>,
}

impl<T> Default for Rows<T> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

impl<'de, T> Deserialize<'de> for Rows<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let rows = Option::<Vec<Row<T>>>::deserialize(deserializer)?.unwrap_or_default();
        Ok(Self { rows })
    }
}

impl<T> FromIterator<T> for Rows<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut rows = Self::default();
        for item in iter {
            rows.push(item);
        }
        rows
    }
}

impl<T> Rows<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an item and returns the token assigned to it.
    pub fn push(&mut self, item: T) -> RowId {
        let id = RowId::generate();
        self.rows.push(Row {
            id: Some(id.clone()),
            item,
        });
        id
    }

    /// Removes the item with the given token.
    pub fn remove(&mut self, id: &RowId) -> Option<T> {
        let index = self
            .rows
            .iter()
            .position(|row| row.id.as_ref() == Some(id))?;
        Some(self.rows.remove(index).item)
    }

    /// Looks up an item by its token.
    pub fn get(&self, id: &RowId) -> Option<&T> {
        self.rows
            .iter()
            .find(|row| row.id.as_ref() == Some(id))
            .map(|row| &row.item)
    }

    /// Iterates over the rows, tokens included.
    pub fn rows(&self) -> std::slice::Iter<'_, Row<T>> {
        self.rows.iter()
    }

    /// Iterates over the items.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.rows.iter().map(|row| &row.item)
    }

    /// Returns the first item.
    pub fn first(&self) -> Option<&T> {
        self.rows.first().map(|row| &row.item)
    }

    /// Returns the number of items.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if there are no items.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<'a, T> IntoIterator for &'a Rows<T> {
    type Item = &'a Row<T>;
    type IntoIter = std::slice::Iter<'a, Row<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Skill {
        skill: String,
    }

    fn skill(name: &str) -> Skill {
        Skill {
            skill: name.to_owned(),
        }
    }

    #[test]
    fn test_deserialize_shapes() {
        let rows: Rows<Skill> =
            serde_json::from_value(json!([{ "id": "a1", "skill": "Rust" }, { "skill": "Go" }]))
                .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows.get(&RowId::from("a1")), Some(&skill("Rust")));

        let keys: Vec<_> = rows.rows().enumerate().map(|(i, r)| r.render_key(i)).collect();
        assert_eq!(keys, vec!["a1".to_string(), "row-1".to_string()]);

        let empty: Rows<Skill> = serde_json::from_value(Value::Null).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_push_assigns_unique_tokens() {
        let mut rows = Rows::new();
        let first = rows.push(skill("Rust"));
        let second = rows.push(skill("Go"));

        assert_ne!(first, second);
        assert_eq!(rows.get(&second), Some(&skill("Go")));
    }

    #[test]
    fn test_tokens_are_not_reused_after_removal() {
        let mut rows = Rows::new();
        let removed = rows.push(skill("Rust"));
        assert_eq!(rows.remove(&removed), Some(skill("Rust")));
        assert!(rows.remove(&removed).is_none());

        let next = rows.push(skill("Rust"));
        assert_ne!(removed, next);
        assert!(rows.get(&removed).is_none());
    }

    #[test]
    fn test_serialize_round_trip_keeps_tokens() {
        let rows: Rows<Skill> = ["Rust", "Go"].into_iter().map(skill).collect();
        let value = serde_json::to_value(&rows).unwrap();

        assert_eq!(value.as_array().map(Vec::len), Some(2));
        assert!(value[0]["id"].is_string());
        assert_eq!(value[1]["skill"], "Go");
    }
}
