//! Equality filters over document fields.

use std::fmt;

use serde_json::Value;

/// One `field == value` condition. `field` may be a dotted path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub field: String,
    pub value: String,
}

impl Condition {
    /// Returns the `where[<field>][equals]` query key.
    pub fn query_key(&self) -> String {
        format!("where[{}][equals]", self.field)
    }

    /// Returns true if `document` holds `value` at `field`.
    ///
    /// Strings compare verbatim; numbers and booleans by their JSON text.
    pub fn matches(&self, document: &Value) -> bool {
        let found = self
            .field
            .split('.')
            .try_fold(document, |value, segment| value.get(segment));

        match found {
            Some(Value::String(text)) => *text == self.value,
            Some(value @ (Value::Bool(_) | Value::Number(_))) => value.to_string() == self.value,
            _ => false,
        }
    }
}

/// Conjunction of equality conditions. The empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    conditions: Vec<Condition>,
}

impl Filter {
    /// Creates a filter that matches every document.
    pub fn all() -> Self {
        Self::default()
    }

    /// Creates a filter with a single condition.
    pub fn equals(field: impl Into<String>, value: impl ToString) -> Self {
        Self::all().and(field, value)
    }

    /// Adds a condition.
    pub fn and(mut self, field: impl Into<String>, value: impl ToString) -> Self {
        self.conditions.push(Condition {
            field: field.into(),
            value: value.to_string(),
        });
        self
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Returns true if `document` satisfies every condition.
    pub fn matches(&self, document: &Value) -> bool {
        self.conditions
            .iter()
            .all(|condition| condition.matches(document))
    }

    /// Renders the filter as REST query pairs.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.conditions
            .iter()
            .map(|condition| (condition.query_key(), condition.value.clone()))
            .collect()
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.conditions.is_empty() {
            return f.write_str("*");
        }

        for (index, condition) in self.conditions.iter().enumerate() {
            if index > 0 {
                f.write_str(" && ")?;
            }
            write!(f, "{}={}", condition.field, condition.value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_query_pairs() {
        let filter = Filter::equals("pageSettings.isHomePage", true);
        assert_eq!(filter.query_pairs(), vec![(
            "where[pageSettings.isHomePage][equals]".to_owned(),
            "true".to_owned()
        )]);
        assert_eq!(filter.to_string(), "pageSettings.isHomePage=true");
        assert_eq!(Filter::all().to_string(), "*");
    }

    #[test]
    fn test_matching() {
        let document = json!({ "slug": "about", "pageSettings": { "isHomePage": false }, "id": 3 });

        assert!(Filter::all().matches(&document));
        assert!(Filter::equals("slug", "about").matches(&document));
        assert!(Filter::equals("id", 3).matches(&document));
        assert!(Filter::equals("pageSettings.isHomePage", false).matches(&document));
        assert!(!Filter::equals("pageSettings.isHomePage", true).matches(&document));
        assert!(!Filter::equals("slug", "about").and("id", 4).matches(&document));
        assert!(!Filter::equals("missing.path", "x").matches(&document));
    }
}
