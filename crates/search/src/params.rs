//! Ordered request-body parameters.
//!
//! A [`ParamSet`] keeps every [`Param`] in insertion order, duplicates included.
//! Collapsing to a body happens only in [`ParamSet::serialize`], where a later
//! entry overwrites an earlier one with the same key (last write wins).

use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    key: String,
    value: Value,
}

impl Param {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamSet {
    entries: Vec<Param>,
}

impl ParamSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, param: Param) {
        self.entries.push(param);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|param| param.key == key)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Param> {
        self.entries.iter()
    }

    /// Folds the entries left to right into a body; later keys overwrite earlier ones.
    pub fn serialize(&self) -> Map<String, Value> {
        let mut body = Map::new();
        for param in &self.entries {
            body.insert(param.key.clone(), param.value.clone());
        }
        body
    }
}

impl<'a> IntoIterator for &'a ParamSet {
    type Item = &'a Param;
    type IntoIter = std::slice::Iter<'a, Param>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<Param> for ParamSet {
    fn from_iter<I: IntoIterator<Item = Param>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn last_write_wins_on_duplicate_keys() {
        let params: ParamSet = vec![Param::new("a", 1), Param::new("a", 2)]
            .into_iter()
            .collect();

        assert_eq!(params.len(), 2, "duplicates are kept until serialization");
        assert_eq!(Value::Object(params.serialize()), json!({ "a": 2 }));
    }

    #[test]
    fn serialize_is_repeatable() {
        let mut params = ParamSet::new();
        params.add(Param::new("queryTerm", "evil.com"));
        params.add(Param::new("types", json!(["URL"])));

        assert_eq!(params.serialize(), params.serialize());
        assert_eq!(
            params.iter().map(Param::key).collect::<Vec<_>>(),
            vec!["queryTerm", "types"]
        );
    }

    #[test]
    fn empty_set_serializes_to_empty_body() {
        let params = ParamSet::new();
        assert!(params.is_empty());
        assert!(params.serialize().is_empty());
        assert!(!params.contains_key("from"));
    }
}
