//! Fluent accumulator for indicator search parameters.
//!
//! Every setter validates its input before touching the builder, so a failed call
//! leaves the previous state intact. Setters that can fail return
//! `Result<&mut Self>`, which keeps chains readable with `?`:
//!
//! ```
//! use trustar_search::{ApiConfig, SearchIndicator};
//!
//! # fn main() -> trustar_search::Result<()> {
//! let mut search = SearchIndicator::new(&ApiConfig::default());
//! search
//!     .set_query_term("evil.com")
//!     .set_enclave_ids("E1")
//!     .set_from("2022-01-01")?
//!     .set_to("2022-02-01")?
//!     .set_sort_column("CREATED")?
//!     .set_page_size(50);
//! let request = search.query()?;
//! assert_eq!(request.query_pairs(), vec![("pageSize", "50")]);
//! # Ok(())
//! # }
//! ```

use crate::config::ApiConfig;
use crate::error::{reject, Result, SearchError};
use crate::params::{Param, ParamSet};
use crate::timestamp::{DateInput, DateParser, TimestampResolver};
use crate::vocabulary::{AttributeType, ObservableType, SortColumn, Vocabulary};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::ops::RangeInclusive;
use std::sync::Arc;

pub const DEFAULT_PAGE_SIZE: u32 = 25;
pub const PRIORITY_SCORES: RangeInclusive<i32> = -1..=3;

/// Attribute filter, e.g. `{"type": "MALWARE", "value": "emotet"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

impl Attribute {
    pub fn new(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            value: value.into(),
        }
    }
}

/// Related-observable filter, e.g. `{"type": "IP4", "value": "10.0.0.1"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observable {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

impl Observable {
    pub fn new(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            value: value.into(),
        }
    }
}

/// Enclave filter; a single id is promoted to a one-element list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnclaveIds(Vec<String>);

impl EnclaveIds {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl From<&str> for EnclaveIds {
    fn from(id: &str) -> Self {
        EnclaveIds(vec![id.to_string()])
    }
}

impl From<String> for EnclaveIds {
    fn from(id: String) -> Self {
        EnclaveIds(vec![id])
    }
}

impl From<Vec<String>> for EnclaveIds {
    fn from(ids: Vec<String>) -> Self {
        EnclaveIds(ids)
    }
}

impl From<Vec<&str>> for EnclaveIds {
    fn from(ids: Vec<&str>) -> Self {
        EnclaveIds(ids.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for EnclaveIds {
    fn from(ids: &[&str]) -> Self {
        EnclaveIds(ids.iter().map(|id| id.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for EnclaveIds {
    fn from(ids: [&str; N]) -> Self {
        EnclaveIds(ids.iter().map(|id| id.to_string()).collect())
    }
}

#[derive(Debug, Clone)]
pub struct SearchIndicator {
    pub(crate) endpoint: String,
    resolver: TimestampResolver,
    pub(crate) params: ParamSet,
    pub(crate) tags: BTreeSet<String>,
    pub(crate) from_date: Option<i64>,
    pub(crate) to_date: Option<i64>,
    pub(crate) page_size: u32,
    pub(crate) indicator_id: Option<String>,
}

impl SearchIndicator {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            endpoint: config.indicators_endpoint(),
            resolver: TimestampResolver::default(),
            params: ParamSet::new(),
            tags: BTreeSet::new(),
            from_date: None,
            to_date: None,
            page_size: DEFAULT_PAGE_SIZE,
            indicator_id: None,
        }
    }

    /// Replaces the parser used for textual `from`/`to` dates.
    pub fn with_date_parser(mut self, parser: Arc<dyn DateParser>) -> Self {
        self.resolver = TimestampResolver::new(parser);
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn params(&self) -> &ParamSet {
        &self.params
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    pub fn from_date(&self) -> Option<i64> {
        self.from_date
    }

    pub fn to_date(&self) -> Option<i64> {
        self.to_date
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn indicator_id(&self) -> Option<&str> {
        self.indicator_id.as_deref()
    }

    pub fn set_query_term(&mut self, term: impl Into<String>) -> &mut Self {
        self.push(Param::new("queryTerm", term.into()))
    }

    pub fn set_from(&mut self, date: impl Into<DateInput>) -> Result<&mut Self> {
        let epoch = self.resolver.resolve(&date.into()).map_err(reject)?;
        self.from_date = Some(epoch);
        Ok(self.push(Param::new("from", epoch)))
    }

    pub fn set_to(&mut self, date: impl Into<DateInput>) -> Result<&mut Self> {
        let epoch = self.resolver.resolve(&date.into()).map_err(reject)?;
        self.to_date = Some(epoch);
        Ok(self.push(Param::new("to", epoch)))
    }

    pub fn set_sort_column(&mut self, column: impl AsRef<str>) -> Result<&mut Self> {
        let column = SortColumn::validate(column.as_ref()).map_err(reject)?;
        Ok(self.push(Param::new("sortColumn", column.as_str())))
    }

    pub fn set_priority_scores(
        &mut self,
        scores: impl IntoIterator<Item = i32>,
    ) -> Result<&mut Self> {
        let scores: Vec<i32> = scores.into_iter().collect();
        if let Some(&score) = scores.iter().find(|&&s| !PRIORITY_SCORES.contains(&s)) {
            return Err(reject(SearchError::InvalidRange { score }));
        }
        Ok(self.push(Param::new("priorityScores", scores)))
    }

    pub fn set_enclave_ids(&mut self, ids: impl Into<EnclaveIds>) -> &mut Self {
        let EnclaveIds(ids) = ids.into();
        self.push(Param::new("enclaveIds", ids))
    }

    pub fn set_observable_types<I, S>(&mut self, types: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let types: Vec<String> = types.into_iter().map(|t| t.as_ref().to_string()).collect();
        if !types.iter().all(|t| ObservableType::is_member(t)) {
            return Err(reject(ObservableType::invalid()));
        }
        Ok(self.push(Param::new("types", types)))
    }

    pub fn set_attributes(
        &mut self,
        attributes: impl IntoIterator<Item = Attribute>,
    ) -> Result<&mut Self> {
        let attributes: Vec<Attribute> = attributes.into_iter().collect();
        if !attributes.iter().all(|a| AttributeType::is_member(&a.kind)) {
            return Err(reject(AttributeType::invalid()));
        }
        let value: Vec<Value> = attributes
            .iter()
            .map(|a| typed_value(&a.kind, &a.value))
            .collect();
        Ok(self.push(Param::new("attributes", value)))
    }

    pub fn set_related_observables(
        &mut self,
        observables: impl IntoIterator<Item = Observable>,
    ) -> Result<&mut Self> {
        let observables: Vec<Observable> = observables.into_iter().collect();
        if !observables.iter().all(|o| ObservableType::is_member(&o.kind)) {
            return Err(reject(ObservableType::invalid()));
        }
        let value: Vec<Value> = observables
            .iter()
            .map(|o| typed_value(&o.kind, &o.value))
            .collect();
        Ok(self.push(Param::new("relatedObservables", value)))
    }

    pub fn set_page_size(&mut self, size: u32) -> &mut Self {
        self.page_size = size;
        self
    }

    pub fn set_indicator_id(&mut self, indicator_id: impl Into<String>) -> &mut Self {
        self.indicator_id = Some(indicator_id.into());
        self
    }

    pub fn set_tag(&mut self, tag: impl Into<String>) -> &mut Self {
        self.tags.insert(tag.into());
        self
    }

    /// Appends a parameter without validation. Later params win on key collisions,
    /// so this can also override an earlier setter.
    pub fn set_custom_param(&mut self, param: Param) -> &mut Self {
        self.push(param)
    }

    fn push(&mut self, param: Param) -> &mut Self {
        log::debug!("search param {} = {}", param.key(), param.value());
        self.params.add(param);
        self
    }
}

/// `{"type": .., "value": ..}` object shared by attribute and observable filters.
fn typed_value(kind: &str, value: &str) -> Value {
    let mut entry = Map::new();
    entry.insert("type".to_string(), Value::from(kind));
    entry.insert("value".to_string(), Value::from(value));
    Value::Object(entry)
}
