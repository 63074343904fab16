//! Per-request state shared by every resolver of one operation.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::{Map, Value};

use crate::{
    config::{DependeeConfig, LookupOrder},
    path::FieldPath,
    ResolverError, ResolverResult,
};

/// Key under which published dependee records appear in [`ResolutionContext::to_json`].
/// Reserved, users cannot insert it.
pub const DEPENDEES_KEY: &str = "_dependees";

/// A value published by a dependee, at the position of the field that produced it.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct DependeeRecord {
    pub path: FieldPath,
    pub value: Value,
}

/// Append-only list of dependee records.
#[derive(Debug, Default)]
pub struct DependeeLog {
    records: Mutex<Vec<DependeeRecord>>,
}

impl DependeeLog {
    pub fn append(&self, record: DependeeRecord) {
        self.records().push(record);
    }

    /// Value published by `dependee` among the siblings of `path`.
    pub fn find(&self, path: &FieldPath, dependee: &str, order: LookupOrder) -> Option<Value> {
        let records = self.records();
        let is_match = |record: &&DependeeRecord| {
            record.path.key().as_field() == Some(dependee) && record.path.is_sibling_of(path)
        };

        let found = match order {
            LookupOrder::Latest => records.iter().rev().find(is_match),
            LookupOrder::Earliest => records.iter().find(is_match),
        };

        found.map(|record| record.value.clone())
    }

    pub fn len(&self) -> usize {
        self.records().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn snapshot(&self) -> Vec<DependeeRecord> {
        self.records().clone()
    }

    fn records(&self) -> MutexGuard<'_, Vec<DependeeRecord>> {
        // Only pushes and reads happen under the lock, a poisoned list is still consistent.
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Shared, mutable, request-scoped key/value context.
///
/// Cheap to clone: every clone points at the same request state. A context
/// created with [`ResolutionContext::read_only`] has no dependee log, and any
/// dependee-aware resolver fails on it.
#[derive(Debug, Clone)]
pub struct ResolutionContext {
    data: Arc<Mutex<Map<String, Value>>>,
    dependees: Option<Arc<DependeeLog>>,
    config: Arc<DependeeConfig>,
}

impl Default for ResolutionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolutionContext {
    pub fn new() -> Self {
        Self::from_data(Map::new())
    }

    pub fn from_data(data: Map<String, Value>) -> Self {
        Self {
            data: Arc::new(Mutex::new(data)),
            dependees: Some(Arc::default()),
            config: Arc::default(),
        }
    }

    pub fn read_only(data: Map<String, Value>) -> Self {
        Self {
            data: Arc::new(Mutex::new(data)),
            dependees: None,
            config: Arc::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: DependeeConfig) -> Self {
        self.config = Arc::new(config);
        self
    }

    pub fn config(&self) -> &DependeeConfig {
        &self.config
    }

    pub fn is_mutable(&self) -> bool {
        self.dependees.is_some()
    }

    pub fn dependees(&self) -> Option<&DependeeLog> {
        self.dependees.as_deref()
    }

    pub fn dependee_records(&self) -> Vec<DependeeRecord> {
        self.dependees().map(DependeeLog::snapshot).unwrap_or_default()
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.data().get(key).cloned()
    }

    pub fn insert(&self, key: impl Into<String>, value: Value) -> ResolverResult<Option<Value>> {
        let key = key.into();

        if !self.is_mutable() {
            return Err(ResolverError::ImmutableContext);
        }

        if key == DEPENDEES_KEY {
            return Err(ResolverError::ReservedKey(key));
        }

        Ok(self.data().insert(key, value))
    }

    /// The user data together with the published records under [`DEPENDEES_KEY`].
    pub fn to_json(&self) -> Value {
        let mut object = self.data().clone();

        if self.is_mutable() {
            object.insert(DEPENDEES_KEY.to_string(), serde_json::json!(self.dependee_records()));
        }

        Value::Object(object)
    }

    fn data(&self) -> MutexGuard<'_, Map<String, Value>> {
        self.data.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
