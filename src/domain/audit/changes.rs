// src/domain/audit/changes.rs
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Before/after pair for one modified field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldChange {
    pub from: Value,
    pub to: Value,
}

/// Sparse diff produced by a partial update. Only fields whose value actually
/// changed are present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldChanges(BTreeMap<String, FieldChange>);

impl FieldChanges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, field: impl Into<String>, from: Value, to: Value) {
        self.0.insert(field.into(), FieldChange { from, to });
    }

    pub fn get(&self, field: &str) -> Option<&FieldChange> {
        self.0.get(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_json(self) -> Value {
        let map: Map<String, Value> = self
            .0
            .into_iter()
            .map(|(field, change)| {
                let mut pair = Map::with_capacity(2);
                pair.insert("from".into(), change.from);
                pair.insert("to".into(), change.to);
                (field, Value::Object(pair))
            })
            .collect();
        Value::Object(map)
    }
}

/// Full set of initial field values captured when an entity is created.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldSnapshot(BTreeMap<String, Value>);

impl FieldSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, value: Value) {
        self.0.insert(field.into(), value);
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_json(self) -> Value {
        Value::Object(self.0.into_iter().collect())
    }
}
