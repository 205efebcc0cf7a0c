// src/domain/risk/entity.rs
use crate::domain::audit::{FieldChanges, FieldSnapshot};
use crate::domain::category::CategoryId;
use crate::domain::risk::value_objects::{
    REVIEW_DATE_FORMAT, RiskId, RiskSeverity, RiskStatus, RiskTitle,
};
use crate::domain::user::UserId;
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::{Value, json};

pub const RISK_ENTITY_TYPE: &str = "risk";

#[derive(Debug, Clone, PartialEq)]
pub struct Risk {
    pub id: RiskId,
    pub title: RiskTitle,
    pub description: String,
    pub owner_id: UserId,
    pub status: RiskStatus,
    pub severity: RiskSeverity,
    pub category_id: Option<CategoryId>,
    pub review_date: Option<NaiveDate>,
    pub created_by: UserId,
    pub updated_by: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update. `None` leaves a field untouched; for the nullable columns
/// `Some(None)` clears the stored value.
#[derive(Debug, Clone, Default)]
pub struct RiskPatch {
    pub title: Option<RiskTitle>,
    pub description: Option<String>,
    pub owner_id: Option<UserId>,
    pub status: Option<RiskStatus>,
    pub severity: Option<RiskSeverity>,
    pub category_id: Option<Option<CategoryId>>,
    pub review_date: Option<Option<NaiveDate>>,
}

impl RiskPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.owner_id.is_none()
            && self.status.is_none()
            && self.severity.is_none()
            && self.category_id.is_none()
            && self.review_date.is_none()
    }
}

fn track<T: PartialEq>(
    changes: &mut FieldChanges,
    field: &str,
    current: &mut T,
    next: Option<T>,
    to_json: impl Fn(&T) -> Value,
) {
    let Some(next) = next else {
        return;
    };
    if *current == next {
        return;
    }
    changes.record(field, to_json(current), to_json(&next));
    *current = next;
}

fn date_json(date: &NaiveDate) -> Value {
    Value::String(date.format(REVIEW_DATE_FORMAT).to_string())
}

fn optional_json<T>(value: &Option<T>, to_json: impl Fn(&T) -> Value) -> Value {
    value.as_ref().map_or(Value::Null, to_json)
}

impl Risk {
    /// Applies the present fields of `patch` and returns the ones whose value
    /// actually changed. Timestamps and the updater are left alone; see [`Risk::touch`].
    pub fn apply(&mut self, patch: RiskPatch) -> FieldChanges {
        let mut changes = FieldChanges::new();
        track(&mut changes, "title", &mut self.title, patch.title, |t| {
            json!(t.as_str())
        });
        track(
            &mut changes,
            "description",
            &mut self.description,
            patch.description,
            |d| json!(d),
        );
        track(
            &mut changes,
            "owner_id",
            &mut self.owner_id,
            patch.owner_id,
            |o| json!(o.as_str()),
        );
        track(&mut changes, "status", &mut self.status, patch.status, |s| {
            json!(s.as_str())
        });
        track(
            &mut changes,
            "severity",
            &mut self.severity,
            patch.severity,
            |s| json!(s.as_str()),
        );
        track(
            &mut changes,
            "category_id",
            &mut self.category_id,
            patch.category_id,
            |c| optional_json(c, |id| json!(id.as_str())),
        );
        track(
            &mut changes,
            "review_date",
            &mut self.review_date,
            patch.review_date,
            |d| optional_json(d, date_json),
        );
        changes
    }

    /// Marks the row as modified by `actor`. `updated_at` never moves before `created_at`.
    pub fn touch(&mut self, actor: UserId, now: DateTime<Utc>) {
        self.updated_by = actor;
        self.updated_at = now.max(self.created_at);
    }

    /// Initial field values recorded with a `created` audit entry. Unset
    /// optional references are omitted.
    pub fn snapshot(&self) -> FieldSnapshot {
        let mut snapshot = FieldSnapshot::new();
        snapshot.insert("title", json!(self.title.as_str()));
        snapshot.insert("description", json!(self.description));
        snapshot.insert("owner_id", json!(self.owner_id.as_str()));
        snapshot.insert("status", json!(self.status.as_str()));
        snapshot.insert("severity", json!(self.severity.as_str()));
        if let Some(category_id) = &self.category_id {
            snapshot.insert("category_id", json!(category_id.as_str()));
        }
        if let Some(review_date) = &self.review_date {
            snapshot.insert("review_date", date_json(review_date));
        }
        snapshot
    }
}

#[derive(Debug, Clone)]
pub struct NewRisk {
    /// Generated by the store when absent.
    pub id: Option<RiskId>,
    pub title: RiskTitle,
    pub description: String,
    pub owner_id: UserId,
    pub status: RiskStatus,
    pub severity: RiskSeverity,
    pub category_id: Option<CategoryId>,
    pub review_date: Option<NaiveDate>,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}

impl NewRisk {
    /// Materializes the row as stored: the creator is also the first updater
    /// and both timestamps are equal.
    pub fn into_risk(self, id: RiskId) -> Risk {
        Risk {
            id,
            title: self.title,
            description: self.description,
            owner_id: self.owner_id,
            status: self.status,
            severity: self.severity,
            category_id: self.category_id,
            review_date: self.review_date,
            updated_by: self.created_by.clone(),
            created_by: self.created_by,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}
