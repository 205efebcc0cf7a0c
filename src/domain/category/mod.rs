// src/domain/category/mod.rs
use crate::domain::errors::{DomainError, DomainResult};
use async_trait::async_trait;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CategoryId(String);

impl CategoryId {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::Validation("category id cannot be empty".into()));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Empty input means "no category" rather than an invalid id.
    pub fn parse_optional(value: Option<String>) -> DomainResult<Option<Self>> {
        match value {
            Some(raw) if raw.trim().is_empty() => Ok(None),
            Some(raw) => Self::new(raw).map(Some),
            None => Ok(None),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<CategoryId> for String {
    fn from(value: CategoryId) -> Self {
        value.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read-only view of the category table. Category CRUD lives outside this crate.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn exists(&self, id: &CategoryId) -> DomainResult<bool>;
}
