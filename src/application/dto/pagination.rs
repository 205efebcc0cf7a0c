use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct PageMeta {
    pub page: u32,
    pub limit: u32,
    /// Matching rows before pagination.
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(bound(
    serialize = "T: Serialize",
    deserialize = "T: serde::de::DeserializeOwned"
))]
pub struct Page<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

impl<T> Page<T> {
    pub fn new(data: Vec<T>, page: u32, limit: u32, total: u64) -> Self {
        Self {
            data,
            meta: PageMeta { page, limit, total },
        }
    }
}

/// Unpaginated collection wrapper.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(bound(
    serialize = "T: Serialize",
    deserialize = "T: serde::de::DeserializeOwned"
))]
pub struct DataEnvelope<T> {
    pub data: Vec<T>,
}

impl<T> From<Vec<T>> for DataEnvelope<T> {
    fn from(data: Vec<T>) -> Self {
        Self { data }
    }
}
