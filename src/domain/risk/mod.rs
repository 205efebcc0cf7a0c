pub mod entity;
pub mod query;
pub mod repository;
pub mod value_objects;

pub use entity::{NewRisk, RISK_ENTITY_TYPE, Risk, RiskPatch};
pub use query::{
    PageRequest, RiskFilter, RiskListQuery, RiskPage, RiskSort, RiskSortField, SortDirection,
};
pub use repository::{RiskReadRepository, RiskWriteRepository};
pub use value_objects::{
    RiskId, RiskSeverity, RiskStatus, RiskTitle, parse_optional_review_date, parse_review_date,
};
