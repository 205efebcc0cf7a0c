// src/infrastructure/repositories/postgres_risk.rs
use super::map_sqlx;
use crate::domain::category::CategoryId;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::risk::{
    NewRisk, Risk, RiskFilter, RiskId, RiskListQuery, RiskPage, RiskReadRepository, RiskSort,
    RiskSortField, RiskTitle, RiskWriteRepository,
};
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

const RISK_COLUMNS: &str = "id, title, description, owner_id, status, severity, category_id, \
     review_date, created_by, updated_by, created_at, updated_at";

// Rank expressions follow the declaration order of `RiskStatus` / `RiskSeverity`.
const STATUS_RANK: &str = "CASE status WHEN 'open' THEN 0 WHEN 'mitigating' THEN 1 \
     WHEN 'resolved' THEN 2 WHEN 'accepted' THEN 3 END";
const SEVERITY_RANK: &str = "CASE severity WHEN 'low' THEN 0 WHEN 'medium' THEN 1 \
     WHEN 'high' THEN 2 WHEN 'critical' THEN 3 END";

#[derive(Clone)]
pub struct PostgresRiskWriteRepository {
    pool: PgPool,
}

impl PostgresRiskWriteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Clone)]
pub struct PostgresRiskReadRepository {
    pool: PgPool,
}

impl PostgresRiskReadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct RiskRow {
    id: String,
    title: String,
    description: String,
    owner_id: String,
    status: String,
    severity: String,
    category_id: Option<String>,
    review_date: Option<NaiveDate>,
    created_by: String,
    updated_by: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<RiskRow> for Risk {
    type Error = DomainError;

    fn try_from(row: RiskRow) -> Result<Self, Self::Error> {
        Ok(Risk {
            id: RiskId::new(row.id)?,
            title: RiskTitle::new(row.title)?,
            description: row.description,
            owner_id: UserId::new(row.owner_id)?,
            status: row.status.parse()?,
            severity: row.severity.parse()?,
            category_id: row.category_id.map(CategoryId::new).transpose()?,
            review_date: row.review_date,
            created_by: UserId::new(row.created_by)?,
            updated_by: UserId::new(row.updated_by)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl RiskWriteRepository for PostgresRiskWriteRepository {
    async fn insert(&self, risk: NewRisk) -> DomainResult<Risk> {
        let id = risk
            .id
            .clone()
            .map_or_else(|| Uuid::new_v4().to_string(), String::from);

        let row = sqlx::query_as::<_, RiskRow>(&format!(
            "INSERT INTO risks (id, title, description, owner_id, status, severity, category_id,
                                review_date, created_by, updated_by, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9, $10, $10)
             RETURNING {RISK_COLUMNS}"
        ))
        .bind(id)
        .bind(risk.title.as_str())
        .bind(&risk.description)
        .bind(risk.owner_id.as_str())
        .bind(risk.status.as_str())
        .bind(risk.severity.as_str())
        .bind(risk.category_id.as_ref().map(CategoryId::as_str))
        .bind(risk.review_date)
        .bind(risk.created_by.as_str())
        .bind(risk.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Risk::try_from(row)
    }

    async fn update(&self, risk: &Risk) -> DomainResult<Risk> {
        let row = sqlx::query_as::<_, RiskRow>(&format!(
            "UPDATE risks
             SET title = $2, description = $3, owner_id = $4, status = $5, severity = $6,
                 category_id = $7, review_date = $8, updated_by = $9, updated_at = $10
             WHERE id = $1
             RETURNING {RISK_COLUMNS}"
        ))
        .bind(risk.id.as_str())
        .bind(risk.title.as_str())
        .bind(&risk.description)
        .bind(risk.owner_id.as_str())
        .bind(risk.status.as_str())
        .bind(risk.severity.as_str())
        .bind(risk.category_id.as_ref().map(CategoryId::as_str))
        .bind(risk.review_date)
        .bind(risk.updated_by.as_str())
        .bind(risk.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.ok_or_else(|| DomainError::NotFound(format!("risk '{}' not found", risk.id)))
            .and_then(Risk::try_from)
    }

    async fn delete(&self, id: &RiskId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM risks WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!("risk '{id}' not found")));
        }
        Ok(())
    }
}

fn push_clause(builder: &mut QueryBuilder<'_, Postgres>, has_where: &mut bool) {
    builder.push(if *has_where { " AND " } else { " WHERE " });
    *has_where = true;
}

/// Appends the `WHERE` clause for `filter`. Every value goes through
/// `push_bind`; only fixed column names are pushed as text.
fn push_conditions(builder: &mut QueryBuilder<'_, Postgres>, filter: &RiskFilter) {
    let mut has_where = false;

    if let Some(status) = filter.status {
        push_clause(builder, &mut has_where);
        builder.push("status = ");
        builder.push_bind(status.as_str());
    }
    if let Some(severity) = filter.severity {
        push_clause(builder, &mut has_where);
        builder.push("severity = ");
        builder.push_bind(severity.as_str());
    }
    if let Some(category_id) = &filter.category_id {
        push_clause(builder, &mut has_where);
        builder.push("category_id = ");
        builder.push_bind(category_id.as_str().to_owned());
    }
    if let Some(owner_id) = &filter.owner_id {
        push_clause(builder, &mut has_where);
        builder.push("owner_id = ");
        builder.push_bind(owner_id.as_str().to_owned());
    }
    if let Some(pattern) = filter.search_pattern() {
        push_clause(builder, &mut has_where);
        builder.push("(title ILIKE ");
        builder.push_bind(pattern.clone());
        builder.push(" ESCAPE '\\' OR description ILIKE ");
        builder.push_bind(pattern);
        builder.push(" ESCAPE '\\')");
    }
}

/// Category sort uses the display name, not the opaque id.
const CATEGORY_NAME: &str = "(SELECT c.name FROM categories c WHERE c.id = risks.category_id)";

const fn sort_expression(field: RiskSortField) -> &'static str {
    match field {
        RiskSortField::Title => "title",
        RiskSortField::Status => STATUS_RANK,
        RiskSortField::Severity => SEVERITY_RANK,
        RiskSortField::Category => CATEGORY_NAME,
        RiskSortField::ReviewDate => "review_date",
        RiskSortField::UpdatedAt => "updated_at",
        RiskSortField::CreatedAt => "created_at",
    }
}

/// `id` breaks ties in the same direction so pages never overlap.
fn push_ordering(builder: &mut QueryBuilder<'_, Postgres>, sort: RiskSort) {
    let direction = sort.direction.as_sql();
    builder.push(" ORDER BY ");
    builder.push(sort_expression(sort.field));
    builder.push(" ");
    builder.push(direction);
    if sort.field.is_nullable() {
        builder.push(" NULLS LAST");
    }
    builder.push(", id ");
    builder.push(direction);
}

fn count_query(filter: &RiskFilter) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM risks");
    push_conditions(&mut builder, filter);
    builder
}

fn page_query(query: &RiskListQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT {RISK_COLUMNS} FROM risks"));
    push_conditions(&mut builder, &query.filter);
    push_ordering(&mut builder, query.sort);
    builder.push(" LIMIT ");
    builder.push_bind(i64::from(query.page.limit()));
    builder.push(" OFFSET ");
    builder.push_bind(i64::try_from(query.page.offset()).unwrap_or(i64::MAX));
    builder
}

#[async_trait]
impl RiskReadRepository for PostgresRiskReadRepository {
    async fn find_by_id(&self, id: &RiskId) -> DomainResult<Option<Risk>> {
        let row = sqlx::query_as::<_, RiskRow>(&format!(
            "SELECT {RISK_COLUMNS} FROM risks WHERE id = $1"
        ))
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Risk::try_from).transpose()
    }

    async fn list(&self, query: &RiskListQuery) -> DomainResult<RiskPage> {
        let total = count_query(&query.filter)
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let rows = page_query(query)
            .build_query_as::<RiskRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let items = rows
            .into_iter()
            .map(Risk::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RiskPage {
            items,
            total: u64::try_from(total).unwrap_or_default(),
        })
    }
}
