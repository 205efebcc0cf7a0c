// tests/support/mocks/repos.rs
use async_trait::async_trait;
use risk_register::domain::{
    audit::{AuditLog, AuditLogRepository, NewAuditLog},
    category::{CategoryId, CategoryRepository},
    errors::{DomainError, DomainResult},
    risk::{
        NewRisk, Risk, RiskId, RiskListQuery, RiskPage, RiskReadRepository, RiskSort,
        RiskSortField, RiskWriteRepository, SortDirection,
    },
    user::{DisplayName, Email, NewUser, PasswordHash, Role, User, UserId, UserRepository},
};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use super::time::fixed_now;

#[derive(Default)]
pub struct InMemoryUserRepo {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepo {
    /// Stores a user directly, bypassing registration rules.
    pub fn seed(&self, id: &str, name: &str, role: Role) -> User {
        let user = User {
            id: UserId::new(id).unwrap(),
            email: Email::new(format!("{id}@example.com")).unwrap(),
            name: DisplayName::new(name).unwrap(),
            password_hash: PasswordHash::new("hashed:password123").unwrap(),
            role,
            created_at: fixed_now(),
            updated_at: fixed_now(),
        };
        self.users.lock().unwrap().push(user.clone());
        user
    }

    pub fn remove(&self, id: &str) {
        self.users.lock().unwrap().retain(|u| u.id.as_str() != id);
    }

    fn name_of(&self, id: &UserId) -> Option<String> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| &u.id == id)
            .map(|u| u.name.to_string())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepo {
    async fn count(&self) -> DomainResult<u64> {
        Ok(self.users.lock().unwrap().len() as u64)
    }

    async fn insert(&self, new_user: NewUser) -> DomainResult<User> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == new_user.email) {
            return Err(DomainError::Conflict("email already registered".into()));
        }
        let user = User {
            id: UserId::new(format!("user-{}", users.len() + 1))?,
            email: new_user.email,
            name: new_user.name,
            password_hash: new_user.password_hash,
            role: new_user.role,
            created_at: new_user.created_at,
            updated_at: new_user.created_at,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &Email) -> DomainResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| &u.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> DomainResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| &u.id == id)
            .cloned())
    }
}

#[derive(Default)]
pub struct InMemoryCategoryRepo {
    ids: HashSet<String>,
}

impl InMemoryCategoryRepo {
    pub fn with(ids: &[&str]) -> Self {
        Self {
            ids: ids.iter().map(|id| (*id).to_string()).collect(),
        }
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepo {
    async fn exists(&self, id: &CategoryId) -> DomainResult<bool> {
        Ok(self.ids.contains(id.as_str()))
    }
}

/// Backs both the read and the write port, like the two Postgres repositories
/// sharing one pool.
#[derive(Default)]
pub struct InMemoryRiskRepo {
    risks: Mutex<Vec<Risk>>,
    inserted: Mutex<u64>,
}

impl InMemoryRiskRepo {
    pub fn len(&self) -> usize {
        self.risks.lock().unwrap().len()
    }

    pub fn get(&self, id: &str) -> Option<Risk> {
        self.risks
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id.as_str() == id)
            .cloned()
    }
}

#[async_trait]
impl RiskWriteRepository for InMemoryRiskRepo {
    async fn insert(&self, new_risk: NewRisk) -> DomainResult<Risk> {
        let id = {
            let mut inserted = self.inserted.lock().unwrap();
            *inserted += 1;
            match &new_risk.id {
                Some(id) => id.clone(),
                None => RiskId::new(format!("risk-{inserted:03}"))?,
            }
        };
        let risk = new_risk.into_risk(id);
        self.risks.lock().unwrap().push(risk.clone());
        Ok(risk)
    }

    async fn update(&self, risk: &Risk) -> DomainResult<Risk> {
        let mut risks = self.risks.lock().unwrap();
        let slot = risks
            .iter_mut()
            .find(|r| r.id == risk.id)
            .ok_or_else(|| DomainError::NotFound("risk not found".into()))?;
        *slot = risk.clone();
        Ok(risk.clone())
    }

    async fn delete(&self, id: &RiskId) -> DomainResult<()> {
        let mut risks = self.risks.lock().unwrap();
        let before = risks.len();
        risks.retain(|r| &r.id != id);
        if risks.len() == before {
            return Err(DomainError::NotFound("risk not found".into()));
        }
        Ok(())
    }
}

fn directed(ordering: Ordering, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

fn nulls_last<T: Ord>(a: Option<T>, b: Option<T>, direction: SortDirection) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => directed(a.cmp(&b), direction),
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
    }
}

fn compare(a: &Risk, b: &Risk, sort: RiskSort) -> Ordering {
    let primary = match sort.field {
        RiskSortField::Category => nulls_last(
            a.category_id.as_ref(),
            b.category_id.as_ref(),
            sort.direction,
        ),
        RiskSortField::ReviewDate => {
            nulls_last(a.review_date.as_ref(), b.review_date.as_ref(), sort.direction)
        }
        RiskSortField::Title => directed(a.title.cmp(&b.title), sort.direction),
        RiskSortField::Status => directed(a.status.cmp(&b.status), sort.direction),
        RiskSortField::Severity => directed(a.severity.cmp(&b.severity), sort.direction),
        RiskSortField::UpdatedAt => directed(a.updated_at.cmp(&b.updated_at), sort.direction),
        RiskSortField::CreatedAt => directed(a.created_at.cmp(&b.created_at), sort.direction),
    };
    primary.then_with(|| directed(a.id.cmp(&b.id), sort.direction))
}

#[async_trait]
impl RiskReadRepository for InMemoryRiskRepo {
    async fn find_by_id(&self, id: &RiskId) -> DomainResult<Option<Risk>> {
        Ok(self.get(id.as_str()))
    }

    async fn list(&self, query: &RiskListQuery) -> DomainResult<RiskPage> {
        let filter = &query.filter;
        let needle = filter.search().map(str::to_lowercase);

        let mut matching: Vec<Risk> = self
            .risks
            .lock()
            .unwrap()
            .iter()
            .filter(|r| filter.status.is_none_or(|s| r.status == s))
            .filter(|r| filter.severity.is_none_or(|s| r.severity == s))
            .filter(|r| {
                filter
                    .category_id
                    .as_ref()
                    .is_none_or(|c| r.category_id.as_ref() == Some(c))
            })
            .filter(|r| filter.owner_id.as_ref().is_none_or(|o| &r.owner_id == o))
            .filter(|r| {
                needle.as_deref().is_none_or(|n| {
                    r.title.as_str().to_lowercase().contains(n)
                        || r.description.to_lowercase().contains(n)
                })
            })
            .cloned()
            .collect();

        matching.sort_by(|a, b| compare(a, b, query.sort));
        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(usize::try_from(query.page.offset()).unwrap())
            .take(query.page.limit() as usize)
            .collect();

        Ok(RiskPage { items, total })
    }
}

/// Append-only log. Resolves `user_name` from the user store the way the SQL
/// LEFT JOIN does.
pub struct InMemoryAuditRepo {
    entries: Mutex<Vec<AuditLog>>,
    users: Arc<InMemoryUserRepo>,
}

impl InMemoryAuditRepo {
    pub fn new(users: Arc<InMemoryUserRepo>) -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            users,
        }
    }

    pub fn entries(&self) -> Vec<AuditLog> {
        self.entries.lock().unwrap().clone()
    }

    pub fn entries_for(&self, entity_id: &str) -> Vec<AuditLog> {
        self.entries()
            .into_iter()
            .filter(|e| e.entity.entity_id == entity_id)
            .collect()
    }
}

#[async_trait]
impl AuditLogRepository for InMemoryAuditRepo {
    async fn insert(&self, log: NewAuditLog) -> DomainResult<AuditLog> {
        let mut entries = self.entries.lock().unwrap();
        let entry = AuditLog {
            id: format!("audit-{}", entries.len() + 1),
            entity: log.entity,
            action: log.action,
            changes: log.changes,
            user_id: log.user_id,
            user_name: None,
            created_at: log.created_at,
        };
        entries.push(entry.clone());
        Ok(entry)
    }

    async fn list_by_entity(
        &self,
        entity_type: &str,
        entity_id: &str,
        limit: u32,
    ) -> DomainResult<Vec<AuditLog>> {
        let mut matching: Vec<AuditLog> = self
            .entries()
            .into_iter()
            .rev()
            .filter(|e| e.entity.entity_type == entity_type && e.entity.entity_id == entity_id)
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(matching
            .into_iter()
            .take(limit as usize)
            .map(|mut e| {
                e.user_name = self.users.name_of(&e.user_id);
                e
            })
            .collect())
    }
}

/// Read side frozen at a snapshot, as seen by a request racing a concurrent
/// delete on the write side.
pub struct StaleRiskReads {
    snapshot: Vec<Risk>,
}

impl StaleRiskReads {
    pub fn new(snapshot: Vec<Risk>) -> Self {
        Self { snapshot }
    }
}

#[async_trait]
impl RiskReadRepository for StaleRiskReads {
    async fn find_by_id(&self, id: &RiskId) -> DomainResult<Option<Risk>> {
        Ok(self.snapshot.iter().find(|r| &r.id == id).cloned())
    }

    async fn list(&self, _query: &RiskListQuery) -> DomainResult<RiskPage> {
        Ok(RiskPage {
            items: self.snapshot.clone(),
            total: self.snapshot.len() as u64,
        })
    }
}

/// Every write fails as if the audit table were unreachable.
pub struct FailingAuditRepo;

#[async_trait]
impl AuditLogRepository for FailingAuditRepo {
    async fn insert(&self, _log: NewAuditLog) -> DomainResult<AuditLog> {
        Err(DomainError::Persistence("audit store unavailable".into()))
    }

    async fn list_by_entity(
        &self,
        _entity_type: &str,
        _entity_id: &str,
        _limit: u32,
    ) -> DomainResult<Vec<AuditLog>> {
        Ok(Vec::new())
    }
}
