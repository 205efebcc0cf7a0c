use super::RiskQueryService;
use crate::{
    application::{
        dto::{Page, RiskDto},
        error::ApplicationResult,
    },
    domain::{
        category::CategoryId,
        risk::{PageRequest, RiskFilter, RiskListQuery, RiskSeverity, RiskSort, RiskStatus},
        user::UserId,
    },
};

/// Raw list parameters as received. Paging and sorting are normalised rather
/// than rejected; unknown status or severity values are validation errors.
#[derive(Debug, Clone, Default)]
pub struct ListRisksQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub status: Option<String>,
    pub severity: Option<String>,
    pub category_id: Option<String>,
    pub owner_id: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl ListRisksQuery {
    fn into_domain(self) -> ApplicationResult<RiskListQuery> {
        let filter = RiskFilter {
            status: non_blank(self.status)
                .map(|s| s.trim().parse::<RiskStatus>())
                .transpose()?,
            severity: non_blank(self.severity)
                .map(|s| s.trim().parse::<RiskSeverity>())
                .transpose()?,
            category_id: CategoryId::parse_optional(self.category_id)?,
            owner_id: non_blank(self.owner_id).map(UserId::new).transpose()?,
            ..RiskFilter::default()
        }
        .with_search(self.search);

        Ok(RiskListQuery {
            filter,
            sort: RiskSort::from_params(self.sort.as_deref(), self.order.as_deref()),
            page: PageRequest::new(self.page, self.limit),
        })
    }
}

impl RiskQueryService {
    pub async fn list_risks(&self, query: ListRisksQuery) -> ApplicationResult<Page<RiskDto>> {
        let query = query.into_domain()?;
        let page = self.read_repo.list(&query).await?;
        let data = page.items.into_iter().map(RiskDto::from).collect();
        Ok(Page::new(
            data,
            query.page.page(),
            query.page.limit(),
            page.total,
        ))
    }
}
