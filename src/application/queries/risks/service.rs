use std::sync::Arc;

use crate::domain::risk::RiskReadRepository;

pub struct RiskQueryService {
    pub(super) read_repo: Arc<dyn RiskReadRepository>,
}

impl RiskQueryService {
    pub fn new(read_repo: Arc<dyn RiskReadRepository>) -> Self {
        Self { read_repo }
    }
}
