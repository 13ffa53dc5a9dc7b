//! State shared across all request handlers.

use std::sync::Arc;

use domains::ReportRepository;
use services::ReportService;

#[derive(Clone)]
pub struct AppState {
    pub reports: ReportService,
}

impl AppState {
    pub fn new(repo: Arc<dyn ReportRepository>) -> Self {
        Self {
            reports: ReportService::new(repo),
        }
    }
}
