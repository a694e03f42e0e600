use std::sync::Arc;

use shrinkray_shortener::Operations;
use shrinkray_store::HealthReport;
use tokio::sync::watch;

#[derive(Clone)]
pub struct AppState {
    operations: Arc<dyn Operations>,
    base_url: String,
    health: watch::Receiver<HealthReport>,
}

impl AppState {
    pub fn new(
        operations: Arc<dyn Operations>,
        public_base_url: impl Into<String>,
        health: watch::Receiver<HealthReport>,
    ) -> Self {
        Self {
            operations,
            base_url: public_base_url.into(),
            health,
        }
    }

    pub fn operations(&self) -> &dyn Operations {
        self.operations.as_ref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn health(&self) -> HealthReport {
        self.health.borrow().clone()
    }
}
