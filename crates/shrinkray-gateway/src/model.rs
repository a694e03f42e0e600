use serde::{Deserialize, Serialize};
use shrinkray_store::HealthReport;

#[derive(Debug, Deserialize)]
pub struct CreateLinkParams {
    /// Custom key requested by the caller.
    pub key: Option<String>,
}

impl CreateLinkParams {
    /// The requested key, with an empty `key=` treated as no key at all.
    pub fn custom_key(&self) -> Option<&str> {
        self.key.as_deref().filter(|k| !k.is_empty())
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    #[serde(flatten)]
    pub report: HealthReport,
}
