use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Outcome classification reported to the transport layer.
///
/// The core never produces transport codes; gateways map these to whatever
/// their protocol needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Success,
    LinkFound,
    LinkNotFound,
    BadKey,
    BadLink,
    RetrievalError,
    Uncategorized,
}

impl Status {
    pub fn is_success(self) -> bool {
        matches!(self, Status::Success | Status::LinkFound)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Success => "success",
            Status::LinkFound => "link_found",
            Status::LinkNotFound => "link_not_found",
            Status::BadKey => "bad_key",
            Status::BadLink => "bad_link",
            Status::RetrievalError => "retrieval_error",
            Status::Uncategorized => "uncategorized",
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_success_and_found_are_successful() {
        assert!(Status::Success.is_success());
        assert!(Status::LinkFound.is_success());
        assert!(!Status::LinkNotFound.is_success());
        assert!(!Status::BadKey.is_success());
        assert!(!Status::Uncategorized.is_success());
    }

    #[test]
    fn display_matches_serde_name() {
        for status in [Status::BadLink, Status::RetrievalError, Status::LinkNotFound] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{status}\""));
        }
    }
}
