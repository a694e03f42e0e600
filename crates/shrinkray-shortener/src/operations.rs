use crate::error::LinkError;
use crate::service::LinkService;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use shrinkray_core::{Link, ShortKey, Status};
use shrinkray_generator::Generator;

static LINK_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"https?://(www\.)?[-a-zA-Z0-9@:%._+~#=]{1,256}\.[a-zA-Z0-9()]{1,6}\b([-a-zA-Z0-9()!@:%_+.~#?&/=]*)",
    )
    .expect("link pattern is a valid regex")
});

/// The status of an operation together with its result.
#[derive(Debug)]
pub struct Outcome<T> {
    pub status: Status,
    pub result: Result<T, LinkError>,
}

impl<T> Outcome<T> {
    fn success(status: Status, value: T) -> Self {
        Self {
            status,
            result: Ok(value),
        }
    }

    fn failure(status: Status, error: LinkError) -> Self {
        Self {
            status,
            result: Err(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    pub fn into_result(self) -> Result<T, LinkError> {
        self.result
    }
}

/// Operations exposed to transports.
#[async_trait]
pub trait Operations: Send + Sync + 'static {
    /// Shortens a raw URL, optionally under a caller-chosen key.
    async fn create_link(&self, raw_link: &str, custom_key: Option<&str>) -> Outcome<ShortKey>;

    /// Looks up the URL behind `key`.
    async fn resolve_key(&self, key: &str) -> Outcome<String>;

    /// Every stored mapping as a `key,encodedLink` line.
    async fn export_all(&self) -> Outcome<Vec<String>>;
}

/// Checks a raw link before it is encoded, returning the trimmed link.
pub fn validate_raw_link(raw: &str) -> Result<&str, LinkError> {
    let link = raw.trim();
    if link.is_empty() {
        return Err(LinkError::InvalidLink("link is empty".to_string()));
    }
    if link.contains('\n') {
        return Err(LinkError::InvalidLink("link contains a newline".to_string()));
    }
    if !LINK_PATTERN.is_match(link) {
        return Err(LinkError::InvalidLink(format!("'{link}' is not an http(s) URL")));
    }
    Ok(link)
}

fn create_status(error: &LinkError) -> Status {
    match error {
        LinkError::InvalidKey(_) | LinkError::KeyConflict(_) => Status::BadKey,
        LinkError::InvalidLink(_) => Status::BadLink,
        _ => Status::Uncategorized,
    }
}

fn resolve_status(error: &LinkError) -> Status {
    match error {
        LinkError::InvalidKey(_) => Status::BadKey,
        LinkError::NotFound(_) => Status::LinkNotFound,
        LinkError::Store(_) => Status::RetrievalError,
        _ => Status::Uncategorized,
    }
}

#[async_trait]
impl<G: Generator> Operations for LinkService<G> {
    async fn create_link(&self, raw_link: &str, custom_key: Option<&str>) -> Outcome<ShortKey> {
        let result = match validate_raw_link(raw_link) {
            Ok(link) => LinkService::create_link(self, &Link::new(link), custom_key).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(key) => Outcome::success(Status::Success, key),
            Err(e) => Outcome::failure(create_status(&e), e),
        }
    }

    async fn resolve_key(&self, key: &str) -> Outcome<String> {
        match self.resolve(key).await {
            Ok(url) => Outcome::success(Status::LinkFound, url),
            Err(e) => Outcome::failure(resolve_status(&e), e),
        }
    }

    async fn export_all(&self) -> Outcome<Vec<String>> {
        match self.export().await {
            Ok(entries) => Outcome::success(
                Status::Success,
                entries
                    .into_iter()
                    .map(|(key, encoded)| format!("{key},{encoded}"))
                    .collect(),
            ),
            Err(e) => Outcome::failure(Status::Uncategorized, e),
        }
    }
}
