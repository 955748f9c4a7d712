use crux_core::capability::{Capability, CapabilityContext, Operation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MAX_PATH_LENGTH: usize = 2048;

/// A relative resource path such as `data/flights.json`.
///
/// The shell resolves it against its own root, so absolute URLs, rooted
/// paths, parent segments and query strings are rejected up front.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourcePath(String);

impl ResourcePath {
    pub fn new(path: impl Into<String>) -> Result<Self, HttpError> {
        let path = path.into();
        Self::validate(&path)?;
        Ok(Self(path))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(path: &str) -> Result<(), HttpError> {
        let invalid = |reason: &str| HttpError::InvalidPath {
            path: Self::truncate(path),
            reason: reason.to_string(),
        };

        if path.trim().is_empty() {
            return Err(invalid("path cannot be empty"));
        }
        if path.len() > MAX_PATH_LENGTH {
            return Err(invalid("path exceeds maximum length"));
        }
        if path.contains("://") {
            return Err(invalid("absolute URLs are not allowed"));
        }
        if path.starts_with('/') || path.starts_with('\\') {
            return Err(invalid("path cannot start with a separator"));
        }
        if path.split(['/', '\\']).any(|segment| segment == "..") {
            return Err(invalid("path cannot contain parent segments"));
        }
        if path.contains(['?', '#']) {
            return Err(invalid("query strings and fragments are not allowed"));
        }
        if path.chars().any(char::is_control) {
            return Err(invalid("path contains control characters"));
        }
        Ok(())
    }

    fn truncate(path: &str) -> String {
        if path.len() <= 100 {
            path.to_string()
        } else {
            let cut = (0..=100).rev().find(|i| path.is_char_boundary(*i)).unwrap_or(0);
            format!("{}...", &path[..cut])
        }
    }
}

impl std::fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpOperation {
    Get { path: ResourcePath },
}

impl HttpOperation {
    pub fn path(&self) -> &ResourcePath {
        match self {
            HttpOperation::Get { path } => path,
        }
    }
}

impl Operation for HttpOperation {
    type Output = HttpResult;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpResponse {
    status: u16,
    body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::new(200, body)
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpError {
    #[error("invalid resource path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("network error: {0}")]
    Network(String),
}

pub type HttpResult = Result<HttpResponse, HttpError>;

/// Read-only fetch of resources relative to the shell's data root.
pub struct Http<Ev> {
    context: CapabilityContext<HttpOperation, Ev>,
}

impl<Ev> Clone for Http<Ev> {
    fn clone(&self) -> Self {
        Self {
            context: self.context.clone(),
        }
    }
}

impl<Ev> Capability<Ev> for Http<Ev> {
    type Operation = HttpOperation;
    type MappedSelf<MappedEv> = Http<MappedEv>;

    fn map_event<F, NewEv>(&self, f: F) -> Self::MappedSelf<NewEv>
    where
        F: Fn(NewEv) -> Ev + Send + Sync + 'static,
        Ev: 'static,
        NewEv: 'static + Send,
    {
        Http::new(self.context.map_event(f))
    }
}

impl<Ev> Http<Ev> {
    pub fn new(context: CapabilityContext<HttpOperation, Ev>) -> Self {
        Self { context }
    }
}

impl<Ev> Http<Ev>
where
    Ev: 'static,
{
    /// Ask the shell for `path`; `make_event` receives the response or the
    /// transport failure.
    pub fn get<F>(&self, path: ResourcePath, make_event: F)
    where
        F: FnOnce(HttpResult) -> Ev + Send + Sync + 'static,
    {
        let context = self.context.clone();
        self.context.spawn(async move {
            let result = context
                .request_from_shell(HttpOperation::Get { path })
                .await;
            context.update_app(make_event(result));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_accepts_relative_file() {
        let path = ResourcePath::new("data/flights.json").unwrap();
        assert_eq!(path.as_str(), "data/flights.json");
    }

    #[test]
    fn test_path_rejects_empty_and_whitespace() {
        assert!(ResourcePath::new("").is_err());
        assert!(ResourcePath::new("   ").is_err());
    }

    #[test]
    fn test_path_rejects_absolute_forms() {
        assert!(ResourcePath::new("https://example.com/flights.json").is_err());
        assert!(ResourcePath::new("/data/flights.json").is_err());
        assert!(ResourcePath::new("\\data\\flights.json").is_err());
    }

    #[test]
    fn test_path_rejects_traversal() {
        assert!(ResourcePath::new("../secrets.json").is_err());
        assert!(ResourcePath::new("data/../../etc/passwd").is_err());
        assert!(ResourcePath::new("data/..flights.json").is_ok());
    }

    #[test]
    fn test_path_rejects_query_and_fragment() {
        assert!(ResourcePath::new("data/flights.json?page=2").is_err());
        assert!(ResourcePath::new("data/flights.json#top").is_err());
    }

    #[test]
    fn test_path_rejects_control_chars() {
        assert!(ResourcePath::new("data/fli\nghts.json").is_err());
    }

    #[test]
    fn test_long_path_is_truncated_in_error() {
        let long = "a".repeat(MAX_PATH_LENGTH + 1);
        match ResourcePath::new(long) {
            Err(HttpError::InvalidPath { path, .. }) => assert!(path.len() <= 103),
            other => panic!("expected InvalidPath, got {other:?}"),
        }
    }

    #[test]
    fn test_response_success_range() {
        assert!(HttpResponse::ok(Vec::new()).is_success());
        assert!(HttpResponse::new(204, Vec::new()).is_success());
        assert!(!HttpResponse::new(304, Vec::new()).is_success());
        assert!(!HttpResponse::new(404, Vec::new()).is_success());
        assert!(!HttpResponse::new(500, Vec::new()).is_success());
    }
}
