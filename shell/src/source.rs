//! Where the flight collection comes from: a local directory or a web server.

use std::io;
use std::path::PathBuf;

use skylog_shared::capabilities::{HttpError, HttpResponse, HttpResult, ResourcePath};
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("invalid base URL {root}: {source}")]
    InvalidBase {
        root: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("dashboard root {0} is not a directory")]
    NotADirectory(PathBuf),
}

#[derive(Debug)]
pub enum Source {
    Directory(PathBuf),
    Remote { client: reqwest::Client, base: Url },
}

impl Source {
    /// `http://` and `https://` roots are fetched over the network, anything
    /// else is a directory.
    pub fn from_root(root: &str) -> Result<Self, SourceError> {
        if root.starts_with("http://") || root.starts_with("https://") {
            let mut base = Url::parse(root).map_err(|source| SourceError::InvalidBase {
                root: root.to_string(),
                source,
            })?;
            // Without a trailing slash `join` would replace the last segment.
            if !base.path().ends_with('/') {
                let path = format!("{}/", base.path());
                base.set_path(&path);
            }
            let client = reqwest::Client::builder().build()?;
            Ok(Self::Remote { client, base })
        } else {
            let dir = PathBuf::from(root);
            if dir.exists() && !dir.is_dir() {
                return Err(SourceError::NotADirectory(dir));
            }
            Ok(Self::Directory(dir))
        }
    }

    pub async fn fetch(&self, path: &ResourcePath) -> HttpResult {
        match self {
            Self::Directory(dir) => read_file(dir.join(path.as_str())).await,
            Self::Remote { client, base } => {
                let url = base.join(path.as_str()).map_err(|e| HttpError::InvalidPath {
                    path: path.as_str().to_string(),
                    reason: e.to_string(),
                })?;
                get(client, url).await
            }
        }
    }
}

async fn read_file(file: PathBuf) -> HttpResult {
    tracing::debug!(path = %file.display(), "reading flight collection");
    match tokio::fs::read(&file).await {
        Ok(body) => Ok(HttpResponse::ok(body)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Ok(HttpResponse::new(404, format!("{} not found", file.display())))
        }
        Err(e) => Err(HttpError::Network(format!("{}: {e}", file.display()))),
    }
}

async fn get(client: &reqwest::Client, url: Url) -> HttpResult {
    tracing::debug!(%url, "fetching flight collection");
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| HttpError::Network(e.to_string()))?;
    let status = response.status().as_u16();
    let body = response
        .bytes()
        .await
        .map_err(|e| HttpError::Network(e.to_string()))?;
    Ok(HttpResponse::new(status, body.to_vec()))
}
