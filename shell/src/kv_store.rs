//! File-backed preference store: one JSON object of string values.

use std::io;
use std::path::PathBuf;

use serde_json::{Map, Value};
use skylog_shared::capabilities::{
    KeyValueError, KeyValueOperation, KeyValueResponse, KeyValueResult,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreFileError {
    #[error("failed to access preference file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("preference file {path} is not a JSON object: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl From<StoreFileError> for KeyValueError {
    fn from(error: StoreFileError) -> Self {
        match error {
            StoreFileError::Io { .. } => KeyValueError::Io {
                message: error.to_string(),
            },
            StoreFileError::Corrupt { .. } => KeyValueError::Other {
                message: error.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct PreferenceFile {
    path: PathBuf,
}

impl PreferenceFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data dir>/skylog/preferences.json`, if the platform has a data dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("skylog").join("preferences.json"))
    }

    /// Answer one key-value request from the core.
    pub async fn perform(&self, operation: &KeyValueOperation) -> KeyValueResult {
        let response = match operation {
            KeyValueOperation::Get { key } => self
                .get(key)
                .await
                .map(|value| KeyValueResponse::Get { value: value.into() }),
            KeyValueOperation::Set { key, value } => self
                .set(key, value)
                .await
                .map(|previous| KeyValueResponse::Set {
                    previous: previous.into(),
                }),
            KeyValueOperation::Delete { key } => self
                .delete(key)
                .await
                .map(|previous| KeyValueResponse::Delete {
                    previous: previous.into(),
                }),
            KeyValueOperation::Exists { key } => self
                .get(key)
                .await
                .map(|value| KeyValueResponse::Exists {
                    is_present: value.is_some(),
                }),
            KeyValueOperation::ListKeys { prefix, cursor } => {
                // Every listing fits one page, so no other cursor is ever handed out.
                if *cursor != 0 {
                    return KeyValueResult::Err {
                        error: KeyValueError::CursorNotFound,
                    };
                }
                self.list(prefix)
                    .await
                    .map(|keys| KeyValueResponse::ListKeys {
                        keys,
                        next_cursor: 0,
                    })
            }
        };

        match response {
            Ok(response) => KeyValueResult::Ok { response },
            Err(error) => {
                tracing::warn!(%error, "preference store failed");
                KeyValueResult::Err {
                    error: error.into(),
                }
            }
        }
    }

    pub async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreFileError> {
        let entries = self.load().await?;
        Ok(entries.get(key).map(to_bytes))
    }

    /// Store `value` under `key`, returning what was there before.
    pub async fn set(&self, key: &str, value: &[u8]) -> Result<Option<Vec<u8>>, StoreFileError> {
        let mut entries = self.load().await?;
        let previous = entries.insert(
            key.to_string(),
            Value::String(String::from_utf8_lossy(value).into_owned()),
        );
        self.save(entries).await?;
        tracing::debug!(path = %self.path.display(), key, "preference saved");
        Ok(previous.as_ref().map(to_bytes))
    }

    pub async fn delete(&self, key: &str) -> Result<Option<Vec<u8>>, StoreFileError> {
        let mut entries = self.load().await?;
        let Some(previous) = entries.remove(key) else {
            return Ok(None);
        };
        self.save(entries).await?;
        Ok(Some(to_bytes(&previous)))
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>, StoreFileError> {
        let entries = self.load().await?;
        Ok(entries
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect())
    }

    async fn load(&self) -> Result<Map<String, Value>, StoreFileError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(source) => return Err(self.io_error(source)),
        };
        serde_json::from_slice(&bytes).map_err(|source| StoreFileError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    async fn save(&self, entries: Map<String, Value>) -> Result<(), StoreFileError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| self.io_error(source))?;
        }
        let json = serde_json::to_vec_pretty(&Value::Object(entries)).map_err(|source| {
            StoreFileError::Corrupt {
                path: self.path.clone(),
                source,
            }
        })?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|source| self.io_error(source))
    }

    fn io_error(&self, source: io::Error) -> StoreFileError {
        StoreFileError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

fn to_bytes(value: &Value) -> Vec<u8> {
    match value {
        Value::String(text) => text.as_bytes().to_vec(),
        other => other.to_string().into_bytes(),
    }
}
