use serde::Serialize;

/// Errors raised by the remote catalog client
///
/// Every variant is recoverable: the session catches them, keeps its prior state
/// and forwards a [`crate::services::Notice`] to the presentation layer.
#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("Transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Service error: {0}")]
    Service(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Discriminant of [`CatalogError`] that can be cloned and shipped to listeners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Transport,
    Service,
    NotFound,
}

impl CatalogError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::Transport(_) => ErrorKind::Transport,
            CatalogError::Service(_) => ErrorKind::Service,
            CatalogError::NotFound(_) => ErrorKind::NotFound,
        }
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        // reqwest reports body decoding problems through the same error type
        if err.is_decode() {
            CatalogError::Service(err.to_string())
        } else {
            CatalogError::Transport(err)
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Service(format!("Failed to parse response: {}", err))
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors raised by a storage backend
///
/// These never escape [`crate::db::PersistentStore`], which logs them and degrades
/// to "state lost on reload".
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_mapping() {
        assert_eq!(
            CatalogError::Service("bad".to_string()).kind(),
            ErrorKind::Service
        );
        assert_eq!(
            CatalogError::NotFound("tt0".to_string()).kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn test_json_error_becomes_service_error() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: CatalogError = err.into();
        assert_eq!(err.kind(), ErrorKind::Service);
        assert!(err.to_string().starts_with("Service error: Failed to parse response"));
    }

    #[test]
    fn test_error_kind_serialization() {
        let json = serde_json::to_string(&ErrorKind::NotFound).unwrap();
        assert_eq!(json, "\"not_found\"");
    }
}
