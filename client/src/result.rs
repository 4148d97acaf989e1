// Uniform success/error shape returned by every client-facing request.
use serde::Serialize;

use crate::error::{ClientError, ErrorKind};

/// Serializes as `{"status":"success","data":...}` or
/// `{"status":"error","error":"..."}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RequestResult<T> {
    Success {
        data: T,
    },
    Error {
        error: String,
        #[serde(skip)]
        kind: ErrorKind,
    },
}

impl<T> RequestResult<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, RequestResult::Success { .. })
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            RequestResult::Success { data } => Some(data),
            RequestResult::Error { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            RequestResult::Success { .. } => None,
            RequestResult::Error { error, .. } => Some(error),
        }
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            RequestResult::Success { .. } => None,
            RequestResult::Error { kind, .. } => Some(*kind),
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            RequestResult::Success { data } => Some(data),
            RequestResult::Error { .. } => None,
        }
    }
}

impl<T> From<Result<T, ClientError>> for RequestResult<T> {
    fn from(result: Result<T, ClientError>) -> Self {
        match result {
            Ok(data) => RequestResult::Success { data },
            Err(err) => RequestResult::Error {
                error: err.to_string(),
                kind: err.kind(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_serializes_with_status_tag() {
        let result = RequestResult::from(Ok::<u32, ClientError>(7));
        assert_eq!(serde_json::to_value(&result).unwrap(), json!({"status": "success", "data": 7}));
        assert!(result.is_success());
        assert_eq!(result.error(), None);
    }

    #[test]
    fn error_serializes_message_only() {
        let result = RequestResult::<u32>::from(Err(ClientError::Http {
            status: 500,
            status_text: "Internal Server Error".to_string(),
        }));
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({"status": "error", "error": "HTTP 500: Internal Server Error"})
        );
        assert_eq!(result.error_kind(), Some(ErrorKind::Http));
        assert_eq!(result.data(), None);
    }
}
