//! Liberstatus 에러
//!
//! 라이브러리 크레이트가 공유하는 단일 에러 타입. USSD 엔진은 이 에러를
//! 호출자에게 돌려주지 않고 표시 메시지로 바꾼다.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // 도메인 데이터
    // ========================================================================
    /// 조회한 레코드가 없음 (예: family 'F001')
    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },

    /// 트리/레코드 구조 규칙 위반
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ========================================================================
    // 설정 / 파일
    // ========================================================================
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error at {}: {reason}", .path.display())]
    Storage { path: PathBuf, reason: String },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Error::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn storage(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        Error::Storage {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// 화면에 그대로 보여줘도 되는 에러인지
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Error::NotFound { .. } | Error::Validation(_) | Error::InvalidInput(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = Error::not_found("family", "F001");
        assert_eq!(err.to_string(), "family 'F001' not found");
        assert!(err.is_user_facing());
    }

    #[test]
    fn test_storage_error_names_the_file() {
        let err = Error::storage("/tmp/parish/data.json", "disk full");
        assert_eq!(
            err.to_string(),
            "Storage error at /tmp/parish/data.json: disk full"
        );
        assert!(!err.is_user_facing());
    }
}
