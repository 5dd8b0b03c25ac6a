//! Storage module for Liberstatus
//!
//! - `json`: JSON - 설정 및 교구 데이터 파일 저장/로드

mod json;

// JSON Storage (범용)
pub use json::{JsonStore, PROJECT_DIR_NAME};
