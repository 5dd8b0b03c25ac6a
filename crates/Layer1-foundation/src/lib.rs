//! # parish-foundation
//!
//! Foundation layer for Liberstatus:
//! - Error: 중앙 에러 타입
//! - Model: 역할, 지역 단위 트리, 신자/가족/헌금
//! - I18n: 메시지 카탈로그 + Localizer
//! - Storage: JsonStore (설정 + 교구 데이터)
//! - Config: 통합 설정 (ParishConfig, UssdSettings)
//!
//! ## 아키텍처
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │  Layer4-cli      (단말 에뮬레이터)             │
//! │  Layer3-ussd     (세션 + 메뉴 상태 머신)        │
//! │  Layer2-core     (지역 인덱스, 권한, 저장소)     │
//! │  Layer1-foundation (모델, 설정, 카탈로그)       │
//! └───────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod i18n;
pub mod model;
pub mod storage;

// ============================================================================
// Error
// ============================================================================
pub use error::{Error, Result};

// ============================================================================
// Model (도메인 타입)
// ============================================================================
pub use model::{
    // People
    Believer,
    BelieverField,
    BelieverStatus,
    Contribution,
    ContributionCategory,
    Family,
    Gender,
    Sacrament,
    User,
    // Role
    Role,
    // Territory
    ExecTeam,
    Territory,
    TerritoryType,
};

// ============================================================================
// I18n (메시지 카탈로그)
// ============================================================================
pub use i18n::{interpolate, keys, Catalog, FnLocalizer, Localizer};

// ============================================================================
// Config (설정)
// ============================================================================
pub use config::{
    ParishConfig, SessionScope, UssdSettings, DEFAULT_DATA_FILE, PARISH_CONFIG_FILE,
};

// ============================================================================
// Storage (저장소)
// ============================================================================
pub use storage::{JsonStore, PROJECT_DIR_NAME};
