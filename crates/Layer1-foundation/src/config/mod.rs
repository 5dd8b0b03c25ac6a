//! Config - 통합 설정 관리
//!
//! - `parish.rs` - ParishConfig 통합 설정 (USSD 설정 포함)

mod parish;

pub use parish::{
    ParishConfig, SessionScope, UssdSettings, DEFAULT_DATA_FILE, PARISH_CONFIG_FILE,
};
