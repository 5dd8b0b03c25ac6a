//! Parish Config - 통합 설정
//!
//! 글로벌(<config_dir>/parish/config.json) + 프로젝트(.parish/config.json) 병합

use crate::storage::JsonStore;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// 설정 파일명
pub const PARISH_CONFIG_FILE: &str = "config.json";

/// 기본 데이터 파일명
pub const DEFAULT_DATA_FILE: &str = "data.json";

// ============================================================================
// Parish Config (통합)
// ============================================================================

/// Liberstatus 통합 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParishConfig {
    /// 버전 (마이그레이션용)
    #[serde(default = "default_version")]
    pub version: u32,

    /// 프로젝트 저장소 안의 데이터 파일명
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_file: Option<String>,

    /// 메시지 카탈로그 오버라이드 (JSON)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale_file: Option<PathBuf>,

    /// 단말 에뮬레이터 기본 로그인 사용자
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_user: Option<String>,

    /// USSD 설정
    #[serde(default)]
    pub ussd: UssdSettings,
}

impl ParishConfig {
    pub fn new() -> Self {
        Self {
            version: default_version(),
            ..Default::default()
        }
    }

    // ========================================================================
    // Load
    // ========================================================================

    /// 글로벌 → 프로젝트 순으로 병합 (없는 저장소는 건너뜀)
    pub fn load() -> Result<Self> {
        let mut config = Self::new();
        for store in [JsonStore::global().ok(), JsonStore::current_project().ok()]
            .into_iter()
            .flatten()
        {
            config.merge_from(&store)?;
        }
        Ok(config)
    }

    /// 특정 저장소의 설정 병합
    pub fn merge_from(&mut self, store: &JsonStore) -> Result<()> {
        if let Some(other) = store.load_optional::<ParishConfig>(PARISH_CONFIG_FILE)? {
            debug!(path = %store.file_path(PARISH_CONFIG_FILE).display(), "Loaded config");
            self.merge(other);
        }
        Ok(())
    }

    // ========================================================================
    // Merge
    // ========================================================================

    /// 다른 설정과 병합 (other가 우선)
    pub fn merge(&mut self, other: ParishConfig) {
        if other.data_file.is_some() {
            self.data_file = other.data_file;
        }
        if other.locale_file.is_some() {
            self.locale_file = other.locale_file;
        }
        if other.default_user.is_some() {
            self.default_user = other.default_user;
        }
        self.ussd.merge(other.ussd);
    }

    pub fn data_file(&self) -> &str {
        self.data_file.as_deref().unwrap_or(DEFAULT_DATA_FILE)
    }
}

fn default_version() -> u32 {
    1
}

// ============================================================================
// USSD Settings
// ============================================================================

/// 세션 슬롯 범위
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionScope {
    /// 호출자(사용자)별 세션
    #[default]
    PerCaller,
    /// 단일 단말 (프로세스 전체에 세션 하나)
    SingleSeat,
}

/// USSD 프로토콜 설정
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UssdSettings {
    /// 세션 시작 코드
    #[serde(default = "default_start_code")]
    pub start_code: String,

    /// 목록 한 화면당 항목 수
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// 뒤로가기 기록 최대 길이
    #[serde(default = "default_max_history")]
    pub max_history: usize,

    #[serde(default)]
    pub session_scope: SessionScope,
}

impl Default for UssdSettings {
    fn default() -> Self {
        Self {
            start_code: default_start_code(),
            page_size: default_page_size(),
            max_history: default_max_history(),
            session_scope: SessionScope::default(),
        }
    }
}

impl UssdSettings {
    /// 다른 설정과 병합 (기본값이 아닌 항목만)
    pub fn merge(&mut self, other: UssdSettings) {
        let defaults = UssdSettings::default();
        if other.start_code != defaults.start_code {
            self.start_code = other.start_code;
        }
        if other.page_size != defaults.page_size {
            self.page_size = other.page_size;
        }
        if other.max_history != defaults.max_history {
            self.max_history = other.max_history;
        }
        if other.session_scope != defaults.session_scope {
            self.session_scope = other.session_scope;
        }
    }

    pub fn page_size(mut self, size: usize) -> Self {
        self.page_size = size.max(1);
        self
    }

    pub fn session_scope(mut self, scope: SessionScope) -> Self {
        self.session_scope = scope;
        self
    }
}

fn default_start_code() -> String {
    "*123#".to_string()
}

fn default_page_size() -> usize {
    5
}

fn default_max_history() -> usize {
    32
}
