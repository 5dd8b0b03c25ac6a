//! 메시지 카탈로그 (점 표기 키 → 템플릿)

use super::Localizer;
use crate::{Error, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, error};

/// 내장 영어 카탈로그
const ENGLISH_CATALOG: &str = include_str!("../../locales/en.json");

/// 메시지 카탈로그
///
/// 중첩 JSON을 `ussd.general.exit` 같은 점 표기 키로 평탄화해 보관한다.
/// 문자열 배열은 줄바꿈으로 이어 붙인다.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    locale: String,
    entries: HashMap<String, String>,
}

impl Catalog {
    pub fn empty(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            entries: HashMap::new(),
        }
    }

    /// 내장 영어 카탈로그
    pub fn english() -> Self {
        Self::from_json_str("en", ENGLISH_CATALOG).unwrap_or_else(|e| {
            error!("Embedded catalog is invalid: {}", e);
            Self::empty("en")
        })
    }

    /// JSON 문자열에서 생성
    pub fn from_json_str(locale: impl Into<String>, json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        let mut catalog = Self::empty(locale);
        flatten(&value, String::new(), &mut catalog.entries)?;
        Ok(catalog)
    }

    /// JSON 파일에서 로드 (파일명 stem을 locale로 사용)
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        let locale = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("custom")
            .to_string();
        let catalog = Self::from_json_str(locale, &content)?;
        debug!(path = %path.display(), entries = catalog.len(), "Loaded catalog");
        Ok(catalog)
    }

    /// 다른 카탈로그와 병합 (other가 우선)
    pub fn merge(&mut self, other: Catalog) {
        self.locale = other.locale;
        self.entries.extend(other.entries);
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Localizer for Catalog {
    fn translate(&self, key: &str, params: &[(&str, &str)]) -> String {
        match self.get(key) {
            Some(template) => interpolate(template, params),
            // i18n 관례: 누락된 키는 키 자체를 반환
            None => key.to_string(),
        }
    }
}

/// `{{name}}` 치환
///
/// 템플릿을 한 번만 훑는다. 치환된 값 안의 `{{...}}`는 다시 해석하지 않고,
/// 파라미터에 없는 자리표시자는 그대로 둔다.
pub fn interpolate(template: &str, params: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        let Some(close) = after.find("}}") else {
            out.push_str(&rest[open..]);
            return out;
        };

        let name = &after[..close];
        match params.iter().find(|(key, _)| *key == name) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[open..open + 2 + close + 2]),
        }
        rest = &after[close + 2..];
    }
    out.push_str(rest);
    out
}
