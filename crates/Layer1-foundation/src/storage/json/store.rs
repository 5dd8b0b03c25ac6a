//! JsonStore - 디렉토리 하나에 묶인 JSON 파일들
//!
//! 설정(`config.json`)과 교구 데이터(`data.json`)가 같은 저장소를 쓴다.
//! 저장은 임시 파일에 쓴 뒤 rename 하므로 중간에 끊겨도 이전 파일이 남는다.

use crate::{Error, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};
use tracing::trace;

/// 프로젝트 저장소 폴더 이름
pub const PROJECT_DIR_NAME: &str = ".parish";

#[derive(Debug, Clone)]
pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// 사용자 전역 저장소 (<config_dir>/parish/)
    pub fn global() -> Result<Self> {
        match dirs::config_dir() {
            Some(dir) => Ok(Self::new(dir.join("parish"))),
            None => Err(Error::Config("no user config directory on this system".into())),
        }
    }

    /// `<root>/.parish/`
    pub fn project(root: impl Into<PathBuf>) -> Self {
        Self::new(root.into().join(PROJECT_DIR_NAME))
    }

    pub fn current_project() -> Result<Self> {
        let cwd = std::env::current_dir()
            .map_err(|e| Error::Config(format!("working directory unavailable: {}", e)))?;
        Ok(Self::project(cwd))
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn file_path(&self, filename: &str) -> PathBuf {
        self.base_dir.join(filename)
    }

    pub fn exists(&self, filename: &str) -> bool {
        self.file_path(filename).is_file()
    }

    // ========================================================================
    // Read
    // ========================================================================

    pub fn load<T: DeserializeOwned>(&self, filename: &str) -> Result<T> {
        let path = self.file_path(filename);
        let bytes = std::fs::read(&path).map_err(|e| Error::storage(&path, e))?;
        let value = serde_json::from_slice(&bytes).map_err(|e| Error::storage(&path, e))?;
        trace!(path = %path.display(), bytes = bytes.len(), "Loaded JSON");
        Ok(value)
    }

    /// 파일이 없으면 None (있는데 깨졌으면 에러)
    pub fn load_optional<T: DeserializeOwned>(&self, filename: &str) -> Result<Option<T>> {
        if !self.exists(filename) {
            return Ok(None);
        }
        self.load(filename).map(Some)
    }

    // ========================================================================
    // Write
    // ========================================================================

    pub fn save<T: Serialize>(&self, filename: &str, data: &T) -> Result<()> {
        std::fs::create_dir_all(&self.base_dir).map_err(|e| Error::storage(&self.base_dir, e))?;

        let path = self.file_path(filename);
        let staging = self.file_path(&format!(".{}.tmp", filename));
        let mut content = serde_json::to_vec_pretty(data)?;
        content.push(b'\n');

        std::fs::write(&staging, &content).map_err(|e| Error::storage(&staging, e))?;
        std::fs::rename(&staging, &path).map_err(|e| Error::storage(&path, e))?;
        trace!(path = %path.display(), bytes = content.len(), "Saved JSON");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Apv {
        id: String,
        families: u32,
    }

    #[test]
    fn test_project_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::project(dir.path());
        assert!(store.base_dir().ends_with(PROJECT_DIR_NAME));

        let apv = Apv {
            id: "APV001".to_string(),
            families: 3,
        };
        store.save("apv.json", &apv).unwrap();

        assert!(store.exists("apv.json"));
        assert!(!store.exists(".apv.json.tmp"));
        assert_eq!(store.load::<Apv>("apv.json").unwrap(), apv);
    }

    #[test]
    fn test_missing_and_corrupt_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());

        assert!(store.load_optional::<Apv>("nope.json").unwrap().is_none());

        std::fs::write(store.file_path("broken.json"), "{ not json").unwrap();
        let err = store.load_optional::<Apv>("broken.json").unwrap_err();
        assert!(matches!(err, Error::Storage { .. }));
    }
}
