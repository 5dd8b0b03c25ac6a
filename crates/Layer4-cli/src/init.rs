//! Liberstatus init command
//!
//! 샘플 교구 데이터로 프로젝트 저장소(.parish/)를 초기화한다.

use parish_core::sample_data;
use parish_foundation::{JsonStore, ParishConfig, PARISH_CONFIG_FILE};

/// 데이터 파일 생성 (이미 있으면 force일 때만 덮어씀)
pub fn init_project(store: &JsonStore, filename: &str, force: bool) -> anyhow::Result<()> {
    if store.exists(filename) && !force {
        println!("✓ Parish data already exists at {}.", store.file_path(filename).display());
        println!("  Use --force to reinitialize.");
        return Ok(());
    }

    println!("Initializing Liberstatus...");

    let data = sample_data();
    store.save(filename, &data)?;
    println!(
        "  Created {} ({} users, {} believers, {} families)",
        store.file_path(filename).display(),
        data.users.len(),
        data.believers.len(),
        data.families.len()
    );

    if !store.exists(PARISH_CONFIG_FILE) {
        let mut config = ParishConfig::new();
        config.data_file = Some(filename.to_string());
        store.save(PARISH_CONFIG_FILE, &config)?;
        println!("  Created {}", store.file_path(PARISH_CONFIG_FILE).display());
    }

    println!("\n✓ Done. Run 'parish users' to see who can sign in.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use parish_core::{DataStore, MemoryStore, ParishData};
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_sample_data_and_config() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::new(dir.path());

        init_project(&store, "data.json", false).unwrap();

        let loaded = MemoryStore::open(store.clone(), "data.json").unwrap();
        assert!(loaded.user("U_APV").is_some());
        assert!(loaded.family("F001").is_some());

        let config: ParishConfig = store.load(PARISH_CONFIG_FILE).unwrap();
        assert_eq!(config.data_file(), "data.json");
    }

    #[test]
    fn test_init_keeps_existing_data_without_force() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::new(dir.path());
        store.save("data.json", &ParishData::default()).unwrap();

        init_project(&store, "data.json", false).unwrap();
        let data: ParishData = store.load("data.json").unwrap();
        assert!(data.users.is_empty());

        init_project(&store, "data.json", true).unwrap();
        let data: ParishData = store.load("data.json").unwrap();
        assert!(!data.users.is_empty());
    }
}
