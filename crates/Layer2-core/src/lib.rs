//! parish-core: Core domain layer for Liberstatus
//!
//! Layer2 - 지역 트리, 권한, 조회 범위, 데이터 저장소
//!
//! # 주요 모듈
//!
//! - `territory`: arena 기반 TerritoryIndex (경로, 소속 신자 조회)
//! - `permission`: 역할/계층/위임 권한 정책 테이블
//! - `scope`: 역할별로 보이는 가족/신자/APV
//! - `store`: DataStore 기능 + MemoryStore + 샘플 데이터
//!
//! # 사용 예시
//!
//! ```ignore
//! use parish_core::{families_for_user, DataStore, MemoryStore};
//!
//! let store = MemoryStore::sample();
//! let user = store.user("U_ZONE").unwrap();
//! for family in families_for_user(user, &store) {
//!     println!("{} - {}", family.id, family.address);
//! }
//! ```

pub mod permission;
pub mod scope;
pub mod store;
pub mod territory;

// Re-exports: Permission
pub use permission::{has_permission, has_permission_named, Action, PermissionContext, Target};

// Re-exports: Scope
pub use scope::{apvs_for_user, believers_for_user, families_for_user};

// Re-exports: Store
pub use store::{
    sample_data, DataStore, MemoryStore, NewBeliever, NewContribution, NewFamily, ParishData,
    Placement,
};

// Re-exports: Territory
pub use territory::{TerritoryIndex, TerritoryTree};
