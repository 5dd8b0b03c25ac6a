//! Domain model - 교구 행정 데이터 타입
//!
//! - `role`: 조직 계층 역할
//! - `territory`: 지역 단위 트리 노드
//! - `people`: 사용자, 신자, 가족, 헌금, 성사

mod people;
mod role;
mod territory;

pub use people::{
    Believer, BelieverField, BelieverStatus, Contribution, ContributionCategory, Family, Gender,
    Sacrament, User,
};
pub use role::Role;
pub use territory::{ExecTeam, Territory, TerritoryType};
