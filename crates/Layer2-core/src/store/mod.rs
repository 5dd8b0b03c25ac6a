//! DataStore - 교구 데이터 조회/변경 기능
//!
//! - `memory`: 메모리 + JSON 자동 저장 구현 (MemoryStore)
//! - `sample`: 데모용 샘플 데이터
//!
//! 변경 호출은 즉시 반영되며 트랜잭션은 없다.
//! 여러 필드를 바꾸는 도중 실패하면 앞선 변경은 남는다.

mod memory;
mod sample;

pub use memory::{MemoryStore, ParishData};
pub use sample::sample_data;

use crate::territory::TerritoryIndex;
use parish_foundation::{
    Believer, Contribution, ContributionCategory, Family, Result, Sacrament, Territory, User,
};

// ============================================================================
// 입력 타입
// ============================================================================

/// 새 헌금 기록 (ID는 저장소가 부여)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContribution {
    pub date: String,
    pub category: ContributionCategory,
    pub amount: u64,
}

/// 새 신자를 어느 가족에 넣을지
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// 기존 가족의 구성원으로
    ExistingFamily(String),
    /// 새 가족을 만들고 가장으로
    NewFamily { address: String, apv_id: String },
}

/// 새 신자 (ID와 `family_id`는 저장소가 채움)
#[derive(Debug, Clone)]
pub struct NewBeliever {
    pub believer: Believer,
    pub placement: Placement,
}

/// 새 가족 (ID는 저장소가 부여)
#[derive(Debug, Clone, Default)]
pub struct NewFamily {
    pub head_of_family: String,
    pub members: Vec<String>,
    pub address: String,
    pub apv_id: String,
    pub parish: String,
}

// ============================================================================
// DataStore
// ============================================================================

/// USSD 엔진이 사용하는 데이터 저장소 기능
pub trait DataStore {
    // ------------------------------------------------------------------------
    // Query
    // ------------------------------------------------------------------------

    fn users(&self) -> &[User];

    fn believers(&self) -> &[Believer];

    fn families(&self) -> &[Family];

    fn territories(&self) -> &TerritoryIndex;

    fn user(&self, id: &str) -> Option<&User> {
        self.users().iter().find(|u| u.id == id)
    }

    fn believer(&self, id: &str) -> Option<&Believer> {
        self.believers().iter().find(|b| b.id == id)
    }

    fn family(&self, id: &str) -> Option<&Family> {
        self.families().iter().find(|f| f.id == id)
    }

    fn territory(&self, id: &str) -> Option<&Territory> {
        self.territories().find_by_id(id)
    }

    fn path_to(&self, id: &str) -> Option<Vec<&Territory>> {
        self.territories().path_to(id)
    }

    /// 신자가 속한 가족 (`family_id` 우선, 없으면 구성원 목록 검색)
    fn family_of(&self, believer_id: &str) -> Option<&Family> {
        let by_link = self
            .believer(believer_id)
            .filter(|b| !b.family_id.is_empty())
            .and_then(|b| self.family(&b.family_id));
        by_link.or_else(|| self.families().iter().find(|f| f.has_member(believer_id)))
    }

    /// 신자의 본당 ID
    fn parish_of(&self, believer_id: &str) -> Option<&str> {
        self.believer(believer_id)
            .map(|b| b.parish.as_str())
            .filter(|p| !p.is_empty())
    }

    /// 가족 구성원 (신자 저장 순서)
    fn members_of(&self, family: &Family) -> Vec<&Believer> {
        self.believers()
            .iter()
            .filter(|b| family.has_member(&b.id))
            .collect()
    }

    // ------------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------------

    fn add_contribution_to_family(
        &mut self,
        family_id: &str,
        contribution: NewContribution,
    ) -> Result<Contribution>;

    /// 성사 플래그와 일자를 함께 기록
    fn update_believer_sacrament(
        &mut self,
        believer_id: &str,
        sacrament: Sacrament,
        date: &str,
    ) -> Result<()>;

    fn add_believer(&mut self, new: NewBeliever) -> Result<Believer>;

    /// ID가 같은 기록을 통째로 교체
    fn update_believer(&mut self, believer: Believer) -> Result<()>;

    /// 가족 구성원 목록과 연결된 사용자 계정도 함께 삭제
    fn delete_believer(&mut self, believer_id: &str) -> Result<()>;

    fn add_family(&mut self, family: NewFamily) -> Result<Family>;

    fn update_family(&mut self, family: Family) -> Result<()>;

    /// 구성원 신자와 그들의 사용자 계정도 함께 삭제
    fn delete_family(&mut self, family_id: &str) -> Result<()>;

    /// 이미 구성원이면 아무것도 하지 않음
    fn add_believer_to_family(&mut self, family_id: &str, believer_id: &str) -> Result<()>;

    /// 부모 아래에 지역 단위 추가 (빈 ID는 저장소가 부여)
    fn add_territory(&mut self, parent_id: &str, territory: Territory) -> Result<Territory>;

    /// 속성만 교체 (ID, 타입, 위치, 자식은 유지)
    fn update_territory(&mut self, territory: Territory) -> Result<()>;

    /// 하위 트리 전체 삭제
    fn delete_territory(&mut self, territory_id: &str) -> Result<Territory>;
}
