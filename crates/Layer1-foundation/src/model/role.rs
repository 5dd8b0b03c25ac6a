//! 역할 (조직 계층)

use serde::{Deserialize, Serialize};

/// 사용자 역할
///
/// 교구 조직 계층에 대응하는 고정된 역할 집합. JSON에서는 snake_case 키로 저장된다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Visitor,
    Believer,
    HeadOfFamily,
    ApvLeader,
    ZoneLeader,
    Priest,
    ParishLeader,
    Admin,
    PastoralCouncilMember,
    HolyAssociationLeader,
    EconomicSocialCouncilLeader,
    HolyGroupLeader,
    CommitteeLeader,
    DistrictLeader,
    VicariateLeader,
    DioceseLeader,
    ArchdioceseLeader,
}

impl Role {
    pub const ALL: [Role; 17] = [
        Role::Visitor,
        Role::Believer,
        Role::HeadOfFamily,
        Role::ApvLeader,
        Role::ZoneLeader,
        Role::Priest,
        Role::ParishLeader,
        Role::Admin,
        Role::PastoralCouncilMember,
        Role::HolyAssociationLeader,
        Role::EconomicSocialCouncilLeader,
        Role::HolyGroupLeader,
        Role::CommitteeLeader,
        Role::DistrictLeader,
        Role::VicariateLeader,
        Role::DioceseLeader,
        Role::ArchdioceseLeader,
    ];

    /// 화면 표시용 직함
    pub fn title(&self) -> &'static str {
        match self {
            Role::Visitor => "Mpitsidika",
            Role::Believer => "Mpino Katolika",
            Role::HeadOfFamily => "Loham-Pianakaviana",
            Role::ApvLeader => "Mpitarika APV",
            Role::ZoneLeader => "Filohan'ny Faritra",
            Role::Priest => "Pretra",
            Role::ParishLeader => "Filohan'ny Filan-Kevitra Paroasy",
            Role::Admin => "Mpiandraikitra Feno",
            Role::PastoralCouncilMember => "Mpikambana Filan-Kevitra Pastoraly",
            Role::HolyAssociationLeader => "Mpitarika Fikambanana Masina",
            Role::EconomicSocialCouncilLeader => "Mpitarika CAES",
            Role::HolyGroupLeader => "Mpitarika Vovonana Masina",
            Role::CommitteeLeader => "Mpitarika Vaomiera",
            Role::DistrictLeader => "Mpitarika Distrika",
            Role::VicariateLeader => "Mpitarika Vikaria",
            Role::DioceseLeader => "Mpitarika Diosezy",
            Role::ArchdioceseLeader => "Mpitarika Arsidiosezy",
        }
    }

    /// 가족 단위 관리를 공유하는 네 가지 지도자 역할
    pub fn is_family_leader(&self) -> bool {
        matches!(
            self,
            Role::Admin | Role::ParishLeader | Role::ZoneLeader | Role::ApvLeader
        )
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_keys() {
        let json = serde_json::to_string(&Role::HeadOfFamily).unwrap();
        assert_eq!(json, "\"head_of_family\"");

        let role: Role = serde_json::from_str("\"zone_leader\"").unwrap();
        assert_eq!(role, Role::ZoneLeader);
    }

    #[test]
    fn test_family_leaders() {
        let leaders: Vec<_> = Role::ALL.iter().filter(|r| r.is_family_leader()).collect();
        assert_eq!(leaders.len(), 4);
        assert!(!Role::Priest.is_family_leader());
    }
}
