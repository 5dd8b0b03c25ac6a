//! 사용자, 신자, 가족, 헌금

use super::Role;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ============================================================================
// User
// ============================================================================

/// 로그인 사용자
///
/// 직접 관리하는 지역 단위는 최대 하나(`highest_level_territory_id`)이며,
/// 위임된 권한(`acting_permissions`)은 여러 개일 수 있다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,

    #[serde(default)]
    pub email: String,

    pub role: Role,

    pub username: String,

    #[serde(default)]
    pub highest_territory_level: String,

    #[serde(default)]
    pub highest_level_territory_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,

    /// 홈 본당 (화면 이동용)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub territory_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub believer_id: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub acting_permissions: BTreeSet<String>,
}

impl User {
    pub fn new(id: impl Into<String>, username: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            email: String::new(),
            role,
            username: username.into(),
            highest_territory_level: String::new(),
            highest_level_territory_id: String::new(),
            full_name: None,
            territory_id: None,
            contact_phone: None,
            believer_id: None,
            acting_permissions: BTreeSet::new(),
        }
    }

    pub fn owning(mut self, level: impl Into<String>, territory_id: impl Into<String>) -> Self {
        self.highest_territory_level = level.into();
        self.highest_level_territory_id = territory_id.into();
        self
    }

    pub fn home(mut self, parish_id: impl Into<String>) -> Self {
        self.territory_id = Some(parish_id.into());
        self
    }

    pub fn linked_to(mut self, believer_id: impl Into<String>) -> Self {
        self.believer_id = Some(believer_id.into());
        self
    }

    pub fn acting_on(mut self, territory_id: impl Into<String>) -> Self {
        self.acting_permissions.insert(territory_id.into());
        self
    }

    /// 직접 관리하는 지역 단위인지
    pub fn owns(&self, territory_id: &str) -> bool {
        !self.highest_level_territory_id.is_empty() && self.highest_level_territory_id == territory_id
    }

    /// 위임 권한이 있는지
    pub fn acts_on(&self, territory_id: &str) -> bool {
        self.acting_permissions.contains(territory_id)
    }

    /// 직접 관리 또는 위임 (OR)
    pub fn owns_or_acts_on(&self, territory_id: &str) -> bool {
        self.owns(territory_id) || self.acts_on(territory_id)
    }
}

// ============================================================================
// Believer
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BelieverStatus {
    #[default]
    Active,
    Inactive,
    Deceased,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[default]
    Male,
    Female,
}

/// 신자 기록 (성사 여부/일자 포함)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Believer {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    pub place_of_birth: String,
    pub gender: Gender,
    pub contact_phone: String,
    pub contact_email: String,
    pub residential_address: String,
    pub family_id: String,
    pub relationship_to_head: String,
    pub civil_status: String,
    pub occupation: String,
    pub notes: String,

    pub is_baptized: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baptism_date: Option<String>,
    pub is_first_confession: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_confession_date: Option<String>,
    pub is_first_communion: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_communion_date: Option<String>,
    pub is_renewal_baptism: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub renewal_baptism_date: Option<String>,
    pub is_confirmed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmation_date: Option<String>,
    pub is_married_sacramentally: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marriage_date: Option<String>,

    /// 본당 ID (빠른 필터링용 비정규화)
    pub parish: String,
    pub status: BelieverStatus,
}

impl Believer {
    pub fn new(
        id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            ..Default::default()
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// 성사
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Sacrament {
    Baptism,
    FirstConfession,
    FirstCommunion,
    RenewalBaptism,
    Confirmation,
    Marriage,
}

impl Sacrament {
    /// USSD 메뉴에서 갱신 가능한 성사 (닫힌 집합)
    pub const USSD_OPTIONS: [Sacrament; 3] =
        [Sacrament::Baptism, Sacrament::Confirmation, Sacrament::Marriage];

    /// 카탈로그 키 (`ussd.sacraments.<key>`)
    pub fn key(&self) -> &'static str {
        match self {
            Sacrament::Baptism => "baptism",
            Sacrament::FirstConfession => "firstConfession",
            Sacrament::FirstCommunion => "firstCommunion",
            Sacrament::RenewalBaptism => "renewalBaptism",
            Sacrament::Confirmation => "confirmation",
            Sacrament::Marriage => "marriage",
        }
    }

    /// 성사 플래그와 일자를 함께 기록
    pub fn record(&self, believer: &mut Believer, date: &str) {
        let date = Some(date.to_string());
        match self {
            Sacrament::Baptism => {
                believer.is_baptized = true;
                believer.baptism_date = date;
            }
            Sacrament::FirstConfession => {
                believer.is_first_confession = true;
                believer.first_confession_date = date;
            }
            Sacrament::FirstCommunion => {
                believer.is_first_communion = true;
                believer.first_communion_date = date;
            }
            Sacrament::RenewalBaptism => {
                believer.is_renewal_baptism = true;
                believer.renewal_baptism_date = date;
            }
            Sacrament::Confirmation => {
                believer.is_confirmed = true;
                believer.confirmation_date = date;
            }
            Sacrament::Marriage => {
                believer.is_married_sacramentally = true;
                believer.marriage_date = date;
            }
        }
    }

    /// 기록된 일자
    pub fn date_of<'a>(&self, believer: &'a Believer) -> Option<&'a str> {
        match self {
            Sacrament::Baptism => believer.baptism_date.as_deref(),
            Sacrament::FirstConfession => believer.first_confession_date.as_deref(),
            Sacrament::FirstCommunion => believer.first_communion_date.as_deref(),
            Sacrament::RenewalBaptism => believer.renewal_baptism_date.as_deref(),
            Sacrament::Confirmation => believer.confirmation_date.as_deref(),
            Sacrament::Marriage => believer.marriage_date.as_deref(),
        }
    }
}

/// USSD로 수정 가능한 신자 필드 (닫힌 집합)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BelieverField {
    FirstName,
    LastName,
    DateOfBirth,
}

impl BelieverField {
    pub const ALL: [BelieverField; 3] = [
        BelieverField::FirstName,
        BelieverField::LastName,
        BelieverField::DateOfBirth,
    ];

    /// 카탈로그 키 (`ussd.fields.<key>`)
    pub fn key(&self) -> &'static str {
        match self {
            BelieverField::FirstName => "firstName",
            BelieverField::LastName => "lastName",
            BelieverField::DateOfBirth => "dateOfBirth",
        }
    }

    pub fn get<'a>(&self, believer: &'a Believer) -> &'a str {
        match self {
            BelieverField::FirstName => &believer.first_name,
            BelieverField::LastName => &believer.last_name,
            BelieverField::DateOfBirth => &believer.date_of_birth,
        }
    }

    /// 해당 필드만 변경
    pub fn apply(&self, believer: &mut Believer, value: impl Into<String>) {
        let value = value.into();
        match self {
            BelieverField::FirstName => believer.first_name = value,
            BelieverField::LastName => believer.last_name = value,
            BelieverField::DateOfBirth => believer.date_of_birth = value,
        }
    }
}

// ============================================================================
// Family & Contribution
// ============================================================================

/// 헌금 종류 (닫힌 집합)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContributionCategory {
    Tithe,
    Donation,
    Seminera,
    #[serde(rename = "Fetim-piangonana")]
    FetimPiangonana,
    #[serde(rename = "Hasin'Andriamanitra (Paka)")]
    HasinAndriamanitra,
}

impl ContributionCategory {
    pub const ALL: [ContributionCategory; 5] = [
        ContributionCategory::Tithe,
        ContributionCategory::Donation,
        ContributionCategory::Seminera,
        ContributionCategory::FetimPiangonana,
        ContributionCategory::HasinAndriamanitra,
    ];

    /// 카탈로그 키 (`ussd.categories.<key>`)
    pub fn key(&self) -> &'static str {
        match self {
            ContributionCategory::Tithe => "tithe",
            ContributionCategory::Donation => "donation",
            ContributionCategory::Seminera => "seminera",
            ContributionCategory::FetimPiangonana => "fetimPiangonana",
            ContributionCategory::HasinAndriamanitra => "hasinAndriamanitra",
        }
    }

    /// 저장 형식 이름
    pub fn name(&self) -> &'static str {
        match self {
            ContributionCategory::Tithe => "Tithe",
            ContributionCategory::Donation => "Donation",
            ContributionCategory::Seminera => "Seminera",
            ContributionCategory::FetimPiangonana => "Fetim-piangonana",
            ContributionCategory::HasinAndriamanitra => "Hasin'Andriamanitra (Paka)",
        }
    }
}

/// 헌금 기록
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
    pub id: String,
    pub date: String,
    pub category: ContributionCategory,
    pub amount: u64,
}

/// 가족 (APV 소속)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Family {
    pub id: String,
    /// 가장 (Believer ID)
    pub head_of_family: String,
    /// 구성원 (가장 포함, 순서 유지)
    pub members: Vec<String>,
    pub address: String,
    pub apv_id: String,
    pub parish: String,
    pub contributions: Vec<Contribution>,
}

impl Family {
    pub fn has_member(&self, believer_id: &str) -> bool {
        self.members.iter().any(|m| m == believer_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_ownership_and_delegation() {
        let user = User::new("U1", "Rakoto", Role::ZoneLeader)
            .owning("ZONE", "ZONE001")
            .acting_on("APV003");

        assert!(user.owns("ZONE001"));
        assert!(!user.owns("APV003"));
        assert!(user.acts_on("APV003"));
        assert!(user.owns_or_acts_on("APV003"));
        assert!(!user.owns_or_acts_on("APV001"));
    }

    #[test]
    fn test_empty_owner_never_matches() {
        let user = User::new("U2", "Visitor", Role::Visitor);
        assert!(!user.owns(""));
    }

    #[test]
    fn test_sacrament_record() {
        let mut believer = Believer::new("M1", "Tiana", "Rakoto");
        Sacrament::Confirmation.record(&mut believer, "2024-05-01");

        assert!(believer.is_confirmed);
        assert_eq!(Sacrament::Confirmation.date_of(&believer), Some("2024-05-01"));
        assert!(!believer.is_baptized);
    }

    #[test]
    fn test_field_apply_touches_one_field() {
        let mut believer = Believer::new("M1", "Tiana", "Rakoto");
        let before = believer.clone();
        BelieverField::LastName.apply(&mut believer, "Rabe");

        assert_eq!(believer.last_name, "Rabe");
        assert_eq!(believer.first_name, before.first_name);
        assert_eq!(believer.date_of_birth, before.date_of_birth);
    }

    #[test]
    fn test_contribution_category_wire_names() {
        let json = serde_json::to_string(&ContributionCategory::HasinAndriamanitra).unwrap();
        assert_eq!(json, "\"Hasin'Andriamanitra (Paka)\"");
        for category in ContributionCategory::ALL {
            let encoded = serde_json::to_string(&category).unwrap();
            assert_eq!(encoded, format!("\"{}\"", category.name()));
        }
    }
}
