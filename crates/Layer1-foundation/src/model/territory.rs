//! 지역 단위 (대교구 → 교구 → 대리구 → 지구 → 본당 → 구역 → APV)

use serde::{Deserialize, Serialize};

/// 지역 단위 타입
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TerritoryType {
    Archdiocese,
    Diocese,
    Vicariate,
    District,
    Parish,
    Zone,
    Apv,
    Family,
    Member,
}

impl TerritoryType {
    /// ID 접두어 (새 노드 생성 시)
    pub fn id_prefix(&self) -> &'static str {
        match self {
            TerritoryType::Archdiocese => "ARC",
            TerritoryType::Diocese => "DIO",
            TerritoryType::Vicariate => "VIC",
            TerritoryType::District => "DIS",
            TerritoryType::Parish => "PAR",
            TerritoryType::Zone => "ZONE",
            TerritoryType::Apv => "APV",
            TerritoryType::Family => "F",
            TerritoryType::Member => "M",
        }
    }
}

impl std::fmt::Display for TerritoryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TerritoryType::Archdiocese => "ARCHDIOCESE",
            TerritoryType::Diocese => "DIOCESE",
            TerritoryType::Vicariate => "VICARIATE",
            TerritoryType::District => "DISTRICT",
            TerritoryType::Parish => "PARISH",
            TerritoryType::Zone => "ZONE",
            TerritoryType::Apv => "APV",
            TerritoryType::Family => "FAMILY",
            TerritoryType::Member => "MEMBER",
        };
        write!(f, "{}", name)
    }
}

/// 집행위원회 (직책 → User ID)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecTeam {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub president: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vice_president1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vice_president2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secretary1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secretary2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub treasurer1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub treasurer2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counselor: Option<String>,
}

impl ExecTeam {
    /// 채워진 직책 목록 (직책명, User ID)
    pub fn slots(&self) -> Vec<(&'static str, &str)> {
        [
            ("president", &self.president),
            ("vicePresident1", &self.vice_president1),
            ("vicePresident2", &self.vice_president2),
            ("secretary1", &self.secretary1),
            ("secretary2", &self.secretary2),
            ("treasurer1", &self.treasurer1),
            ("treasurer2", &self.treasurer2),
            ("counselor", &self.counselor),
        ]
        .into_iter()
        .filter_map(|(slot, user)| user.as_deref().map(|id| (slot, id)))
        .collect()
    }

    /// 해당 사용자가 위원회에 속하는지
    pub fn includes(&self, user_id: &str) -> bool {
        self.slots().iter().any(|(_, id)| *id == user_id)
    }
}

/// 지역 단위 노드
///
/// 직렬화 형식은 타입별 자식 컬렉션(`dioceses`, `zones`, `apvs` ...)을 가진 중첩 트리이다.
/// 누락된 컬렉션은 빈 목록으로 취급한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Territory {
    pub id: String,

    pub name: String,

    #[serde(rename = "type")]
    pub kind: TerritoryType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priest: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priest_message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leader_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exec_team: Option<ExecTeam>,

    // 자식 컬렉션
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dioceses: Vec<Territory>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vicariates: Vec<Territory>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub districts: Vec<Territory>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parishes: Vec<Territory>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub zones: Vec<Territory>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub apvs: Vec<Territory>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Territory>,
}

impl Territory {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: TerritoryType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            parent_id: None,
            priest: None,
            address: None,
            priest_message: None,
            leader_id: None,
            exec_team: None,
            dioceses: Vec::new(),
            vicariates: Vec::new(),
            districts: Vec::new(),
            parishes: Vec::new(),
            zones: Vec::new(),
            apvs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// 자식 추가 (builder)
    pub fn with_child(mut self, child: Territory) -> Self {
        self.child_collection_mut(child.kind).push(child);
        self
    }

    /// 자식 타입에 대응하는 컬렉션
    pub fn child_collection_mut(&mut self, kind: TerritoryType) -> &mut Vec<Territory> {
        match kind {
            TerritoryType::Diocese => &mut self.dioceses,
            TerritoryType::Vicariate => &mut self.vicariates,
            TerritoryType::District => &mut self.districts,
            TerritoryType::Parish => &mut self.parishes,
            TerritoryType::Zone => &mut self.zones,
            TerritoryType::Apv => &mut self.apvs,
            _ => &mut self.children,
        }
    }

    /// 모든 자식을 탐색 순서대로 꺼낸다
    /// (dioceses, vicariates, districts, parishes, zones, apvs, children)
    pub fn take_children(&mut self) -> Vec<Territory> {
        let mut all = Vec::new();
        all.append(&mut self.dioceses);
        all.append(&mut self.vicariates);
        all.append(&mut self.districts);
        all.append(&mut self.parishes);
        all.append(&mut self.zones);
        all.append(&mut self.apvs);
        all.append(&mut self.children);
        all
    }

    /// 자식이 하나라도 있는지
    pub fn has_children(&self) -> bool {
        !(self.dioceses.is_empty()
            && self.vicariates.is_empty()
            && self.districts.is_empty()
            && self.parishes.is_empty()
            && self.zones.is_empty()
            && self.apvs.is_empty()
            && self.children.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_tree_deserializes() {
        let json = r#"{
            "id": "PAR001",
            "name": "Ankadifotsy",
            "type": "PARISH",
            "zones": [{ "id": "ZONE001", "name": "Faritra 1", "type": "ZONE" }]
        }"#;
        let parish: Territory = serde_json::from_str(json).unwrap();

        assert_eq!(parish.kind, TerritoryType::Parish);
        assert_eq!(parish.zones.len(), 1);
        assert!(parish.zones[0].apvs.is_empty());
    }

    #[test]
    fn test_take_children_order() {
        let mut node = Territory::new("X", "x", TerritoryType::Parish)
            .with_child(Territory::new("A1", "apv", TerritoryType::Apv))
            .with_child(Territory::new("Z1", "zone", TerritoryType::Zone));

        let ids: Vec<_> = node.take_children().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["Z1", "A1"]);
        assert!(!node.has_children());
    }

    #[test]
    fn test_exec_team_slots() {
        let team = ExecTeam {
            president: Some("U1".to_string()),
            treasurer1: Some("U2".to_string()),
            ..Default::default()
        };
        assert_eq!(team.slots(), vec![("president", "U1"), ("treasurer1", "U2")]);
        assert!(team.includes("U2"));
        assert!(!team.includes("U3"));
    }
}
