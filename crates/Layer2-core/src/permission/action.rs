//! 권한 액션 이름

use parish_foundation::Error;
use std::fmt;
use std::str::FromStr;

/// 권한 검사 대상 액션
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    EditBelieverSelf,
    EditPriestMessage,
    CreateZone,
    CreateApv,
    EditParishDetails,
    EditTerritory,
    DeleteTerritory,
    AddFamily,
    EditFamily,
    DeleteFamily,
    ManageBelieversInFamily,
    ManageContributions,
    ViewFamilies,
}

impl Action {
    pub const ALL: [Action; 13] = [
        Action::EditBelieverSelf,
        Action::EditPriestMessage,
        Action::CreateZone,
        Action::CreateApv,
        Action::EditParishDetails,
        Action::EditTerritory,
        Action::DeleteTerritory,
        Action::AddFamily,
        Action::EditFamily,
        Action::DeleteFamily,
        Action::ManageBelieversInFamily,
        Action::ManageContributions,
        Action::ViewFamilies,
    ];

    /// 외부에서 쓰는 액션 이름
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::EditBelieverSelf => "EDIT_BELIEVER_SELF",
            Action::EditPriestMessage => "EDIT_PRIEST_MESSAGE",
            Action::CreateZone => "CREATE_ZONE",
            Action::CreateApv => "CREATE_APV",
            Action::EditParishDetails => "EDIT_PARISH_DETAILS",
            Action::EditTerritory => "EDIT_TERRITORY",
            Action::DeleteTerritory => "DELETE_TERRITORY",
            Action::AddFamily => "ADD_FAMILY",
            Action::EditFamily => "EDIT_FAMILY",
            Action::DeleteFamily => "DELETE_FAMILY",
            Action::ManageBelieversInFamily => "MANAGE_BELIEVERS_IN_FAMILY",
            Action::ManageContributions => "MANAGE_CONTRIBUTIONS",
            Action::ViewFamilies => "viewFamilies",
        }
    }

    /// 가족 편집 권한을 그대로 따르는 액션
    pub fn delegates_to_edit_family(&self) -> bool {
        matches!(
            self,
            Action::ManageBelieversInFamily | Action::ManageContributions
        )
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .iter()
            .copied()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| Error::InvalidInput(format!("Unknown action: {}", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_roundtrip() {
        for action in Action::ALL {
            assert_eq!(action.as_str().parse::<Action>().unwrap(), action);
        }
    }

    #[test]
    fn test_names_are_case_sensitive() {
        assert!("VIEW_FAMILIES".parse::<Action>().is_err());
        assert!("create_zone".parse::<Action>().is_err());
    }
}
