//! 상태 머신 단계 - 각 단계가 자기 흐름의 누적 데이터를 가진다

use parish_foundation::{BelieverField, ContributionCategory, Sacrament, TerritoryType};

/// USSD 세션의 현재 단계
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    // ========================================================================
    // 진입 / 메인 메뉴
    // ========================================================================
    RoleRouter,
    LeaderMainMenu,
    HofMainMenu,
    BelieverMainMenu,

    // ========================================================================
    // 헌금
    // ========================================================================
    ContributionSelectFamily,
    ContributionSelectCategory {
        family_id: String,
    },
    ContributionEnterAmount {
        family_id: String,
        category: ContributionCategory,
    },
    ContributionEnterDate {
        family_id: String,
        category: ContributionCategory,
        amount: u64,
    },

    // ========================================================================
    // 신자 성사 관리
    // ========================================================================
    ManageBelieverSelectFamily,
    ManageBelieverSelectBeliever {
        family_id: String,
    },
    ManageBelieverSelectSacrament {
        family_id: String,
        believer_id: String,
    },
    ManageBelieverEnterDate {
        family_id: String,
        believer_id: String,
        sacrament: Sacrament,
    },

    // ========================================================================
    // 가족 추가 (새 가장 포함)
    // ========================================================================
    AddFamilySelectApv,
    AddFamilyEnterFirstName {
        apv_id: String,
    },
    AddFamilyEnterLastName {
        apv_id: String,
        first_name: String,
    },
    AddFamilyEnterAddress {
        apv_id: String,
        first_name: String,
        last_name: String,
    },

    // ========================================================================
    // 신자 추가
    // ========================================================================
    AddBelieverSelectFamily,
    AddBelieverEnterFirstName {
        family_id: String,
    },
    AddBelieverEnterLastName {
        family_id: String,
        first_name: String,
    },
    AddBelieverEnterDob {
        family_id: String,
        first_name: String,
        last_name: String,
    },

    // ========================================================================
    // 가족 편집 / 삭제
    // ========================================================================
    EditFamilySelectFamily,
    EditFamilyEnterAddress {
        family_id: String,
    },
    DeleteFamilySelectFamily,
    DeleteFamilyConfirm {
        family_id: String,
    },

    // ========================================================================
    // 신자 편집 / 삭제
    // ========================================================================
    EditBelieverSelectFamily,
    EditBelieverSelectBeliever {
        family_id: String,
    },
    EditBelieverSelectField {
        family_id: String,
        believer_id: String,
    },
    EditBelieverEnterValue {
        family_id: String,
        believer_id: String,
        field: BelieverField,
    },
    DeleteBelieverSelectFamily,
    DeleteBelieverSelectBeliever {
        family_id: String,
    },
    DeleteBelieverConfirm {
        family_id: String,
        believer_id: String,
    },

    // ========================================================================
    // 지역 단위 생성 (구역 / APV)
    // ========================================================================
    CreateTerritoryEnterName {
        parent_id: String,
        kind: TerritoryType,
    },

    // ========================================================================
    // 신자 본인
    // ========================================================================
    BelieverEditInfoSelectField,
    BelieverEditInfoEnterValue {
        field: BelieverField,
    },
    BelieverUpdateSacramentSelect,
    BelieverUpdateSacramentEnterDate {
        sacrament: Sacrament,
    },
}

impl Step {
    /// 로그용 단계 이름
    pub fn name(&self) -> &'static str {
        match self {
            Step::RoleRouter => "ROLE_ROUTER",
            Step::LeaderMainMenu => "LEADER_MAIN_MENU",
            Step::HofMainMenu => "HOF_MAIN_MENU",
            Step::BelieverMainMenu => "BELIEVER_MAIN_MENU",
            Step::ContributionSelectFamily => "CONTRIBUTION_SELECT_FAMILY",
            Step::ContributionSelectCategory { .. } => "CONTRIBUTION_SELECT_CATEGORY",
            Step::ContributionEnterAmount { .. } => "CONTRIBUTION_ENTER_AMOUNT",
            Step::ContributionEnterDate { .. } => "CONTRIBUTION_ENTER_DATE",
            Step::ManageBelieverSelectFamily => "BELIEVER_SELECT_FAMILY",
            Step::ManageBelieverSelectBeliever { .. } => "BELIEVER_SELECT_BELIEVER",
            Step::ManageBelieverSelectSacrament { .. } => "BELIEVER_SELECT_SACRAMENT",
            Step::ManageBelieverEnterDate { .. } => "BELIEVER_ENTER_SACRAMENT_DATE",
            Step::AddFamilySelectApv => "ADD_FAMILY_SELECT_APV",
            Step::AddFamilyEnterFirstName { .. } => "ADD_FAMILY_ENTER_FIRST_NAME",
            Step::AddFamilyEnterLastName { .. } => "ADD_FAMILY_ENTER_LAST_NAME",
            Step::AddFamilyEnterAddress { .. } => "ADD_FAMILY_ENTER_ADDRESS",
            Step::AddBelieverSelectFamily => "ADD_BELIEVER_SELECT_FAMILY",
            Step::AddBelieverEnterFirstName { .. } => "ADD_BELIEVER_ENTER_FIRST_NAME",
            Step::AddBelieverEnterLastName { .. } => "ADD_BELIEVER_ENTER_LAST_NAME",
            Step::AddBelieverEnterDob { .. } => "ADD_BELIEVER_ENTER_DOB",
            Step::EditFamilySelectFamily => "EDIT_FAMILY_SELECT_FAMILY",
            Step::EditFamilyEnterAddress { .. } => "EDIT_FAMILY_ENTER_ADDRESS",
            Step::DeleteFamilySelectFamily => "DELETE_FAMILY_SELECT_FAMILY",
            Step::DeleteFamilyConfirm { .. } => "DELETE_FAMILY_CONFIRM",
            Step::EditBelieverSelectFamily => "EDIT_BELIEVER_SELECT_FAMILY",
            Step::EditBelieverSelectBeliever { .. } => "EDIT_BELIEVER_SELECT_BELIEVER",
            Step::EditBelieverSelectField { .. } => "EDIT_BELIEVER_SELECT_FIELD",
            Step::EditBelieverEnterValue { .. } => "EDIT_BELIEVER_ENTER_VALUE",
            Step::DeleteBelieverSelectFamily => "DELETE_BELIEVER_SELECT_FAMILY",
            Step::DeleteBelieverSelectBeliever { .. } => "DELETE_BELIEVER_SELECT_BELIEVER",
            Step::DeleteBelieverConfirm { .. } => "DELETE_BELIEVER_CONFIRM",
            Step::CreateTerritoryEnterName { .. } => "CREATE_TERRITORY_ENTER_NAME",
            Step::BelieverEditInfoSelectField => "BELIEVER_EDIT_INFO_SELECT_FIELD",
            Step::BelieverEditInfoEnterValue { .. } => "BELIEVER_EDIT_INFO_ENTER_VALUE",
            Step::BelieverUpdateSacramentSelect => "BELIEVER_UPDATE_SACRAMENT_SELECT_SACRAMENT",
            Step::BelieverUpdateSacramentEnterDate { .. } => "BELIEVER_UPDATE_SACRAMENT_ENTER_DATE",
        }
    }
}

impl Default for Step {
    fn default() -> Self {
        Step::RoleRouter
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
