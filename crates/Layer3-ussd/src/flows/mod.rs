//! 단계별 흐름 - 렌더링과 입력 처리
//!
//! 각 단계는 두 함수로 나뉜다:
//! - `render`: 단계에 들어올 때(또는 뒤로가기로 돌아올 때) 보여줄 화면
//! - `handle`: 그 단계에서 받은 입력 → `Transition`
//!
//! 렌더링이 단계 데이터만으로 가능하므로 `0`은 이전 단계를 그대로 복원한다.

mod believer;
mod contribution;
mod family;
mod menu;
mod profile;
mod territory;

pub use menu::main_menu_step;

use crate::input::selection;
use crate::render::{ListEntry, PagedList, Screen};
use crate::session::PathInfo;
use crate::step::Step;
use parish_core::{believers_for_user, families_for_user, DataStore};
use parish_foundation::{
    keys, Believer, BelieverField, ContributionCategory, Family, Localizer, Sacrament, User,
};
use tracing::warn;

// ============================================================================
// Context / Transition
// ============================================================================

/// 한 턴 동안 흐름 함수가 쓰는 협력자들
pub struct FlowContext<'a, 's> {
    pub user: &'a User,
    pub store: &'a mut (dyn DataStore + 's),
    pub i18n: &'a dyn Localizer,
    pub path: &'a PathInfo,
}

impl<'a, 's> FlowContext<'a, 's> {
    /// 읽기 전용 저장소
    pub fn data(&self) -> &(dyn DataStore + 's) {
        &*self.store
    }

    pub fn t(&self, key: &str) -> String {
        self.i18n.t(key)
    }

    pub fn tr(&self, key: &str, params: &[(&str, &str)]) -> String {
        self.i18n.translate(key, params)
    }

    // ------------------------------------------------------------------------
    // Transition helpers
    // ------------------------------------------------------------------------

    pub fn retry(&self, key: &str) -> Transition {
        Transition::Retry(self.t(key))
    }

    pub fn invalid_option(&self) -> Transition {
        self.retry(keys::INVALID_OPTION)
    }

    /// 필요한 도메인 연결이 없음 → 세션 종료
    pub fn error(&self) -> Transition {
        Transition::Fail(self.t(keys::ERROR_OCCURRED))
    }

    pub fn denied(&self) -> Transition {
        Transition::Fail(self.t(keys::PERMISSION_DENIED))
    }

    /// 확인 거절 → 메인 메뉴로
    pub fn cancelled(&self) -> Transition {
        Transition::GotoWith(Step::RoleRouter, self.t(keys::OPERATION_CANCELLED))
    }

    // ------------------------------------------------------------------------
    // Labels
    // ------------------------------------------------------------------------

    /// `Fam. <가장 성>`
    pub fn family_name(&self, family: &Family) -> String {
        let last_name = self
            .data()
            .believer(&family.head_of_family)
            .map(|b| b.last_name.clone())
            .unwrap_or_else(|| "N/A".to_string());
        self.tr(keys::FAMILY_NAME, &[("lastName", &last_name)])
    }

    pub fn category_name(&self, category: ContributionCategory) -> String {
        self.t(&format!("ussd.categories.{}", category.key()))
    }

    pub fn field_name(&self, field: BelieverField) -> String {
        self.t(&format!("ussd.fields.{}", field.key()))
    }

    pub fn sacrament_name(&self, sacrament: Sacrament) -> String {
        self.t(&format!("ussd.sacraments.{}", sacrament.key()))
    }

    // ------------------------------------------------------------------------
    // Scoped lookups (변경 직전 재확인용)
    // ------------------------------------------------------------------------

    /// 사용자 범위 안의 가족
    pub fn scoped_family(&self, family_id: &str) -> Option<Family> {
        let found = families_for_user(self.user, self.data())
            .into_iter()
            .find(|f| f.id == family_id)
            .cloned();
        if found.is_none() {
            warn!(user = %self.user.id, family = family_id, "Family outside user scope");
        }
        found
    }

    /// 사용자 범위 안의 가족 구성원
    pub fn scoped_believer(&self, family_id: &str, believer_id: &str) -> Option<Believer> {
        self.scoped_family(family_id)?;
        let found = believers_for_user(self.user, family_id, self.data())
            .into_iter()
            .find(|b| b.id == believer_id)
            .cloned();
        if found.is_none() {
            warn!(user = %self.user.id, family = family_id, believer = believer_id, "Believer outside user scope");
        }
        found
    }

    /// 사용자에게 연결된 신자 기록
    pub fn linked_believer(&self) -> Option<Believer> {
        let found = self
            .user
            .believer_id
            .as_deref()
            .and_then(|id| self.data().believer(id))
            .cloned();
        if found.is_none() {
            warn!(user = %self.user.id, "No believer linked to user");
        }
        found
    }
}

/// 입력 처리 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// 다음 단계로
    Goto(Step),
    /// 알림을 붙여 다음 단계로 (`RoleRouter`로 가면 이력 초기화)
    GotoWith(Step, String),
    /// 입력 오류 - 현재 단계를 메시지와 함께 다시 표시
    Retry(String),
    /// 완료 - 세션 종료
    Finish(String),
    /// 치명적 오류 - 세션 종료
    Fail(String),
}

/// 렌더링 중단 (세션 종료)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Abort {
    Denied,
    Error,
}

// ============================================================================
// Dispatch
// ============================================================================

/// 단계 화면
pub fn render(step: &Step, ctx: &FlowContext) -> Result<Screen, Abort> {
    match step {
        Step::RoleRouter | Step::LeaderMainMenu | Step::HofMainMenu | Step::BelieverMainMenu => {
            Ok(menu::render(ctx))
        }

        Step::ContributionSelectFamily
        | Step::ContributionSelectCategory { .. }
        | Step::ContributionEnterAmount { .. }
        | Step::ContributionEnterDate { .. } => contribution::render(step, ctx),

        Step::AddFamilySelectApv
        | Step::AddFamilyEnterFirstName { .. }
        | Step::AddFamilyEnterLastName { .. }
        | Step::AddFamilyEnterAddress { .. }
        | Step::EditFamilySelectFamily
        | Step::EditFamilyEnterAddress { .. }
        | Step::DeleteFamilySelectFamily
        | Step::DeleteFamilyConfirm { .. } => family::render(step, ctx),

        Step::ManageBelieverSelectFamily
        | Step::ManageBelieverSelectBeliever { .. }
        | Step::ManageBelieverSelectSacrament { .. }
        | Step::ManageBelieverEnterDate { .. }
        | Step::AddBelieverSelectFamily
        | Step::AddBelieverEnterFirstName { .. }
        | Step::AddBelieverEnterLastName { .. }
        | Step::AddBelieverEnterDob { .. }
        | Step::EditBelieverSelectFamily
        | Step::EditBelieverSelectBeliever { .. }
        | Step::EditBelieverSelectField { .. }
        | Step::EditBelieverEnterValue { .. }
        | Step::DeleteBelieverSelectFamily
        | Step::DeleteBelieverSelectBeliever { .. }
        | Step::DeleteBelieverConfirm { .. } => believer::render(step, ctx),

        Step::CreateTerritoryEnterName { .. } => territory::render(step, ctx),

        Step::BelieverEditInfoSelectField
        | Step::BelieverEditInfoEnterValue { .. }
        | Step::BelieverUpdateSacramentSelect
        | Step::BelieverUpdateSacramentEnterDate { .. } => profile::render(step, ctx),
    }
}

/// 단계 입력 처리
pub fn handle(step: &Step, text: &str, list: Option<&PagedList>, ctx: &mut FlowContext) -> Transition {
    match step {
        // 라우터는 렌더링 시 메인 메뉴로 정규화되므로 여기서는 메뉴를 다시 보여준다
        Step::RoleRouter => Transition::Goto(Step::RoleRouter),
        Step::LeaderMainMenu => menu::handle_leader(text, ctx),
        Step::HofMainMenu => menu::handle_head_of_family(text, ctx),
        Step::BelieverMainMenu => menu::handle_believer(text, ctx),

        Step::ContributionSelectFamily
        | Step::ContributionSelectCategory { .. }
        | Step::ContributionEnterAmount { .. }
        | Step::ContributionEnterDate { .. } => contribution::handle(step, text, list, ctx),

        Step::AddFamilySelectApv
        | Step::AddFamilyEnterFirstName { .. }
        | Step::AddFamilyEnterLastName { .. }
        | Step::AddFamilyEnterAddress { .. }
        | Step::EditFamilySelectFamily
        | Step::EditFamilyEnterAddress { .. }
        | Step::DeleteFamilySelectFamily
        | Step::DeleteFamilyConfirm { .. } => family::handle(step, text, list, ctx),

        Step::ManageBelieverSelectFamily
        | Step::ManageBelieverSelectBeliever { .. }
        | Step::ManageBelieverSelectSacrament { .. }
        | Step::ManageBelieverEnterDate { .. }
        | Step::AddBelieverSelectFamily
        | Step::AddBelieverEnterFirstName { .. }
        | Step::AddBelieverEnterLastName { .. }
        | Step::AddBelieverEnterDob { .. }
        | Step::EditBelieverSelectFamily
        | Step::EditBelieverSelectBeliever { .. }
        | Step::EditBelieverSelectField { .. }
        | Step::EditBelieverEnterValue { .. }
        | Step::DeleteBelieverSelectFamily
        | Step::DeleteBelieverSelectBeliever { .. }
        | Step::DeleteBelieverConfirm { .. } => believer::handle(step, text, list, ctx),

        Step::CreateTerritoryEnterName { .. } => territory::handle(step, text, ctx),

        Step::BelieverEditInfoSelectField
        | Step::BelieverEditInfoEnterValue { .. }
        | Step::BelieverUpdateSacramentSelect
        | Step::BelieverUpdateSacramentEnterDate { .. } => profile::handle(step, text, ctx),
    }
}

// ============================================================================
// Shared screens
// ============================================================================

/// 사용자 범위의 가족 목록
fn family_list(title_key: &str, ctx: &FlowContext) -> Screen {
    let entries = families_for_user(ctx.user, ctx.data())
        .into_iter()
        .map(|f| {
            let last_name = ctx
                .data()
                .believer(&f.head_of_family)
                .map(|b| b.last_name.as_str())
                .unwrap_or("N/A");
            let label = ctx.tr(
                keys::LIST_FAMILY,
                &[("lastName", last_name), ("address", &f.address)],
            );
            ListEntry::new(f.id.clone(), label)
        })
        .collect();

    Screen::List {
        title: ctx.t(title_key),
        entries,
        empty: ctx.t(keys::NO_FAMILIES_FOUND),
    }
}

/// 가족 구성원 목록
fn believer_list(title_key: &str, family_id: &str, ctx: &FlowContext) -> Result<Screen, Abort> {
    if ctx.data().family(family_id).is_none() {
        warn!(family = family_id, "Selected family no longer exists");
        return Err(Abort::Error);
    }

    let entries = believers_for_user(ctx.user, family_id, ctx.data())
        .into_iter()
        .map(|b| {
            let label = ctx.tr(
                keys::LIST_BELIEVER,
                &[("firstName", &b.first_name), ("lastName", &b.last_name)],
            );
            ListEntry::new(b.id.clone(), label)
        })
        .collect();

    Ok(Screen::List {
        title: ctx.t(title_key),
        entries,
        empty: ctx.t(keys::NO_BELIEVERS_FOUND),
    })
}

/// 닫힌 선택지 메뉴 (범주, 필드, 성사)
fn option_list(title: String, labels: Vec<(&str, String)>) -> Screen {
    Screen::List {
        title,
        entries: labels
            .into_iter()
            .map(|(id, label)| ListEntry::new(id, label))
            .collect(),
        empty: String::new(),
    }
}

fn field_list(title: String, ctx: &FlowContext) -> Screen {
    let labels = BelieverField::ALL
        .iter()
        .map(|f| (f.key(), ctx.field_name(*f)))
        .collect();
    option_list(title, labels)
}

fn sacrament_list(title: String, ctx: &FlowContext) -> Screen {
    let labels = Sacrament::USSD_OPTIONS
        .iter()
        .map(|s| (s.key(), ctx.sacrament_name(*s)))
        .collect();
    option_list(title, labels)
}

/// 예/아니오 확인
fn confirm(question: String, ctx: &FlowContext) -> Screen {
    Screen::Text(format!("{}\n{}", question, ctx.t(keys::CONFIRM_OPTIONS)))
}

fn believer_name(believer_id: &str, ctx: &FlowContext) -> Result<String, Abort> {
    ctx.data()
        .believer(believer_id)
        .map(Believer::full_name)
        .ok_or_else(|| {
            warn!(believer = believer_id, "Selected believer no longer exists");
            Abort::Error
        })
}

// ============================================================================
// Input helpers
// ============================================================================

/// 목록에서 선택한 항목 ID
fn picked(text: &str, list: Option<&PagedList>) -> Option<String> {
    let number = selection(text)?;
    list?.pick(number).map(|e| e.id.clone())
}

/// 닫힌 선택지에서 선택
fn chosen<T: Copy>(text: &str, options: &[T]) -> Option<T> {
    selection(text).and_then(|n| options.get(n - 1)).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chosen_is_one_based() {
        let options = ContributionCategory::ALL;
        assert_eq!(chosen("1", &options), Some(ContributionCategory::Tithe));
        assert_eq!(chosen("5", &options), Some(ContributionCategory::HasinAndriamanitra));
        assert_eq!(chosen("6", &options), None);
        assert_eq!(chosen("0", &options), None);
    }

    #[test]
    fn test_picked_uses_whole_list() {
        let list = PagedList::new(
            "t".into(),
            vec![ListEntry::new("F001", "a"), ListEntry::new("F002", "b")],
            "e".into(),
        );
        assert_eq!(picked("2", Some(&list)).as_deref(), Some("F002"));
        assert_eq!(picked("3", Some(&list)), None);
        assert_eq!(picked("1", None), None);
        assert_eq!(picked("x", Some(&list)), None);
    }
}
