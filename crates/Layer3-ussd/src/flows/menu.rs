//! 역할별 메인 메뉴

use super::{FlowContext, Transition};
use crate::render::Screen;
use crate::step::Step;
use parish_core::{has_permission, Action, PermissionContext};
use parish_foundation::{keys, Role, Territory, TerritoryType};
use tracing::debug;

/// 역할 → 메인 메뉴 단계 (USSD 메뉴가 없는 역할은 None)
pub fn main_menu_step(role: Role) -> Option<Step> {
    match role {
        r if r.is_family_leader() => Some(Step::LeaderMainMenu),
        Role::HeadOfFamily => Some(Step::HofMainMenu),
        Role::Believer => Some(Step::BelieverMainMenu),
        _ => None,
    }
}

fn menu_prefix(role: Role) -> Option<&'static str> {
    match main_menu_step(role)? {
        Step::LeaderMainMenu => Some("ussd.leaderMenu"),
        Step::HofMainMenu => Some("ussd.headOfFamilyMenu"),
        _ => Some("ussd.believerMenu"),
    }
}

/// 인사말 + 메뉴 제목 + 선택지 + 종료
pub(super) fn render(ctx: &FlowContext) -> Screen {
    let Some(prefix) = menu_prefix(ctx.user.role) else {
        return Screen::Text(ctx.t(keys::PERMISSION_DENIED));
    };

    let welcome = ctx.tr(
        keys::MAIN_MENU_TITLE,
        &[
            ("username", &ctx.user.username),
            ("parishName", &ctx.path.parish_name),
            ("zoneName", &ctx.path.zone_name),
            ("territoryName", &ctx.path.territory_name),
        ],
    );
    let mut options = ctx.t(&format!("{}.options", prefix));
    if ctx.user.role.is_family_leader() {
        for (kind, key) in CREATION_OPTIONS {
            if creation_parent(kind, ctx).is_some() {
                options.push('\n');
                options.push_str(&ctx.t(key));
            }
        }
    }

    Screen::Text(format!(
        "{}\n{}\n{}\n{}",
        welcome,
        ctx.t(&format!("{}.title", prefix)),
        options,
        ctx.t(keys::EXIT)
    ))
}

// ============================================================================
// Leader
// ============================================================================

/// 9, 10은 생성 가능한 경우에만 메뉴에 보인다
const CREATION_OPTIONS: [(TerritoryType, &str); 2] = [
    (TerritoryType::Zone, "ussd.leaderMenu.createZoneOption"),
    (TerritoryType::Apv, "ussd.leaderMenu.createApvOption"),
];

pub(super) fn handle_leader(text: &str, ctx: &FlowContext) -> Transition {
    let next = match text {
        "1" => Step::ContributionSelectFamily,
        "2" => Step::ManageBelieverSelectFamily,
        "3" => Step::AddFamilySelectApv,
        "4" => Step::AddBelieverSelectFamily,
        "5" => Step::EditFamilySelectFamily,
        "6" => Step::DeleteFamilySelectFamily,
        "7" => Step::EditBelieverSelectFamily,
        "8" => Step::DeleteBelieverSelectFamily,
        "9" => return create_territory(TerritoryType::Zone, ctx),
        "10" => return create_territory(TerritoryType::Apv, ctx),
        _ => return ctx.invalid_option(),
    };
    Transition::Goto(next)
}

fn create_territory(kind: TerritoryType, ctx: &FlowContext) -> Transition {
    match creation_parent(kind, ctx) {
        Some(parent) => Transition::Goto(Step::CreateTerritoryEnterName {
            parent_id: parent.id.clone(),
            kind,
        }),
        // 메뉴에 없는 번호
        None => ctx.invalid_option(),
    }
}

/// 새 지역의 부모: 구역은 사용자 경로의 본당, APV는 관리 구역
///
/// 경로에 부모가 없거나 생성 권한이 없으면 None.
pub(super) fn creation_parent<'a>(
    kind: TerritoryType,
    ctx: &'a FlowContext,
) -> Option<&'a Territory> {
    let index = ctx.data().territories();
    let user = ctx.user;

    let parent = match kind {
        TerritoryType::Zone => {
            let anchor = user
                .territory_id
                .as_deref()
                .filter(|id| !id.is_empty())
                .unwrap_or(&user.highest_level_territory_id);
            index
                .ancestor_of_kind(anchor, TerritoryType::Parish)
                .or_else(|| {
                    index.ancestor_of_kind(&user.highest_level_territory_id, TerritoryType::Parish)
                })
        }
        _ => index.ancestor_of_kind(&user.highest_level_territory_id, TerritoryType::Zone),
    }?;

    let action = creation_action(kind);
    if !has_permission(Some(user), action, &PermissionContext::on(parent)) {
        debug!(user = %user.id, %action, target = %parent.id, "Territory creation not offered");
        return None;
    }
    Some(parent)
}

pub(super) fn creation_action(kind: TerritoryType) -> Action {
    match kind {
        TerritoryType::Zone => Action::CreateZone,
        _ => Action::CreateApv,
    }
}

// ============================================================================
// Head of family
// ============================================================================

pub(super) fn handle_head_of_family(text: &str, ctx: &FlowContext) -> Transition {
    if !matches!(text, "1" | "2" | "3" | "4" | "5") {
        return ctx.invalid_option();
    }

    let Some(family) = ctx.scoped_family(&ctx.user.highest_level_territory_id) else {
        return ctx.error();
    };
    let family_id = family.id;

    let next = match text {
        "1" => Step::EditFamilyEnterAddress { family_id },
        "2" => Step::ContributionSelectCategory { family_id },
        "3" => Step::AddBelieverEnterFirstName { family_id },
        "4" => Step::EditBelieverSelectBeliever { family_id },
        _ => Step::DeleteBelieverSelectBeliever { family_id },
    };
    Transition::Goto(next)
}

// ============================================================================
// Believer
// ============================================================================

pub(super) fn handle_believer(text: &str, ctx: &FlowContext) -> Transition {
    match text {
        "1" => Transition::Goto(Step::BelieverEditInfoSelectField),
        "2" => Transition::Goto(Step::BelieverUpdateSacramentSelect),
        _ => ctx.invalid_option(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_menu_by_role() {
        for role in [Role::Admin, Role::ParishLeader, Role::ZoneLeader, Role::ApvLeader] {
            assert_eq!(main_menu_step(role), Some(Step::LeaderMainMenu));
        }
        assert_eq!(main_menu_step(Role::HeadOfFamily), Some(Step::HofMainMenu));
        assert_eq!(main_menu_step(Role::Believer), Some(Step::BelieverMainMenu));
        assert_eq!(main_menu_step(Role::Priest), None);
        assert_eq!(main_menu_step(Role::Visitor), None);
    }
}
