//! 권한 정책 - (액션, 대상 타입, 부모 타입) → 조건 테이블
//!
//! 같은 액션의 여러 행은 OR로 평가한다. 테이블에 없는 조합은 거부.

use super::{Action, PermissionContext, Target};
use parish_foundation::{Role, TerritoryType, User};
use tracing::trace;

use TerritoryType::{Apv, Family, Parish, Zone};

/// 조건 함수가 보는 값들
pub struct Subjects<'a> {
    pub user: &'a User,
    pub target: &'a Target,
    pub parent: Option<&'a Target>,
}

impl Subjects<'_> {
    fn parent_id(&self) -> &str {
        self.parent.map(|p| p.id.as_str()).unwrap_or_default()
    }
}

/// 정책 테이블의 한 행
pub struct Rule {
    pub action: Action,
    /// 대상 타입 (None = 모든 타입)
    pub target: Option<TerritoryType>,
    /// 부모 타입 (Some이면 부모가 반드시 있어야 함)
    pub parent: Option<TerritoryType>,
    pub grant: fn(&Subjects) -> bool,
}

impl Rule {
    const fn new(
        action: Action,
        target: Option<TerritoryType>,
        parent: Option<TerritoryType>,
        grant: fn(&Subjects) -> bool,
    ) -> Self {
        Self {
            action,
            target,
            parent,
            grant,
        }
    }

    fn matches(&self, s: &Subjects) -> bool {
        if self.target.is_some_and(|kind| kind != s.target.kind) {
            return false;
        }
        if let Some(kind) = self.parent {
            match s.parent {
                Some(parent) if parent.kind == kind => {}
                _ => return false,
            }
        }
        (self.grant)(s)
    }
}

// ============================================================================
// 조건 함수
// ============================================================================

fn priest_owns_target(s: &Subjects) -> bool {
    s.user.role == Role::Priest && s.user.owns(&s.target.id)
}

fn parish_leader_owns_target(s: &Subjects) -> bool {
    s.user.role == Role::ParishLeader && s.user.owns(&s.target.id)
}

fn zone_leader_owns_or_acts_on_target(s: &Subjects) -> bool {
    s.user.role == Role::ZoneLeader && s.user.owns_or_acts_on(&s.target.id)
}

fn parish_leader_owns_parent(s: &Subjects) -> bool {
    s.user.role == Role::ParishLeader && s.user.owns(s.parent_id())
}

fn zone_leader_owns_parent(s: &Subjects) -> bool {
    s.user.role == Role::ZoneLeader && s.user.owns(s.parent_id())
}

fn apv_leader_owns_target(s: &Subjects) -> bool {
    s.user.role == Role::ApvLeader && s.user.owns(&s.target.id)
}

fn zone_leader_acts_on_target(s: &Subjects) -> bool {
    s.user.role == Role::ZoneLeader && s.user.acts_on(&s.target.id)
}

fn head_of_family_owns_target(s: &Subjects) -> bool {
    s.user.role == Role::HeadOfFamily && s.user.owns(&s.target.id)
}

fn apv_leader_owns_parent(s: &Subjects) -> bool {
    s.user.role == Role::ApvLeader && s.user.owns(s.parent_id())
}

fn zone_leader_acts_on_parent(s: &Subjects) -> bool {
    s.user.role == Role::ZoneLeader && s.user.acts_on(s.parent_id())
}

fn sees_every_family(s: &Subjects) -> bool {
    matches!(s.user.role, Role::Priest | Role::ParishLeader)
}

/// APV의 부모 구역을 관리하거나 해당 APV에 위임된 구역 지도자
fn zone_leader_over_apv(s: &Subjects) -> bool {
    if s.user.role != Role::ZoneLeader {
        return false;
    }
    let parent_is_owned = s
        .target
        .parent_id
        .as_deref()
        .is_some_and(|zone| s.user.owns(zone));
    parent_is_owned || s.user.acts_on(&s.target.id)
}

// ============================================================================
// 정책 테이블
// ============================================================================

pub static RULES: &[Rule] = &[
    Rule::new(Action::EditPriestMessage, Some(Parish), None, priest_owns_target),
    Rule::new(Action::CreateZone, Some(Parish), None, parish_leader_owns_target),
    Rule::new(Action::CreateApv, Some(Zone), None, zone_leader_owns_or_acts_on_target),
    Rule::new(Action::EditParishDetails, Some(Parish), None, parish_leader_owns_target),
    Rule::new(Action::EditTerritory, Some(Zone), Some(Parish), parish_leader_owns_parent),
    Rule::new(Action::EditTerritory, Some(Apv), Some(Zone), zone_leader_owns_parent),
    Rule::new(Action::DeleteTerritory, Some(Zone), Some(Parish), parish_leader_owns_parent),
    Rule::new(Action::DeleteTerritory, Some(Apv), Some(Zone), zone_leader_owns_parent),
    Rule::new(Action::AddFamily, Some(Apv), None, apv_leader_owns_target),
    Rule::new(Action::AddFamily, Some(Apv), None, zone_leader_acts_on_target),
    Rule::new(Action::EditFamily, Some(Family), Some(Apv), head_of_family_owns_target),
    Rule::new(Action::EditFamily, Some(Family), Some(Apv), apv_leader_owns_parent),
    Rule::new(Action::EditFamily, Some(Family), Some(Apv), zone_leader_acts_on_parent),
    Rule::new(Action::DeleteFamily, Some(Family), Some(Apv), apv_leader_owns_parent),
    Rule::new(Action::DeleteFamily, Some(Family), Some(Apv), head_of_family_owns_target),
    Rule::new(Action::ViewFamilies, None, None, sees_every_family),
    Rule::new(Action::ViewFamilies, Some(Apv), None, zone_leader_over_apv),
    Rule::new(Action::ViewFamilies, Some(Apv), None, apv_leader_owns_target),
];

// ============================================================================
// 평가
// ============================================================================

/// 권한 검사 (전체 함수, 절대 panic 하지 않음)
///
/// 1. 로그인하지 않은 사용자 → 거부
/// 2. admin → 허용
/// 3. `EDIT_BELIEVER_SELF` → 연결된 신자 ID 비교
/// 4. 그 외 액션은 대상 노드 필수
/// 5. `MANAGE_*` → `EDIT_FAMILY`와 동일
pub fn has_permission(user: Option<&User>, action: Action, ctx: &PermissionContext) -> bool {
    let Some(user) = user else {
        return false;
    };
    if user.role == Role::Admin {
        return true;
    }

    if action == Action::EditBelieverSelf {
        return match (ctx.believer, user.believer_id.as_deref()) {
            (Some(believer), Some(own)) => own == believer.id,
            _ => false,
        };
    }

    let Some(target) = ctx.target.as_ref() else {
        return false;
    };

    let action = if action.delegates_to_edit_family() {
        Action::EditFamily
    } else {
        action
    };

    let subjects = Subjects {
        user,
        target,
        parent: ctx.parent.as_ref(),
    };
    let granted = RULES
        .iter()
        .filter(|rule| rule.action == action)
        .any(|rule| rule.matches(&subjects));

    trace!(user = %user.id, %action, target = %target.id, granted, "Permission evaluated");
    granted
}

/// 이름으로 권한 검사 - 알 수 없는 이름은 admin이라도 거부
pub fn has_permission_named(user: Option<&User>, action: &str, ctx: &PermissionContext) -> bool {
    match action.parse::<Action>() {
        Ok(action) => has_permission(user, action, ctx),
        Err(_) => false,
    }
}
