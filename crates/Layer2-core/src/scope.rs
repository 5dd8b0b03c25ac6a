//! 역할별 조회 범위 (USSD 목록에 보이는 가족/신자/APV)

use crate::permission::{has_permission, Action, PermissionContext};
use crate::store::DataStore;
use parish_foundation::{Believer, Family, Role, Territory, TerritoryType, User};

/// 사용자에게 보이는 가족 (저장 순서 유지)
///
/// - admin: 홈 본당(`territory_id`)의 가족
/// - parish_leader: 관리 본당의 가족
/// - zone_leader: 관리 구역 바로 아래 APV의 가족
/// - apv_leader: 관리 APV의 가족
/// - head_of_family: 자기 가족 하나
/// - 그 외, 또는 관리 지역이 없으면: 없음
pub fn families_for_user<'a, S>(user: &User, store: &'a S) -> Vec<&'a Family>
where
    S: DataStore + ?Sized,
{
    let owned = user.highest_level_territory_id.as_str();
    if owned.is_empty() {
        return Vec::new();
    }

    let families = store.families().iter();
    match user.role {
        Role::Admin => match user.territory_id.as_deref() {
            Some(home) => families.filter(|f| f.parish == home).collect(),
            None => Vec::new(),
        },
        Role::ParishLeader => families.filter(|f| f.parish == owned).collect(),
        Role::ZoneLeader => {
            let apvs = store.territories().apv_ids_in_zone(owned);
            families.filter(|f| apvs.contains(&f.apv_id)).collect()
        }
        Role::ApvLeader => families.filter(|f| f.apv_id == owned).collect(),
        Role::HeadOfFamily => families.filter(|f| f.id == owned).collect(),
        _ => Vec::new(),
    }
}

/// 가족 구성원 중 사용자가 다룰 수 있는 신자 (신자 저장 순서)
///
/// 네 지도자 역할은 모든 구성원, 가장은 자기 가족 구성원만.
pub fn believers_for_user<'a, S>(user: &User, family_id: &str, store: &'a S) -> Vec<&'a Believer>
where
    S: DataStore + ?Sized,
{
    let Some(family) = store.family(family_id) else {
        return Vec::new();
    };

    let allowed = user.role.is_family_leader()
        || (user.role == Role::HeadOfFamily && user.owns(&family.id));
    if !allowed {
        return Vec::new();
    }
    store.members_of(family)
}

/// 사용자가 가족을 추가할 수 있는 APV (`ADD_FAMILY`)
///
/// 홈 본당이 있으면 그 본당 아래 APV만 후보로 본다.
pub fn apvs_for_user<'a, S>(user: &User, store: &'a S) -> Vec<&'a Territory>
where
    S: DataStore + ?Sized,
{
    let index = store.territories();
    let candidates = match user.territory_id.as_deref() {
        Some(home) if index.find_by_id(home).is_some() => {
            index.descendants_of_kind(home, TerritoryType::Apv)
        }
        _ => index.of_kind(TerritoryType::Apv),
    };

    candidates
        .into_iter()
        .filter(|apv| has_permission(Some(user), Action::AddFamily, &PermissionContext::on(*apv)))
        .collect()
}
