//! 권한 정책 테이블 - 행마다 허용/거부 케이스

use parish_core::{has_permission, has_permission_named, Action, PermissionContext, Target};
use parish_foundation::{Believer, Role, TerritoryType, User};

// ============================================================
// Fixtures
// ============================================================

fn user(role: Role, owned: &str) -> User {
    User::new("U1", "tester", role).owning("", owned)
}

fn parish(id: &str) -> Target {
    Target::new(id, TerritoryType::Parish)
}

fn zone(id: &str) -> Target {
    Target::new(id, TerritoryType::Zone).with_parent("PAR001")
}

fn apv(id: &str, zone: &str) -> Target {
    Target::new(id, TerritoryType::Apv).with_parent(zone)
}

fn family(id: &str, apv: &str) -> Target {
    Target::new(id, TerritoryType::Family).with_parent(apv)
}

fn on(target: Target) -> PermissionContext<'static> {
    PermissionContext::on(target)
}

fn on_with_parent(target: Target, parent: Target) -> PermissionContext<'static> {
    PermissionContext::on(target).parent(parent)
}

fn allowed(user: &User, action: Action, ctx: &PermissionContext) -> bool {
    has_permission(Some(user), action, ctx)
}

// ============================================================
// 공통 규칙
// ============================================================

#[test]
fn test_anonymous_is_always_denied() {
    let ctx = on(parish("PAR001"));
    for action in Action::ALL {
        assert!(!has_permission(None, action, &ctx), "{}", action);
    }
}

#[test]
fn test_admin_is_always_granted() {
    let admin = user(Role::Admin, "");
    for action in Action::ALL {
        assert!(allowed(&admin, action, &PermissionContext::new()), "{}", action);
    }
}

#[test]
fn test_unknown_action_denies_everyone() {
    let admin = user(Role::Admin, "PAR001");
    let ctx = on(parish("PAR001"));
    assert!(!has_permission_named(Some(&admin), "DELETE_EVERYTHING", &ctx));
    assert!(!has_permission_named(Some(&admin), "create_zone", &ctx));
    assert!(has_permission_named(Some(&admin), "CREATE_ZONE", &ctx));
}

#[test]
fn test_missing_target_denies() {
    let leader = user(Role::ParishLeader, "PAR001");
    assert!(!allowed(&leader, Action::CreateZone, &PermissionContext::new()));

    let priest = user(Role::Priest, "PAR001");
    assert!(!allowed(&priest, Action::ViewFamilies, &PermissionContext::new()));
}

// ============================================================
// EDIT_BELIEVER_SELF
// ============================================================

#[test]
fn test_edit_self_matches_linked_believer() {
    let me = Believer::new("M002", "Marie", "Rakoto");
    let other = Believer::new("M003", "Paul", "Rabe");
    let believer = User::new("U1", "marie", Role::Believer).linked_to("M002");

    assert!(allowed(&believer, Action::EditBelieverSelf, &PermissionContext::new().believer(&me)));
    assert!(!allowed(&believer, Action::EditBelieverSelf, &PermissionContext::new().believer(&other)));
    assert!(!allowed(&believer, Action::EditBelieverSelf, &PermissionContext::new()));

    let unlinked = User::new("U2", "ghost", Role::Believer);
    assert!(!allowed(&unlinked, Action::EditBelieverSelf, &PermissionContext::new().believer(&me)));
}

// ============================================================
// Territory
// ============================================================

#[test]
fn test_edit_priest_message() {
    let priest = user(Role::Priest, "PAR001");
    assert!(allowed(&priest, Action::EditPriestMessage, &on(parish("PAR001"))));
    assert!(!allowed(&priest, Action::EditPriestMessage, &on(parish("PAR002"))));
    assert!(!allowed(&priest, Action::EditPriestMessage, &on(zone("PAR001"))));

    let leader = user(Role::ParishLeader, "PAR001");
    assert!(!allowed(&leader, Action::EditPriestMessage, &on(parish("PAR001"))));
}

#[test]
fn test_create_zone() {
    let leader = user(Role::ParishLeader, "PAR001");
    assert!(allowed(&leader, Action::CreateZone, &on(parish("PAR001"))));
    assert!(!allowed(&leader, Action::CreateZone, &on(parish("PAR002"))));

    // APV 지도자가 소유하지 않은 본당에서 구역 생성 시도
    let apv_leader = user(Role::ApvLeader, "APV001");
    assert!(!allowed(&apv_leader, Action::CreateZone, &on(parish("PAR001"))));

    let acting = user(Role::ParishLeader, "PAR009").acting_on("PAR001");
    assert!(!allowed(&acting, Action::CreateZone, &on(parish("PAR001"))));
}

#[test]
fn test_create_apv() {
    let owner = user(Role::ZoneLeader, "ZONE001");
    assert!(allowed(&owner, Action::CreateApv, &on(zone("ZONE001"))));

    let deputy = user(Role::ZoneLeader, "ZONE002").acting_on("ZONE001");
    assert!(allowed(&deputy, Action::CreateApv, &on(zone("ZONE001"))));

    assert!(!allowed(&owner, Action::CreateApv, &on(zone("ZONE002"))));
    assert!(!allowed(&owner, Action::CreateApv, &on(parish("ZONE001"))));

    let apv_leader = user(Role::ApvLeader, "ZONE001");
    assert!(!allowed(&apv_leader, Action::CreateApv, &on(zone("ZONE001"))));
}

#[test]
fn test_edit_parish_details() {
    let leader = user(Role::ParishLeader, "PAR001");
    assert!(allowed(&leader, Action::EditParishDetails, &on(parish("PAR001"))));
    assert!(!allowed(&leader, Action::EditParishDetails, &on(parish("PAR002"))));

    let priest = user(Role::Priest, "PAR001");
    assert!(!allowed(&priest, Action::EditParishDetails, &on(parish("PAR001"))));
}

#[test]
fn test_edit_and_delete_zone_in_parish() {
    let leader = user(Role::ParishLeader, "PAR001");
    for action in [Action::EditTerritory, Action::DeleteTerritory] {
        assert!(allowed(&leader, action, &on_with_parent(zone("ZONE001"), parish("PAR001"))));
        assert!(!allowed(&leader, action, &on_with_parent(zone("ZONE001"), parish("PAR002"))));
        // 부모 없이는 거부
        assert!(!allowed(&leader, action, &on(zone("ZONE001"))));
    }
}

#[test]
fn test_edit_and_delete_apv_in_zone() {
    let leader = user(Role::ZoneLeader, "ZONE001");
    for action in [Action::EditTerritory, Action::DeleteTerritory] {
        assert!(allowed(&leader, action, &on_with_parent(apv("APV001", "ZONE001"), zone("ZONE001"))));
        assert!(!allowed(&leader, action, &on_with_parent(apv("APV003", "ZONE002"), zone("ZONE002"))));
    }

    // 위임만으로는 APV 편집 불가
    let deputy = user(Role::ZoneLeader, "ZONE002").acting_on("ZONE001");
    assert!(!allowed(
        &deputy,
        Action::EditTerritory,
        &on_with_parent(apv("APV001", "ZONE001"), zone("ZONE001"))
    ));
}

// ============================================================
// Family
// ============================================================

#[test]
fn test_add_family() {
    let apv_leader = user(Role::ApvLeader, "APV001");
    assert!(allowed(&apv_leader, Action::AddFamily, &on(apv("APV001", "ZONE001"))));
    assert!(!allowed(&apv_leader, Action::AddFamily, &on(apv("APV002", "ZONE001"))));

    let deputy = user(Role::ZoneLeader, "ZONE001").acting_on("APV003");
    assert!(allowed(&deputy, Action::AddFamily, &on(apv("APV003", "ZONE002"))));
    // 구역 소유만으로는 부족
    assert!(!allowed(&deputy, Action::AddFamily, &on(apv("APV001", "ZONE001"))));
}

#[test]
fn test_edit_family() {
    let ctx = on_with_parent(family("F001", "APV001"), apv("APV001", "ZONE001"));

    let hof = user(Role::HeadOfFamily, "F001");
    assert!(allowed(&hof, Action::EditFamily, &ctx));
    let other_hof = user(Role::HeadOfFamily, "F002");
    assert!(!allowed(&other_hof, Action::EditFamily, &ctx));

    let apv_leader = user(Role::ApvLeader, "APV001");
    assert!(allowed(&apv_leader, Action::EditFamily, &ctx));
    let other_apv = user(Role::ApvLeader, "APV002");
    assert!(!allowed(&other_apv, Action::EditFamily, &ctx));

    let deputy = user(Role::ZoneLeader, "ZONE002").acting_on("APV001");
    assert!(allowed(&deputy, Action::EditFamily, &ctx));
    let zone_owner = user(Role::ZoneLeader, "ZONE001");
    assert!(!allowed(&zone_owner, Action::EditFamily, &ctx));

    // 부모가 APV가 아니면 거부
    let bad_parent = on_with_parent(family("F001", "APV001"), zone("ZONE001"));
    assert!(!allowed(&apv_leader, Action::EditFamily, &bad_parent));
}

#[test]
fn test_delete_family() {
    let ctx = on_with_parent(family("F001", "APV001"), apv("APV001", "ZONE001"));

    assert!(allowed(&user(Role::ApvLeader, "APV001"), Action::DeleteFamily, &ctx));
    assert!(allowed(&user(Role::HeadOfFamily, "F001"), Action::DeleteFamily, &ctx));

    let deputy = user(Role::ZoneLeader, "ZONE002").acting_on("APV001");
    assert!(!allowed(&deputy, Action::DeleteFamily, &ctx));
    assert!(!allowed(&user(Role::ApvLeader, "APV002"), Action::DeleteFamily, &ctx));
}

#[test]
fn test_manage_actions_follow_edit_family() {
    let ctx = on_with_parent(family("F001", "APV001"), apv("APV001", "ZONE001"));
    let users = [
        user(Role::HeadOfFamily, "F001"),
        user(Role::HeadOfFamily, "F002"),
        user(Role::ApvLeader, "APV001"),
        user(Role::ZoneLeader, "ZONE001"),
        user(Role::ZoneLeader, "ZONE002").acting_on("APV001"),
        user(Role::Priest, "PAR001"),
    ];

    for u in &users {
        let edit = allowed(u, Action::EditFamily, &ctx);
        assert_eq!(allowed(u, Action::ManageBelieversInFamily, &ctx), edit);
        assert_eq!(allowed(u, Action::ManageContributions, &ctx), edit);
    }
}

// ============================================================
// viewFamilies
// ============================================================

#[test]
fn test_view_families_broad_roles() {
    let ctx = on(apv("APV003", "ZONE002"));
    assert!(allowed(&user(Role::Priest, "PAR001"), Action::ViewFamilies, &ctx));
    assert!(allowed(&user(Role::ParishLeader, "PAR001"), Action::ViewFamilies, &ctx));
    assert!(!allowed(&user(Role::Believer, ""), Action::ViewFamilies, &ctx));
}

#[test]
fn test_view_families_zone_leader() {
    let leader = user(Role::ZoneLeader, "ZONE001");
    assert!(allowed(&leader, Action::ViewFamilies, &on(apv("APV001", "ZONE001"))));
    assert!(!allowed(&leader, Action::ViewFamilies, &on(apv("APV003", "ZONE002"))));
    assert!(!allowed(&leader, Action::ViewFamilies, &on(zone("ZONE001"))));

    let deputy = leader.clone().acting_on("APV003");
    assert!(allowed(&deputy, Action::ViewFamilies, &on(apv("APV003", "ZONE002"))));
}

#[test]
fn test_view_families_apv_leader() {
    let leader = user(Role::ApvLeader, "APV001");
    assert!(allowed(&leader, Action::ViewFamilies, &on(apv("APV001", "ZONE001"))));
    assert!(!allowed(&leader, Action::ViewFamilies, &on(apv("APV002", "ZONE001"))));
}
