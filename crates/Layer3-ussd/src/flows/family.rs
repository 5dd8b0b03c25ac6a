//! 가족 추가 / 주소 편집 / 삭제

use super::{confirm, family_list, picked, Abort, FlowContext, Transition};
use crate::input::required_text;
use crate::render::{ListEntry, PagedList, Screen};
use crate::step::Step;
use parish_core::{apvs_for_user, has_permission, Action, NewBeliever, PermissionContext, Placement};
use parish_foundation::{keys, Believer};
use tracing::warn;

pub(super) fn render(step: &Step, ctx: &FlowContext) -> Result<Screen, Abort> {
    let screen = match step {
        // ------------------------------------------------------------------
        // 추가
        // ------------------------------------------------------------------
        Step::AddFamilySelectApv => {
            let entries = apvs_for_user(ctx.user, ctx.data())
                .into_iter()
                .map(|apv| {
                    let label = ctx.tr(keys::LIST_TERRITORY, &[("name", &apv.name)]);
                    ListEntry::new(apv.id.clone(), label)
                })
                .collect();
            Screen::List {
                title: ctx.t("ussd.addFamilyMenu.selectApv"),
                entries,
                empty: ctx.t(keys::NO_APVS_FOUND),
            }
        }
        Step::AddFamilyEnterFirstName { .. } => {
            Screen::Text(ctx.t("ussd.addFamilyMenu.enterFirstName"))
        }
        Step::AddFamilyEnterLastName { .. } => {
            Screen::Text(ctx.t("ussd.addFamilyMenu.enterLastName"))
        }
        Step::AddFamilyEnterAddress { .. } => Screen::Text(ctx.t("ussd.addFamilyMenu.enterAddress")),

        // ------------------------------------------------------------------
        // 편집 / 삭제
        // ------------------------------------------------------------------
        Step::EditFamilySelectFamily => family_list("ussd.editFamilyMenu.selectFamily", ctx),
        Step::EditFamilyEnterAddress { .. } => Screen::Text(ctx.t("ussd.editFamilyMenu.enterAddress")),
        Step::DeleteFamilySelectFamily => family_list("ussd.deleteFamilyMenu.selectFamily", ctx),
        Step::DeleteFamilyConfirm { family_id } => {
            let Some(family) = ctx.data().family(family_id) else {
                warn!(family = %family_id, "Selected family no longer exists");
                return Err(Abort::Error);
            };
            let question = ctx.tr(
                "ussd.deleteFamilyMenu.confirm",
                &[("familyName", &ctx.family_name(family))],
            );
            confirm(question, ctx)
        }

        _ => return Err(Abort::Error),
    };
    Ok(screen)
}

pub(super) fn handle(
    step: &Step,
    text: &str,
    list: Option<&PagedList>,
    ctx: &mut FlowContext,
) -> Transition {
    match step {
        Step::AddFamilySelectApv => match picked(text, list) {
            Some(apv_id) => Transition::Goto(Step::AddFamilyEnterFirstName { apv_id }),
            None => ctx.invalid_option(),
        },

        Step::AddFamilyEnterFirstName { apv_id } => match required_text(text) {
            Some(first_name) => Transition::Goto(Step::AddFamilyEnterLastName {
                apv_id: apv_id.clone(),
                first_name: first_name.to_string(),
            }),
            None => ctx.retry(keys::INVALID_INPUT),
        },

        Step::AddFamilyEnterLastName { apv_id, first_name } => match required_text(text) {
            Some(last_name) => Transition::Goto(Step::AddFamilyEnterAddress {
                apv_id: apv_id.clone(),
                first_name: first_name.clone(),
                last_name: last_name.to_string(),
            }),
            None => ctx.retry(keys::INVALID_INPUT),
        },

        Step::AddFamilyEnterAddress {
            apv_id,
            first_name,
            last_name,
        } => match required_text(text) {
            Some(address) => add_family(apv_id, first_name, last_name, address, ctx),
            None => ctx.retry(keys::INVALID_INPUT),
        },

        Step::EditFamilySelectFamily => match picked(text, list) {
            Some(family_id) => Transition::Goto(Step::EditFamilyEnterAddress { family_id }),
            None => ctx.invalid_option(),
        },

        Step::EditFamilyEnterAddress { family_id } => match required_text(text) {
            Some(address) => edit_address(family_id, address, ctx),
            None => ctx.retry(keys::INVALID_INPUT),
        },

        Step::DeleteFamilySelectFamily => match picked(text, list) {
            Some(family_id) => Transition::Goto(Step::DeleteFamilyConfirm { family_id }),
            None => ctx.invalid_option(),
        },

        Step::DeleteFamilyConfirm { family_id } => {
            if text == "1" {
                delete_family(family_id, ctx)
            } else {
                ctx.cancelled()
            }
        }

        _ => ctx.error(),
    }
}

// ============================================================================
// Mutations
// ============================================================================

/// 새 가장을 만들면서 그 가족도 생성
fn add_family(
    apv_id: &str,
    first_name: &str,
    last_name: &str,
    address: &str,
    ctx: &mut FlowContext,
) -> Transition {
    let Some(apv) = ctx.data().territory(apv_id) else {
        warn!(apv = apv_id, "Selected APV no longer exists");
        return ctx.error();
    };
    if !has_permission(Some(ctx.user), Action::AddFamily, &PermissionContext::on(apv)) {
        warn!(user = %ctx.user.id, apv = apv_id, "Add family denied");
        return ctx.denied();
    }

    let new = NewBeliever {
        believer: Believer::new("", first_name, last_name),
        placement: Placement::NewFamily {
            address: address.to_string(),
            apv_id: apv_id.to_string(),
        },
    };
    let head = match ctx.store.add_believer(new) {
        Ok(head) => head,
        Err(e) => {
            warn!(apv = apv_id, "Failed to add family: {}", e);
            return ctx.error();
        }
    };

    let family_name = ctx.tr(keys::FAMILY_NAME, &[("lastName", &head.last_name)]);
    Transition::Finish(ctx.tr("ussd.addFamilyMenu.success", &[("familyName", &family_name)]))
}

fn edit_address(family_id: &str, address: &str, ctx: &mut FlowContext) -> Transition {
    let Some(mut family) = ctx.scoped_family(family_id) else {
        return ctx.error();
    };

    family.address = address.to_string();
    if let Err(e) = ctx.store.update_family(family) {
        warn!(family = family_id, "Failed to update family: {}", e);
        return ctx.error();
    }
    Transition::Finish(ctx.tr("ussd.editFamilyMenu.success", &[("address", address)]))
}

fn delete_family(family_id: &str, ctx: &mut FlowContext) -> Transition {
    let Some(family) = ctx.scoped_family(family_id) else {
        return ctx.error();
    };

    // 삭제 전에 가장 이름 확보 (구성원도 함께 삭제됨)
    let family_name = ctx.family_name(&family);
    if let Err(e) = ctx.store.delete_family(&family.id) {
        warn!(family = family_id, "Failed to delete family: {}", e);
        return ctx.error();
    }
    Transition::Finish(ctx.tr("ussd.deleteFamilyMenu.success", &[("familyName", &family_name)]))
}
