//! 신자 본인 - 내 정보 수정, 내 성사 기록

use super::believer::field_value;
use super::{chosen, field_list, sacrament_list, Abort, FlowContext, Transition};
use crate::input::is_valid_date;
use crate::render::Screen;
use crate::step::Step;
use parish_core::{has_permission, Action, PermissionContext};
use parish_foundation::{keys, BelieverField, Sacrament};
use tracing::warn;

pub(super) fn render(step: &Step, ctx: &FlowContext) -> Result<Screen, Abort> {
    let screen = match step {
        Step::BelieverEditInfoSelectField => {
            field_list(ctx.t("ussd.editMyInfoMenu.selectField"), ctx)
        }
        Step::BelieverEditInfoEnterValue { field } => Screen::Text(ctx.tr(
            "ussd.editMyInfoMenu.enterNewValue",
            &[("fieldName", &ctx.field_name(*field))],
        )),
        Step::BelieverUpdateSacramentSelect => {
            sacrament_list(ctx.t("ussd.updateMySacramentMenu.selectSacrament"), ctx)
        }
        Step::BelieverUpdateSacramentEnterDate { .. } => {
            Screen::Text(ctx.t("ussd.updateMySacramentMenu.enterDate"))
        }
        _ => return Err(Abort::Error),
    };
    Ok(screen)
}

pub(super) fn handle(step: &Step, text: &str, ctx: &mut FlowContext) -> Transition {
    match step {
        Step::BelieverEditInfoSelectField => match chosen(text, &BelieverField::ALL) {
            Some(field) => Transition::Goto(Step::BelieverEditInfoEnterValue { field }),
            None => ctx.invalid_option(),
        },

        Step::BelieverEditInfoEnterValue { field } => match field_value(*field, text) {
            Ok(value) => edit_my_info(*field, value, ctx),
            Err(key) => ctx.retry(key),
        },

        Step::BelieverUpdateSacramentSelect => match chosen(text, &Sacrament::USSD_OPTIONS) {
            Some(sacrament) => Transition::Goto(Step::BelieverUpdateSacramentEnterDate { sacrament }),
            None => ctx.invalid_option(),
        },

        Step::BelieverUpdateSacramentEnterDate { sacrament } => {
            if !is_valid_date(text) {
                return ctx.retry(keys::INVALID_DATE);
            }
            record_my_sacrament(*sacrament, text, ctx)
        }

        _ => ctx.error(),
    }
}

fn edit_my_info(field: BelieverField, value: &str, ctx: &mut FlowContext) -> Transition {
    let Some(mut believer) = ctx.linked_believer() else {
        return ctx.error();
    };
    let check = PermissionContext::new().believer(&believer);
    if !has_permission(Some(ctx.user), Action::EditBelieverSelf, &check) {
        warn!(user = %ctx.user.id, believer = %believer.id, "Self edit denied");
        return ctx.denied();
    }

    field.apply(&mut believer, value);
    if let Err(e) = ctx.store.update_believer(believer) {
        warn!(user = %ctx.user.id, "Failed to update own record: {}", e);
        return ctx.error();
    }
    Transition::Finish(ctx.tr(
        "ussd.editMyInfoMenu.success",
        &[("fieldName", &ctx.field_name(field))],
    ))
}

fn record_my_sacrament(sacrament: Sacrament, date: &str, ctx: &mut FlowContext) -> Transition {
    let Some(believer) = ctx.linked_believer() else {
        return ctx.error();
    };
    let check = PermissionContext::new().believer(&believer);
    if !has_permission(Some(ctx.user), Action::EditBelieverSelf, &check) {
        warn!(user = %ctx.user.id, believer = %believer.id, "Self sacrament update denied");
        return ctx.denied();
    }

    if let Err(e) = ctx.store.update_believer_sacrament(&believer.id, sacrament, date) {
        warn!(user = %ctx.user.id, "Failed to record own sacrament: {}", e);
        return ctx.error();
    }
    Transition::Finish(ctx.tr(
        "ussd.updateMySacramentMenu.success",
        &[("sacramentName", &ctx.sacrament_name(sacrament))],
    ))
}
