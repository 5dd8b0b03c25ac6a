//! 구역 / APV 생성

use super::menu::creation_action;
use super::{Abort, FlowContext, Transition};
use crate::input::required_text;
use crate::render::Screen;
use crate::step::Step;
use parish_core::{has_permission, PermissionContext};
use parish_foundation::{keys, Territory, TerritoryType};
use tracing::warn;

pub(super) fn render(step: &Step, ctx: &FlowContext) -> Result<Screen, Abort> {
    let Step::CreateTerritoryEnterName { parent_id, kind } = step else {
        return Err(Abort::Error);
    };
    let Some(parent) = ctx.data().territory(parent_id) else {
        warn!(parent = %parent_id, "Parent territory no longer exists");
        return Err(Abort::Error);
    };
    if !has_permission(Some(ctx.user), creation_action(*kind), &PermissionContext::on(parent)) {
        return Err(Abort::Denied);
    }

    let key = match kind {
        TerritoryType::Zone => "ussd.createTerritoryMenu.enterZoneName",
        _ => "ussd.createTerritoryMenu.enterApvName",
    };
    Ok(Screen::Text(ctx.tr(key, &[("parentName", &parent.name)])))
}

pub(super) fn handle(step: &Step, text: &str, ctx: &mut FlowContext) -> Transition {
    let Step::CreateTerritoryEnterName { parent_id, kind } = step else {
        return ctx.error();
    };
    let Some(name) = required_text(text) else {
        return ctx.retry(keys::INVALID_INPUT);
    };

    // 생성 직전 재확인
    let Some(parent) = ctx.data().territory(parent_id).cloned() else {
        warn!(parent = %parent_id, "Parent territory no longer exists");
        return ctx.error();
    };
    let action = creation_action(*kind);
    if !has_permission(Some(ctx.user), action, &PermissionContext::on(&parent)) {
        warn!(user = %ctx.user.id, %action, target = %parent.id, "Territory creation denied");
        return ctx.denied();
    }

    let created = match ctx.store.add_territory(&parent.id, Territory::new("", name, *kind)) {
        Ok(created) => created,
        Err(e) => {
            warn!(parent = %parent.id, "Failed to create territory: {}", e);
            return ctx.error();
        }
    };
    Transition::Finish(ctx.tr(
        "ussd.createTerritoryMenu.success",
        &[("name", &created.name), ("parentName", &parent.name)],
    ))
}
