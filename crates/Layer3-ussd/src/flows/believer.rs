//! 신자 흐름 - 성사 기록, 추가, 편집, 삭제
//!
//! 모두 "가족 선택 → (구성원 선택) → ..." 순서이며, 가장 메뉴에서는
//! 가족 선택을 건너뛰고 자기 가족으로 시작한다.

use super::{
    believer_list, believer_name, chosen, confirm, family_list, field_list, picked,
    sacrament_list, Abort, FlowContext, Transition,
};
use crate::input::{is_valid_date, required_text};
use crate::render::{PagedList, Screen};
use crate::step::Step;
use parish_core::{NewBeliever, Placement};
use parish_foundation::{keys, Believer, BelieverField, Sacrament};
use tracing::warn;

pub(super) fn render(step: &Step, ctx: &FlowContext) -> Result<Screen, Abort> {
    let screen = match step {
        // ------------------------------------------------------------------
        // 성사 기록
        // ------------------------------------------------------------------
        Step::ManageBelieverSelectFamily => {
            family_list("ussd.manageBelieverMenu.selectFamily", ctx)
        }
        Step::ManageBelieverSelectBeliever { family_id } => {
            believer_list("ussd.manageBelieverMenu.selectBeliever", family_id, ctx)?
        }
        Step::ManageBelieverSelectSacrament { believer_id, .. } => {
            let name = believer_name(believer_id, ctx)?;
            let title = ctx.tr(
                "ussd.manageBelieverMenu.selectSacrament",
                &[("believerName", &name)],
            );
            sacrament_list(title, ctx)
        }
        Step::ManageBelieverEnterDate { .. } => {
            Screen::Text(ctx.t("ussd.manageBelieverMenu.enterDate"))
        }

        // ------------------------------------------------------------------
        // 추가
        // ------------------------------------------------------------------
        Step::AddBelieverSelectFamily => family_list("ussd.addBelieverMenu.selectFamily", ctx),
        Step::AddBelieverEnterFirstName { .. } => {
            Screen::Text(ctx.t("ussd.addBelieverMenu.enterFirstName"))
        }
        Step::AddBelieverEnterLastName { .. } => {
            Screen::Text(ctx.t("ussd.addBelieverMenu.enterLastName"))
        }
        Step::AddBelieverEnterDob { .. } => {
            Screen::Text(ctx.t("ussd.addBelieverMenu.enterDateOfBirth"))
        }

        // ------------------------------------------------------------------
        // 편집
        // ------------------------------------------------------------------
        Step::EditBelieverSelectFamily => family_list("ussd.editBelieverMenu.selectFamily", ctx),
        Step::EditBelieverSelectBeliever { family_id } => {
            believer_list("ussd.editBelieverMenu.selectBeliever", family_id, ctx)?
        }
        Step::EditBelieverSelectField { believer_id, .. } => {
            let name = believer_name(believer_id, ctx)?;
            let title = ctx.tr("ussd.editBelieverMenu.selectField", &[("believerName", &name)]);
            field_list(title, ctx)
        }
        Step::EditBelieverEnterValue { field, .. } => Screen::Text(ctx.tr(
            "ussd.editBelieverMenu.enterNewValue",
            &[("fieldName", &ctx.field_name(*field))],
        )),

        // ------------------------------------------------------------------
        // 삭제
        // ------------------------------------------------------------------
        Step::DeleteBelieverSelectFamily => {
            family_list("ussd.deleteBelieverMenu.selectFamily", ctx)
        }
        Step::DeleteBelieverSelectBeliever { family_id } => {
            believer_list("ussd.deleteBelieverMenu.selectBeliever", family_id, ctx)?
        }
        Step::DeleteBelieverConfirm { believer_id, .. } => {
            let name = believer_name(believer_id, ctx)?;
            let question = ctx.tr("ussd.deleteBelieverMenu.confirm", &[("believerName", &name)]);
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
        // ------------------------------------------------------------------
        // 가족 선택 (네 흐름 공통)
        // ------------------------------------------------------------------
        Step::ManageBelieverSelectFamily
        | Step::AddBelieverSelectFamily
        | Step::EditBelieverSelectFamily
        | Step::DeleteBelieverSelectFamily => match picked(text, list) {
            Some(family_id) => Transition::Goto(after_family(step, family_id)),
            None => ctx.invalid_option(),
        },

        // ------------------------------------------------------------------
        // 성사 기록
        // ------------------------------------------------------------------
        Step::ManageBelieverSelectBeliever { family_id } => match picked(text, list) {
            Some(believer_id) => Transition::Goto(Step::ManageBelieverSelectSacrament {
                family_id: family_id.clone(),
                believer_id,
            }),
            None => ctx.invalid_option(),
        },

        Step::ManageBelieverSelectSacrament {
            family_id,
            believer_id,
        } => match chosen(text, &Sacrament::USSD_OPTIONS) {
            Some(sacrament) => Transition::Goto(Step::ManageBelieverEnterDate {
                family_id: family_id.clone(),
                believer_id: believer_id.clone(),
                sacrament,
            }),
            None => ctx.invalid_option(),
        },

        Step::ManageBelieverEnterDate {
            family_id,
            believer_id,
            sacrament,
        } => {
            if !is_valid_date(text) {
                return ctx.retry(keys::INVALID_DATE);
            }
            record_sacrament(family_id, believer_id, *sacrament, text, ctx)
        }

        // ------------------------------------------------------------------
        // 추가
        // ------------------------------------------------------------------
        Step::AddBelieverEnterFirstName { family_id } => match required_text(text) {
            Some(first_name) => Transition::Goto(Step::AddBelieverEnterLastName {
                family_id: family_id.clone(),
                first_name: first_name.to_string(),
            }),
            None => ctx.retry(keys::INVALID_INPUT),
        },

        Step::AddBelieverEnterLastName {
            family_id,
            first_name,
        } => match required_text(text) {
            Some(last_name) => Transition::Goto(Step::AddBelieverEnterDob {
                family_id: family_id.clone(),
                first_name: first_name.clone(),
                last_name: last_name.to_string(),
            }),
            None => ctx.retry(keys::INVALID_INPUT),
        },

        Step::AddBelieverEnterDob {
            family_id,
            first_name,
            last_name,
        } => {
            if !is_valid_date(text) {
                return ctx.retry(keys::INVALID_DATE);
            }
            add_believer(family_id, first_name, last_name, text, ctx)
        }

        // ------------------------------------------------------------------
        // 편집
        // ------------------------------------------------------------------
        Step::EditBelieverSelectBeliever { family_id } => match picked(text, list) {
            Some(believer_id) => Transition::Goto(Step::EditBelieverSelectField {
                family_id: family_id.clone(),
                believer_id,
            }),
            None => ctx.invalid_option(),
        },

        Step::EditBelieverSelectField {
            family_id,
            believer_id,
        } => match chosen(text, &BelieverField::ALL) {
            Some(field) => Transition::Goto(Step::EditBelieverEnterValue {
                family_id: family_id.clone(),
                believer_id: believer_id.clone(),
                field,
            }),
            None => ctx.invalid_option(),
        },

        Step::EditBelieverEnterValue {
            family_id,
            believer_id,
            field,
        } => match field_value(*field, text) {
            Ok(value) => edit_believer(family_id, believer_id, *field, value, ctx),
            Err(key) => ctx.retry(key),
        },

        // ------------------------------------------------------------------
        // 삭제
        // ------------------------------------------------------------------
        Step::DeleteBelieverSelectBeliever { family_id } => match picked(text, list) {
            Some(believer_id) => Transition::Goto(Step::DeleteBelieverConfirm {
                family_id: family_id.clone(),
                believer_id,
            }),
            None => ctx.invalid_option(),
        },

        Step::DeleteBelieverConfirm {
            family_id,
            believer_id,
        } => {
            if text == "1" {
                delete_believer(family_id, believer_id, ctx)
            } else {
                ctx.cancelled()
            }
        }

        _ => ctx.error(),
    }
}

/// 가족 선택 다음 단계
fn after_family(step: &Step, family_id: String) -> Step {
    match step {
        Step::ManageBelieverSelectFamily => Step::ManageBelieverSelectBeliever { family_id },
        Step::AddBelieverSelectFamily => Step::AddBelieverEnterFirstName { family_id },
        Step::EditBelieverSelectFamily => Step::EditBelieverSelectBeliever { family_id },
        _ => Step::DeleteBelieverSelectBeliever { family_id },
    }
}

/// 필드 값 검증 (생년월일은 날짜 형식)
pub(super) fn field_value(field: BelieverField, text: &str) -> Result<&str, &'static str> {
    let value = required_text(text).ok_or(keys::INVALID_INPUT)?;
    if field == BelieverField::DateOfBirth && !is_valid_date(value) {
        return Err(keys::INVALID_DATE);
    }
    Ok(value)
}

// ============================================================================
// Mutations
// ============================================================================

fn record_sacrament(
    family_id: &str,
    believer_id: &str,
    sacrament: Sacrament,
    date: &str,
    ctx: &mut FlowContext,
) -> Transition {
    let Some(believer) = ctx.scoped_believer(family_id, believer_id) else {
        return ctx.error();
    };

    if let Err(e) = ctx.store.update_believer_sacrament(&believer.id, sacrament, date) {
        warn!(believer = believer_id, "Failed to record sacrament: {}", e);
        return ctx.error();
    }
    Transition::Finish(ctx.tr(
        "ussd.manageBelieverMenu.success",
        &[
            ("sacramentName", &ctx.sacrament_name(sacrament)),
            ("believerName", &believer.full_name()),
        ],
    ))
}

fn add_believer(
    family_id: &str,
    first_name: &str,
    last_name: &str,
    date_of_birth: &str,
    ctx: &mut FlowContext,
) -> Transition {
    let Some(family) = ctx.scoped_family(family_id) else {
        return ctx.error();
    };

    let mut believer = Believer::new("", first_name, last_name);
    believer.date_of_birth = date_of_birth.to_string();
    let new = NewBeliever {
        believer,
        placement: Placement::ExistingFamily(family.id.clone()),
    };
    let added = match ctx.store.add_believer(new) {
        Ok(added) => added,
        Err(e) => {
            warn!(family = family_id, "Failed to add believer: {}", e);
            return ctx.error();
        }
    };

    Transition::Finish(ctx.tr(
        "ussd.addBelieverMenu.success",
        &[
            ("believerName", &added.full_name()),
            ("familyName", &ctx.family_name(&family)),
        ],
    ))
}

fn edit_believer(
    family_id: &str,
    believer_id: &str,
    field: BelieverField,
    value: &str,
    ctx: &mut FlowContext,
) -> Transition {
    let Some(mut believer) = ctx.scoped_believer(family_id, believer_id) else {
        return ctx.error();
    };

    field.apply(&mut believer, value);
    let name = believer.full_name();
    if let Err(e) = ctx.store.update_believer(believer) {
        warn!(believer = believer_id, "Failed to update believer: {}", e);
        return ctx.error();
    }
    Transition::Finish(ctx.tr(
        "ussd.editBelieverMenu.success",
        &[("fieldName", &ctx.field_name(field)), ("believerName", &name)],
    ))
}

fn delete_believer(family_id: &str, believer_id: &str, ctx: &mut FlowContext) -> Transition {
    let Some(believer) = ctx.scoped_believer(family_id, believer_id) else {
        return ctx.error();
    };

    if let Err(e) = ctx.store.delete_believer(&believer.id) {
        warn!(believer = believer_id, "Failed to delete believer: {}", e);
        return ctx.error();
    }
    Transition::Finish(ctx.tr(
        "ussd.deleteBelieverMenu.success",
        &[("believerName", &believer.full_name())],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_value_validation() {
        assert_eq!(field_value(BelieverField::FirstName, " Hery "), Ok("Hery"));
        assert_eq!(field_value(BelieverField::LastName, "   "), Err(keys::INVALID_INPUT));
        assert_eq!(field_value(BelieverField::DateOfBirth, "2001-02-03"), Ok("2001-02-03"));
        assert_eq!(field_value(BelieverField::DateOfBirth, "03/02/2001"), Err(keys::INVALID_DATE));
    }
}
