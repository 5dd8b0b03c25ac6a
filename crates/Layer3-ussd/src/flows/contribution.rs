//! 헌금 기록: 가족 → 범주 → 금액 → 일자

use super::{chosen, family_list, option_list, picked, Abort, FlowContext, Transition};
use crate::input::{is_valid_date, parse_amount};
use crate::render::{PagedList, Screen};
use crate::step::Step;
use parish_core::NewContribution;
use parish_foundation::{keys, ContributionCategory};
use tracing::warn;

pub(super) fn render(step: &Step, ctx: &FlowContext) -> Result<Screen, Abort> {
    let screen = match step {
        Step::ContributionSelectFamily => family_list("ussd.contributionMenu.selectFamily", ctx),
        Step::ContributionSelectCategory { .. } => {
            let labels = ContributionCategory::ALL
                .iter()
                .map(|c| (c.key(), ctx.category_name(*c)))
                .collect();
            option_list(ctx.t("ussd.contributionMenu.selectCategory"), labels)
        }
        Step::ContributionEnterAmount { .. } => {
            Screen::Text(ctx.t("ussd.contributionMenu.enterAmount"))
        }
        _ => Screen::Text(ctx.t("ussd.contributionMenu.enterDate")),
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
        Step::ContributionSelectFamily => match picked(text, list) {
            Some(family_id) => Transition::Goto(Step::ContributionSelectCategory { family_id }),
            None => ctx.invalid_option(),
        },

        Step::ContributionSelectCategory { family_id } => {
            match chosen(text, &ContributionCategory::ALL) {
                Some(category) => Transition::Goto(Step::ContributionEnterAmount {
                    family_id: family_id.clone(),
                    category,
                }),
                None => ctx.invalid_option(),
            }
        }

        Step::ContributionEnterAmount {
            family_id,
            category,
        } => match parse_amount(text) {
            Some(amount) => Transition::Goto(Step::ContributionEnterDate {
                family_id: family_id.clone(),
                category: *category,
                amount,
            }),
            None => ctx.retry(keys::INVALID_AMOUNT),
        },

        Step::ContributionEnterDate {
            family_id,
            category,
            amount,
        } => {
            if !is_valid_date(text) {
                return ctx.retry(keys::INVALID_DATE);
            }
            record(family_id, *category, *amount, text, ctx)
        }

        _ => ctx.error(),
    }
}

fn record(
    family_id: &str,
    category: ContributionCategory,
    amount: u64,
    date: &str,
    ctx: &mut FlowContext,
) -> Transition {
    let Some(family) = ctx.scoped_family(family_id) else {
        return ctx.error();
    };

    let contribution = NewContribution {
        date: date.to_string(),
        category,
        amount,
    };
    if let Err(e) = ctx.store.add_contribution_to_family(&family.id, contribution) {
        warn!(family = family_id, "Failed to record contribution: {}", e);
        return ctx.error();
    }

    let message = ctx.tr(
        "ussd.contributionMenu.success",
        &[
            ("amount", &amount.to_string()),
            ("category", &ctx.category_name(category)),
            ("familyName", &ctx.family_name(&family)),
        ],
    );
    Transition::Finish(message)
}
