//! Localization - 메시지 템플릿 조회
//!
//! 코어는 사용자에게 보여줄 문자열을 직접 갖지 않고 `Localizer`를 통해 조회한다.
//!
//! ```rust,ignore
//! use parish_foundation::i18n::{Catalog, Localizer};
//!
//! let catalog = Catalog::english();
//! let text = catalog.translate("ussd.startPrompt", &[("code", "*123#")]);
//! ```

mod catalog;

pub use catalog::{interpolate, Catalog};

/// 메시지 템플릿 조회 기능
pub trait Localizer {
    /// 점 표기 키와 이름 있는 파라미터로 메시지 생성
    fn translate(&self, key: &str, params: &[(&str, &str)]) -> String;

    /// 파라미터 없는 조회
    fn t(&self, key: &str) -> String {
        self.translate(key, &[])
    }
}

/// 클로저를 Localizer로 사용
pub struct FnLocalizer<F>(pub F);

impl<F> Localizer for FnLocalizer<F>
where
    F: Fn(&str, &[(&str, &str)]) -> String,
{
    fn translate(&self, key: &str, params: &[(&str, &str)]) -> String {
        (self.0)(key, params)
    }
}

// ============================================================
// 공통 키
// ============================================================

pub mod keys {
    pub const PERMISSION_DENIED: &str = "common.permission_denied";
    pub const ERROR_OCCURRED: &str = "common.error_occurred";

    pub const START_PROMPT: &str = "ussd.startPrompt";
    pub const MAIN_MENU_TITLE: &str = "ussd.mainMenuTitle";

    pub const EXIT: &str = "ussd.general.exit";
    pub const GO_BACK: &str = "ussd.general.goBack";
    pub const NEXT_PAGE: &str = "ussd.general.nextPage";
    pub const INVALID_OPTION: &str = "ussd.general.invalidOption";
    pub const INVALID_INPUT: &str = "ussd.general.invalidInput";
    pub const INVALID_DATE: &str = "ussd.general.invalidDate";
    pub const INVALID_AMOUNT: &str = "ussd.general.invalidAmount";
    pub const OPERATION_CANCELLED: &str = "ussd.general.operationCancelled";
    pub const NO_FAMILIES_FOUND: &str = "ussd.general.noFamiliesFound";
    pub const NO_BELIEVERS_FOUND: &str = "ussd.general.noBelieversFound";
    pub const NO_APVS_FOUND: &str = "ussd.general.noApvsFound";
    pub const CONFIRM_OPTIONS: &str = "ussd.general.confirmOptions";

    pub const LIST_FAMILY: &str = "ussd.list.family";
    pub const FAMILY_NAME: &str = "ussd.list.familyName";
    pub const LIST_BELIEVER: &str = "ussd.list.believer";
    pub const LIST_TERRITORY: &str = "ussd.list.territory";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fn_localizer() {
        let loc = FnLocalizer(|key: &str, params: &[(&str, &str)]| {
            format!("{}:{}", key, params.len())
        });
        assert_eq!(loc.t("a.b"), "a.b:0");
        assert_eq!(loc.translate("a.b", &[("x", "1")]), "a.b:1");
    }
}
