//! 날짜 입력 속성 테스트 - `YYYY-MM-DD` 형식이면 받고, 아니면 기록을 건드리지 않는다
//!
//! `cargo test -p parish-ussd --test date_props`

use parish_core::{DataStore, MemoryStore};
use parish_foundation::{Catalog, User};
use parish_ussd::input::is_valid_date;
use parish_ussd::{UssdResponse, UssdService};
use proptest::prelude::*;

/// 본인 성사 화면에서 견진 날짜 입력 직전까지 진행
fn at_confirmation_date() -> (UssdService, MemoryStore, User, Catalog) {
    let mut store = MemoryStore::sample();
    let user = store.user("U_BELIEVER").cloned().unwrap();
    let catalog = Catalog::english();
    let ussd = UssdService::default();
    for input in ["*123#", "2", "2"] {
        ussd.process_request(input, &user, &mut store, &catalog);
    }
    (ussd, store, user, catalog)
}

fn send_date(date: &str) -> (UssdResponse, MemoryStore) {
    let (ussd, mut store, user, catalog) = at_confirmation_date();
    let response = ussd.process_request(date, &user, &mut store, &catalog);
    (response, store)
}

fn looks_like_date(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// 전역 입력(시작/취소/뒤로/다음)과 공백만 다른 날짜는 제외
fn not_a_date() -> impl Strategy<Value = String> {
    prop_oneof![
        ".{0,16}",
        "[0-9]{1,5}[-/.][0-9]{1,3}[-/.][0-9]{1,3}",
        "[0-9]{4}-[0-9]{2}-[0-9]{2}[0-9a-zT:]{1,4}",
    ]
    .prop_filter("must not be a date or a global input", |s| {
        let trimmed = s.trim();
        !looks_like_date(trimmed) && !matches!(trimmed, "*123#" | "0" | "00" | "98")
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_any_well_formed_date_is_recorded(date in "[0-9]{4}-[0-9]{2}-[0-9]{2}") {
        prop_assert!(is_valid_date(&date));

        let (response, store) = send_date(&date);
        prop_assert!(response.session_ended);
        prop_assert_eq!(response.display.as_str(), "Your Confirmation has been recorded.");

        let marie = store.believer("M002").unwrap();
        prop_assert!(marie.is_confirmed);
        prop_assert_eq!(marie.confirmation_date.as_deref(), Some(date.as_str()));
    }

    #[test]
    fn test_malformed_date_is_rejected_and_record_kept(text in not_a_date()) {
        prop_assert!(!is_valid_date(text.trim()));

        let before = MemoryStore::sample().believer("M002").cloned().unwrap();
        let (response, store) = send_date(&text);

        prop_assert!(!response.session_ended);
        prop_assert!(response.display.starts_with("Invalid date. Use YYYY-MM-DD."));
        prop_assert_eq!(store.believer("M002").unwrap(), &before);
    }
}
