//! 조회 범위 속성 테스트 - 구역 지도자 범위는 순수 필터
//!
//! `cargo test -p parish-core --test scope_props`

use parish_core::{families_for_user, sample_data, DataStore, MemoryStore};
use parish_foundation::{Family, Role, User};
use proptest::prelude::*;

const APV_POOL: [&str; 5] = ["APV001", "APV002", "APV003", "APV999", ""];

fn arb_family() -> impl Strategy<Value = Family> {
    ("[A-Z]{1,3}[0-9]{1,4}", prop::sample::select(APV_POOL.to_vec()), "[a-z ]{0,12}").prop_map(
        |(id, apv, address)| Family {
            id,
            apv_id: apv.to_string(),
            address,
            parish: "PAR001".to_string(),
            ..Default::default()
        },
    )
}

fn store_with(families: Vec<Family>) -> MemoryStore {
    let mut data = sample_data();
    data.families = families;
    MemoryStore::new(data)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_zone_scope_is_exact_filter(families in prop::collection::vec(arb_family(), 0..40)) {
        let store = store_with(families.clone());
        let leader = User::new("U_Z", "zone", Role::ZoneLeader).owning("ZONE", "ZONE001");

        let scoped: Vec<&Family> = families_for_user(&leader, &store);
        let expected: Vec<&Family> = store
            .families()
            .iter()
            .filter(|f| f.apv_id == "APV001" || f.apv_id == "APV002")
            .collect();

        prop_assert_eq!(scoped, expected);
    }

    #[test]
    fn prop_zone_scope_ignores_order(mut families in prop::collection::vec(arb_family(), 0..40)) {
        let leader = User::new("U_Z", "zone", Role::ZoneLeader).owning("ZONE", "ZONE001");
        let count = |families: Vec<Family>| families_for_user(&leader, &store_with(families)).len();

        let forward = count(families.clone());
        families.reverse();
        prop_assert_eq!(forward, count(families));
    }

    #[test]
    fn prop_apv_scope_never_leaks(families in prop::collection::vec(arb_family(), 0..40)) {
        let store = store_with(families);
        let leader = User::new("U_A", "apv", Role::ApvLeader).owning("APV", "APV002");

        for family in families_for_user(&leader, &store) {
            prop_assert_eq!(family.apv_id.as_str(), "APV002");
        }
    }
}
