//! # parish-ussd
//!
//! USSD (텍스트 메뉴) 세션 상태 머신 - 스마트폰 없이 한 줄씩 주고받는
//! 턴 방식 프로토콜로 교구 관리 작업을 수행한다.
//!
//! ## 핵심 컴포넌트
//!
//! - **UssdService**: `process_request(input, user, store, i18n)` → `UssdResponse`
//! - **Step**: 흐름 데이터를 가진 상태 머신 단계
//! - **SessionStore**: 호출자별 세션 (단계, 뒤로가기 이력, 마지막 목록)
//! - **flows**: 단계별 렌더링/입력 처리 (역할 메뉴, 헌금, 가족, 신자, 지역, 본인)
//!
//! ## 전역 입력
//!
//! | 입력 | 동작 |
//! |------|------|
//! | `*123#` | 세션 시작 (진행 중이면 재시작) |
//! | `00` | 세션 종료 |
//! | `0` | 이전 단계로 |
//! | `98` | 목록 다음 페이지 |
//!
//! ## 사용 예
//!
//! ```ignore
//! use parish_foundation::{Catalog, UssdSettings};
//! use parish_core::{DataStore, MemoryStore};
//! use parish_ussd::UssdService;
//!
//! let mut store = MemoryStore::sample();
//! let user = store.user("U_APV").unwrap().clone();
//! let catalog = Catalog::english();
//! let ussd = UssdService::new(UssdSettings::default());
//!
//! let response = ussd.process_request("*123#", &user, &mut store, &catalog);
//! println!("{}", response.display);
//! ```

pub mod engine;
pub mod flows;
pub mod input;
pub mod render;
pub mod session;
pub mod step;

pub use engine::{UssdResponse, UssdService};
pub use flows::{FlowContext, Transition};
pub use input::Input;
pub use render::{ListEntry, PagedList, Screen};
pub use session::{PathInfo, Session, SessionStore};
pub use step::Step;
