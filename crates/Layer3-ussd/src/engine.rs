//! UssdService - 요청/응답 프로토콜
//!
//! 한 번의 `process_request`가 한 턴이다:
//!
//! ```text
//! input ──▶ 전역 입력 (start / 00 / 0 / 98)
//!             │
//!             └─▶ 이력 push ──▶ flows::handle ──▶ Transition
//!                                                   │
//!                         Goto / GotoWith / Retry ──┼─▶ flows::render ──▶ display
//!                                   Finish / Fail ──┴─▶ 세션 종료
//! ```
//!
//! 엔진은 호출자에게 오류를 돌려주지 않는다. 모든 실패는 표시 메시지가 된다.

use crate::flows::{self, main_menu_step, Abort, FlowContext, Transition};
use crate::input::Input;
use crate::render::{PagedList, Screen};
use crate::session::{PathInfo, Session, SessionStore};
use crate::step::Step;
use parish_core::DataStore;
use parish_foundation::{keys, Localizer, SessionScope, User, UssdSettings};
use tracing::{debug, info, warn};

/// `singleSeat` 모드의 세션 키
const SINGLE_SEAT: &str = "__single_seat__";

/// 한 턴의 응답
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UssdResponse {
    pub display: String,
    pub session_ended: bool,
}

impl UssdResponse {
    fn open(display: String) -> Self {
        Self {
            display,
            session_ended: false,
        }
    }

    fn ended(display: String) -> Self {
        Self {
            display,
            session_ended: true,
        }
    }
}

/// USSD 세션 상태 머신
pub struct UssdService {
    settings: UssdSettings,
    sessions: SessionStore,
}

impl UssdService {
    pub fn new(settings: UssdSettings) -> Self {
        Self {
            settings,
            sessions: SessionStore::new(),
        }
    }

    pub fn settings(&self) -> &UssdSettings {
        &self.settings
    }

    fn key(&self, user: &User) -> String {
        match self.settings.session_scope {
            SessionScope::PerCaller => user.id.clone(),
            SessionScope::SingleSeat => SINGLE_SEAT.to_string(),
        }
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// 새 세션 시작 (같은 키의 기존 세션은 교체)
    pub fn start_session<S>(&self, user: &User, store: &S)
    where
        S: DataStore + ?Sized,
    {
        let session = Session::new(user.id.clone(), PathInfo::resolve(user, store));
        info!(
            session = %session.id,
            user = %user.id,
            role = ?user.role,
            "USSD session started"
        );
        self.sessions.put(self.key(user), session);
    }

    /// 세션 종료 (없으면 아무것도 하지 않음)
    pub fn end_session(&self, user: &User) {
        if let Some(session) = self.sessions.remove(&self.key(user)) {
            info!(session = %session.id, user = %user.id, "USSD session ended");
        }
    }

    pub fn has_session(&self, user: &User) -> bool {
        self.sessions.contains(&self.key(user))
    }

    /// 현재 단계 (세션이 없으면 None)
    pub fn current_step(&self, user: &User) -> Option<Step> {
        self.sessions.step_of(&self.key(user))
    }

    pub fn active_sessions(&self) -> usize {
        self.sessions.len()
    }

    // ========================================================================
    // Request
    // ========================================================================

    /// 입력 한 줄 처리
    pub fn process_request(
        &self,
        input: &str,
        user: &User,
        store: &mut dyn DataStore,
        i18n: &dyn Localizer,
    ) -> UssdResponse {
        let key = self.key(user);
        let start_code = self.settings.start_code.as_str();

        let Some(mut session) = self.sessions.take(&key) else {
            if input.trim() == start_code {
                return self.open(key, user, store, i18n);
            }
            return UssdResponse::open(i18n.translate(keys::START_PROMPT, &[("code", start_code)]));
        };

        let page_size = self.settings.page_size;
        let has_more = session
            .list
            .as_ref()
            .is_some_and(|list| list.has_more(page_size));

        match Input::parse(input, start_code, has_more) {
            Input::Start => {
                debug!(session = %session.id, "Start code during session, restarting");
                self.open(key, user, store, i18n)
            }

            Input::Cancel => {
                info!(session = %session.id, user = %user.id, "USSD session cancelled");
                UssdResponse::ended(i18n.t(keys::OPERATION_CANCELLED))
            }

            Input::Back => {
                let previous = session.pop_history().unwrap_or_default();
                debug!(session = %session.id, from = %session.step, to = %previous, "Back");
                self.show(key, session, previous, None, user, store, i18n)
            }

            Input::NextPage => {
                let display = match session.list.as_mut() {
                    Some(list) => {
                        list.next_page(page_size);
                        list.layout(page_size, i18n)
                    }
                    None => i18n.t(keys::INVALID_OPTION),
                };
                self.sessions.put(key, session);
                UssdResponse::open(display)
            }

            Input::Text(text) => {
                let current = session.step.clone();
                session.push_history(current.clone(), self.settings.max_history);

                let path = session.path.clone();
                let transition = {
                    let mut ctx = FlowContext {
                        user,
                        store: &mut *store,
                        i18n,
                        path: &path,
                    };
                    flows::handle(&current, text, session.list.as_ref(), &mut ctx)
                };
                self.apply(key, session, transition, user, store, i18n)
            }
        }
    }

    // ========================================================================
    // Internal
    // ========================================================================

    fn open(
        &self,
        key: String,
        user: &User,
        store: &mut dyn DataStore,
        i18n: &dyn Localizer,
    ) -> UssdResponse {
        self.start_session(user, &*store);
        match self.sessions.take(&key) {
            Some(session) => self.show(key, session, Step::RoleRouter, None, user, store, i18n),
            None => UssdResponse::ended(i18n.t(keys::ERROR_OCCURRED)),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn apply(
        &self,
        key: String,
        mut session: Session,
        transition: Transition,
        user: &User,
        store: &mut dyn DataStore,
        i18n: &dyn Localizer,
    ) -> UssdResponse {
        match transition {
            Transition::Goto(next) => self.show(key, session, next, None, user, store, i18n),

            Transition::GotoWith(next, notice) => {
                if next == Step::RoleRouter {
                    session.history.clear();
                }
                self.show(key, session, next, Some(notice), user, store, i18n)
            }

            Transition::Retry(message) => {
                // 방금 넣은 이력 제거
                session.pop_history();
                let current = session.step.clone();
                debug!(session = %session.id, step = %current, "Input rejected");
                self.show(key, session, current, Some(message), user, store, i18n)
            }

            Transition::Finish(message) => {
                info!(
                    session = %session.id,
                    user = %user.id,
                    step = %session.step,
                    "USSD flow completed"
                );
                UssdResponse::ended(message)
            }

            Transition::Fail(message) => {
                warn!(
                    session = %session.id,
                    user = %user.id,
                    step = %session.step,
                    "USSD session aborted"
                );
                UssdResponse::ended(message)
            }
        }
    }

    /// 단계로 이동해 화면 표시 (렌더링 실패 시 세션 종료)
    #[allow(clippy::too_many_arguments)]
    fn show(
        &self,
        key: String,
        mut session: Session,
        step: Step,
        notice: Option<String>,
        user: &User,
        store: &mut dyn DataStore,
        i18n: &dyn Localizer,
    ) -> UssdResponse {
        // 라우터는 역할 메인 메뉴로 (메뉴가 없는 역할이면 라우터에 머묾)
        let step = match step {
            Step::RoleRouter => main_menu_step(user.role).unwrap_or(Step::RoleRouter),
            other => other,
        };

        let path = session.path.clone();
        let rendered = {
            let ctx = FlowContext {
                user,
                store: &mut *store,
                i18n,
                path: &path,
            };
            flows::render(&step, &ctx)
        };

        let body = match rendered {
            Ok(Screen::Text(text)) => {
                session.list = None;
                text
            }
            Ok(Screen::List {
                title,
                entries,
                empty,
            }) => {
                let list = PagedList::new(title, entries, empty);
                let text = list.layout(self.settings.page_size, i18n);
                session.list = Some(list);
                text
            }
            Err(abort) => {
                let key = match abort {
                    Abort::Denied => keys::PERMISSION_DENIED,
                    Abort::Error => keys::ERROR_OCCURRED,
                };
                warn!(session = %session.id, step = %step, ?abort, "Cannot render step");
                return UssdResponse::ended(i18n.t(key));
            }
        };

        debug!(session = %session.id, from = %session.step, to = %step, "Transition");
        session.step = step;
        self.sessions.put(key, session);

        let display = match notice {
            Some(notice) => format!("{}\n{}", notice, body),
            None => body,
        };
        UssdResponse::open(display)
    }
}

impl Default for UssdService {
    fn default() -> Self {
        Self::new(UssdSettings::default())
    }
}
