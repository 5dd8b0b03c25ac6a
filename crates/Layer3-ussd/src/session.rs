//! USSD 세션 관리
//!
//! 세션은 호출자 키(기본: User ID)별로 하나씩 메모리에 보관된다.
//! 엔진은 한 턴 동안 세션을 꺼내(`take`) 처리한 뒤 다시 넣는다(`put`).

use crate::render::PagedList;
use crate::step::Step;
use chrono::{DateTime, Utc};
use parish_core::DataStore;
use parish_foundation::{Role, TerritoryType, User};
use parking_lot::Mutex;
use std::collections::HashMap;
use uuid::Uuid;

// ============================================================================
// PathInfo
// ============================================================================

/// 메인 메뉴 인사말에 쓰는 지역 이름들 (세션 시작 시 계산)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathInfo {
    pub parish_name: String,
    pub zone_name: String,
    pub territory_name: String,
}

impl PathInfo {
    /// 사용자의 관리 지역 경로에서 본당/구역/지역 이름 계산
    ///
    /// 홈 지역이 없으면(신자는 연결된 신자 기록의 본당) 지역 이름은 `N/A`.
    pub fn resolve<S>(user: &User, store: &S) -> Self
    where
        S: DataStore + ?Sized,
    {
        let home = match user.role {
            Role::Believer => user
                .believer_id
                .as_deref()
                .and_then(|id| store.parish_of(id))
                .map(str::to_string),
            _ => user.territory_id.clone().filter(|t| !t.is_empty()),
        };
        if home.is_none() {
            return Self {
                territory_name: "N/A".to_string(),
                ..Default::default()
            };
        }

        let mut info = Self::default();
        if let Some(path) = store.path_to(&user.highest_level_territory_id) {
            let name_of = |kind: TerritoryType| {
                path.iter()
                    .find(|t| t.kind == kind)
                    .map(|t| t.name.clone())
                    .unwrap_or_default()
            };
            info.parish_name = name_of(TerritoryType::Parish);
            info.zone_name = name_of(TerritoryType::Zone);
            info.territory_name = path.last().map(|t| t.name.clone()).unwrap_or_default();
        }
        info
    }
}

// ============================================================================
// Session
// ============================================================================

/// 하나의 USSD 대화
#[derive(Debug, Clone)]
pub struct Session {
    /// Unique session ID
    pub id: String,

    /// 호출자 User ID
    pub caller: String,

    /// 현재 단계
    pub step: Step,

    /// 뒤로가기용 이전 단계들
    pub history: Vec<Step>,

    /// 마지막으로 표시한 번호 목록
    pub list: Option<PagedList>,

    pub path: PathInfo,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    pub fn new(caller: impl Into<String>, path: PathInfo) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            caller: caller.into(),
            step: Step::RoleRouter,
            history: Vec::new(),
            list: None,
            path,
            created_at: now,
            updated_at: now,
        }
    }

    /// 이력에 추가 (상한을 넘으면 가장 오래된 항목 제거)
    pub fn push_history(&mut self, step: Step, max: usize) {
        self.history.push(step);
        if self.history.len() > max.max(1) {
            self.history.remove(0);
        }
    }

    pub fn pop_history(&mut self) -> Option<Step> {
        self.history.pop()
    }

    /// Mark session as updated
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

// ============================================================================
// SessionStore
// ============================================================================

/// 호출자 키 → 활성 세션
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<String, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 세션을 꺼냄 (처리 중에는 저장소에 없음)
    pub fn take(&self, key: &str) -> Option<Session> {
        self.sessions.lock().remove(key)
    }

    /// 세션 저장 (같은 키의 기존 세션은 교체)
    pub fn put(&self, key: impl Into<String>, mut session: Session) {
        session.touch();
        self.sessions.lock().insert(key.into(), session);
    }

    pub fn remove(&self, key: &str) -> Option<Session> {
        self.sessions.lock().remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.sessions.lock().contains_key(key)
    }

    /// 현재 단계 조회 (세션 복사 없이)
    pub fn step_of(&self, key: &str) -> Option<Step> {
        self.sessions.lock().get(key).map(|s| s.step.clone())
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parish_core::MemoryStore;

    #[test]
    fn test_history_is_capped() {
        let mut session = Session::new("U1", PathInfo::default());
        for _ in 0..5 {
            session.push_history(Step::LeaderMainMenu, 3);
        }
        session.push_history(Step::ContributionSelectFamily, 3);

        assert_eq!(session.history.len(), 3);
        assert_eq!(session.pop_history(), Some(Step::ContributionSelectFamily));
    }

    #[test]
    fn test_store_take_and_put() {
        let store = SessionStore::new();
        store.put("U1", Session::new("U1", PathInfo::default()));
        assert!(store.contains("U1"));

        let session = store.take("U1").unwrap();
        assert!(!store.contains("U1"));
        assert_eq!(session.step, Step::RoleRouter);

        store.put("U1", session);
        assert_eq!(store.step_of("U1"), Some(Step::RoleRouter));
        assert!(store.remove("U1").is_some());
        assert!(store.remove("U1").is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_path_info_for_leaders() {
        let data = MemoryStore::sample();

        let zone = data.user("U_ZONE").unwrap();
        let info = PathInfo::resolve(zone, &data);
        assert_eq!(info.parish_name, "Paroasy Ankadifotsy");
        assert_eq!(info.zone_name, "Faritra Avaratra");
        assert_eq!(info.territory_name, "Faritra Avaratra");

        let parish = data.user("U_PARISH").unwrap();
        let info = PathInfo::resolve(parish, &data);
        assert_eq!(info.parish_name, "Paroasy Ankadifotsy");
        assert_eq!(info.zone_name, "");
        assert_eq!(info.territory_name, "Paroasy Ankadifotsy");
    }

    #[test]
    fn test_path_info_without_home() {
        let data = MemoryStore::sample();
        let stranger = User::new("X", "x", Role::ZoneLeader).owning("ZONE", "ZONE001");
        let info = PathInfo::resolve(&stranger, &data);
        assert_eq!(info.territory_name, "N/A");
        assert!(info.parish_name.is_empty());

        // 신자는 연결된 신자 기록의 본당을 홈으로 사용 (관리 지역은 없음)
        let believer = data.user("U_BELIEVER").unwrap();
        let info = PathInfo::resolve(believer, &data);
        assert_eq!(info, PathInfo::default());
    }
}
