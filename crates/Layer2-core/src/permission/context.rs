//! 권한 검사 컨텍스트

use parish_foundation::{Believer, Family, Territory, TerritoryType};

/// 검사 대상 노드 (지역 단위 또는 가족)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub id: String,
    pub kind: TerritoryType,
    pub parent_id: Option<String>,
}

impl Target {
    pub fn new(id: impl Into<String>, kind: TerritoryType) -> Self {
        Self {
            id: id.into(),
            kind,
            parent_id: None,
        }
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }
}

impl From<&Territory> for Target {
    fn from(t: &Territory) -> Self {
        Self {
            id: t.id.clone(),
            kind: t.kind,
            parent_id: t.parent_id.clone(),
        }
    }
}

/// 가족은 FAMILY 노드, 부모는 소속 APV
impl From<&Family> for Target {
    fn from(f: &Family) -> Self {
        Self::new(f.id.clone(), TerritoryType::Family).with_parent(f.apv_id.clone())
    }
}

/// `has_permission`에 넘기는 선택적 대상들
#[derive(Debug, Clone, Default)]
pub struct PermissionContext<'a> {
    pub target: Option<Target>,
    pub parent: Option<Target>,
    pub believer: Option<&'a Believer>,
}

impl<'a> PermissionContext<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target(mut self, target: impl Into<Target>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn parent(mut self, parent: impl Into<Target>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn believer(mut self, believer: &'a Believer) -> Self {
        self.believer = Some(believer);
        self
    }

    /// 대상 노드만 지정
    pub fn on(target: impl Into<Target>) -> Self {
        Self::new().target(target)
    }

    /// 가족 + 소속 APV
    pub fn for_family(family: &Family, apv: Option<&Territory>) -> Self {
        let ctx = Self::on(family);
        match apv {
            Some(apv) => ctx.parent(apv),
            None => ctx,
        }
    }
}
