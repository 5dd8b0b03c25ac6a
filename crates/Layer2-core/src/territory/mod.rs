//! Territory - 지역 트리 탐색
//!
//! - `index`: arena + 부모 링크 기반 TerritoryIndex

mod index;

pub use index::TerritoryIndex;

use parish_foundation::Territory;
use serde::{Deserialize, Serialize};

/// 저장 형식의 지역 트리 (`{ "archdioceses": [...] }`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TerritoryTree {
    #[serde(default)]
    pub archdioceses: Vec<Territory>,
}

impl From<TerritoryTree> for TerritoryIndex {
    fn from(tree: TerritoryTree) -> Self {
        TerritoryIndex::build(tree.archdioceses)
    }
}

impl From<&TerritoryIndex> for TerritoryTree {
    fn from(index: &TerritoryIndex) -> Self {
        Self {
            archdioceses: index.to_tree(),
        }
    }
}
