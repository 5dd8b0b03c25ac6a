//! Territory Index - arena 기반 지역 트리
//!
//! 중첩 트리를 한 번 평탄화해 `id → slot` 맵과 부모 링크로 보관한다.
//! 노드 하나를 바꾸는 데 트리 전체를 다시 만들 필요가 없다.

use parish_foundation::{Believer, Error, Family, Result, Territory, TerritoryType};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// arena 슬롯 (자식 컬렉션은 비워서 보관)
#[derive(Debug, Clone)]
struct Slot {
    territory: Territory,
    parent: Option<usize>,
    children: Vec<usize>,
}

/// 읽기 전용 탐색 + 단일 노드 변경
#[derive(Debug, Clone, Default)]
pub struct TerritoryIndex {
    slots: Vec<Slot>,
    by_id: HashMap<String, usize>,
    roots: Vec<usize>,
}

impl TerritoryIndex {
    // ========================================================================
    // Build
    // ========================================================================

    /// 중첩 트리에서 생성
    ///
    /// 중복 ID는 DFS 전위 순회에서 처음 만난 노드가 이긴다.
    /// 비어 있는 `parent_id`는 트리 위치로 채운다.
    pub fn build(roots: Vec<Territory>) -> Self {
        let mut index = Self::default();
        for root in roots {
            let slot = index.insert(root, None);
            index.roots.push(slot);
        }
        index
    }

    fn insert(&mut self, mut territory: Territory, parent: Option<usize>) -> usize {
        let children = territory.take_children();
        if territory.parent_id.is_none() {
            if let Some(p) = parent {
                territory.parent_id = Some(self.slots[p].territory.id.clone());
            }
        }

        let slot = self.slots.len();
        self.by_id.entry(territory.id.clone()).or_insert(slot);
        self.slots.push(Slot {
            territory,
            parent,
            children: Vec::new(),
        });

        for child in children {
            let child_slot = self.insert(child, Some(slot));
            self.slots[slot].children.push(child_slot);
        }
        slot
    }

    /// 중첩 트리로 되돌림 (저장용)
    pub fn to_tree(&self) -> Vec<Territory> {
        self.roots.iter().map(|&slot| self.subtree(slot)).collect()
    }

    fn subtree(&self, slot: usize) -> Territory {
        let mut node = self.slots[slot].territory.clone();
        for &child in &self.slots[slot].children {
            let child_node = self.subtree(child);
            node.child_collection_mut(child_node.kind).push(child_node);
        }
        node
    }

    // ========================================================================
    // Query
    // ========================================================================

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn roots(&self) -> Vec<&Territory> {
        self.roots.iter().map(|&s| &self.slots[s].territory).collect()
    }

    /// 전체 노드 (arena 순서)
    pub fn iter(&self) -> impl Iterator<Item = &Territory> {
        self.slots.iter().map(|slot| &slot.territory)
    }

    pub fn of_kind(&self, kind: TerritoryType) -> Vec<&Territory> {
        self.iter().filter(|t| t.kind == kind).collect()
    }

    fn slot_of(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    /// ID로 노드 조회 (자식 컬렉션은 비어 있음)
    pub fn find_by_id(&self, id: &str) -> Option<&Territory> {
        self.slot_of(id).map(|s| &self.slots[s].territory)
    }

    pub fn parent_of(&self, id: &str) -> Option<&Territory> {
        let slot = self.slot_of(id)?;
        self.slots[slot].parent.map(|p| &self.slots[p].territory)
    }

    pub fn children_of(&self, id: &str) -> Vec<&Territory> {
        match self.slot_of(id) {
            Some(slot) => self.slots[slot]
                .children
                .iter()
                .map(|&c| &self.slots[c].territory)
                .collect(),
            None => Vec::new(),
        }
    }

    /// 루트부터 해당 노드까지의 경로
    pub fn path_to(&self, id: &str) -> Option<Vec<&Territory>> {
        let mut slot = self.slot_of(id)?;
        let mut path = vec![&self.slots[slot].territory];
        while let Some(parent) = self.slots[slot].parent {
            path.push(&self.slots[parent].territory);
            slot = parent;
        }
        path.reverse();
        Some(path)
    }

    /// 경로상 가장 가까운 해당 타입 노드 (자기 자신 포함)
    pub fn ancestor_of_kind(&self, id: &str, kind: TerritoryType) -> Option<&Territory> {
        self.path_to(id)?.into_iter().rev().find(|t| t.kind == kind)
    }

    /// 하위 노드 중 해당 타입 (전위 순회, 자기 자신 제외)
    pub fn descendants_of_kind(&self, id: &str, kind: TerritoryType) -> Vec<&Territory> {
        let mut out = Vec::new();
        if let Some(slot) = self.slot_of(id) {
            let mut stack: Vec<usize> = self.slots[slot].children.iter().rev().copied().collect();
            while let Some(current) = stack.pop() {
                let node = &self.slots[current];
                if node.territory.kind == kind {
                    out.push(&node.territory);
                }
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }

    /// 구역 바로 아래 APV ID 목록
    pub fn apv_ids_in_zone(&self, zone_id: &str) -> Vec<String> {
        self.children_of(zone_id)
            .into_iter()
            .filter(|t| t.kind == TerritoryType::Apv)
            .map(|t| t.id.clone())
            .collect()
    }

    /// 지역 단위에 속한 신자 (신자 저장 순서 유지)
    ///
    /// - PARISH: `parish`가 같은 신자
    /// - ZONE: 구역 아래 모든 APV의 가족 구성원
    /// - APV: 해당 APV 가족 구성원
    /// - 그 외: 없음
    pub fn members_under<'a>(
        &self,
        territory: &Territory,
        families: &[Family],
        believers: &'a [Believer],
    ) -> Vec<&'a Believer> {
        let member_ids: HashSet<&str> = match territory.kind {
            TerritoryType::Parish => {
                return believers
                    .iter()
                    .filter(|b| b.parish == territory.id)
                    .collect();
            }
            TerritoryType::Zone => {
                let apvs: HashSet<&str> = self
                    .descendants_of_kind(&territory.id, TerritoryType::Apv)
                    .into_iter()
                    .map(|t| t.id.as_str())
                    .collect();
                families
                    .iter()
                    .filter(|f| apvs.contains(f.apv_id.as_str()))
                    .flat_map(|f| f.members.iter().map(String::as_str))
                    .collect()
            }
            TerritoryType::Apv => families
                .iter()
                .filter(|f| f.apv_id == territory.id)
                .flat_map(|f| f.members.iter().map(String::as_str))
                .collect(),
            _ => return Vec::new(),
        };

        believers
            .iter()
            .filter(|b| member_ids.contains(b.id.as_str()))
            .collect()
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// 부모 아래에 자식 추가
    pub fn add_child(&mut self, parent_id: &str, mut territory: Territory) -> Result<&Territory> {
        let parent = self
            .slot_of(parent_id)
            .ok_or_else(|| Error::not_found("territory", parent_id))?;
        if self.by_id.contains_key(&territory.id) {
            return Err(Error::Validation(format!(
                "Territory '{}' already exists",
                territory.id
            )));
        }

        territory.parent_id = Some(parent_id.to_string());
        let slot = self.insert(territory, Some(parent));
        self.slots[parent].children.push(slot);
        debug!(parent = parent_id, id = %self.slots[slot].territory.id, "Territory added");
        Ok(&self.slots[slot].territory)
    }

    /// 노드 속성 변경 (ID, 타입, 위치는 유지)
    pub fn update<F>(&mut self, id: &str, apply: F) -> Result<&Territory>
    where
        F: FnOnce(&mut Territory),
    {
        let slot = self
            .slot_of(id)
            .ok_or_else(|| Error::not_found("territory", id))?;
        let node = &mut self.slots[slot].territory;
        let (kept_id, kept_kind, kept_parent) = (node.id.clone(), node.kind, node.parent_id.clone());

        apply(node);
        node.take_children();
        node.id = kept_id;
        node.kind = kept_kind;
        node.parent_id = kept_parent;
        Ok(&*node)
    }

    /// 하위 트리 전체 삭제
    pub fn remove(&mut self, id: &str) -> Result<Territory> {
        let slot = self
            .slot_of(id)
            .ok_or_else(|| Error::not_found("territory", id))?;
        let removed = self.subtree(slot);

        match self.slots[slot].parent {
            Some(parent) => self.slots[parent].children.retain(|&c| c != slot),
            None => self.roots.retain(|&r| r != slot),
        }

        // 남은 트리로 arena 재구성
        *self = Self::build(self.to_tree());
        debug!(id, "Territory removed");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> TerritoryIndex {
        let parish = Territory::new("PAR001", "Ankadifotsy", TerritoryType::Parish)
            .with_child(
                Territory::new("ZONE001", "Faritra 1", TerritoryType::Zone)
                    .with_child(Territory::new("APV001", "Masina Maria", TerritoryType::Apv))
                    .with_child(Territory::new("APV002", "Masina Josefa", TerritoryType::Apv)),
            )
            .with_child(
                Territory::new("ZONE002", "Faritra 2", TerritoryType::Zone)
                    .with_child(Territory::new("APV003", "Masina Petera", TerritoryType::Apv)),
            );
        let arch = Territory::new("ARC001", "Antananarivo", TerritoryType::Archdiocese)
            .with_child(parish);
        TerritoryIndex::build(vec![arch])
    }

    #[test]
    fn test_find_and_path() {
        let index = tree();
        assert_eq!(index.find_by_id("APV002").unwrap().name, "Masina Josefa");
        assert!(index.find_by_id("NOPE").is_none());

        let path: Vec<_> = index
            .path_to("APV003")
            .unwrap()
            .into_iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(path, vec!["ARC001", "PAR001", "ZONE002", "APV003"]);
        assert!(index.path_to("NOPE").is_none());
    }

    #[test]
    fn test_parent_id_filled_from_tree() {
        let index = tree();
        assert_eq!(
            index.find_by_id("APV001").unwrap().parent_id.as_deref(),
            Some("ZONE001")
        );
        assert_eq!(index.parent_of("ZONE002").unwrap().id, "PAR001");
        assert!(index.parent_of("ARC001").is_none());
    }

    #[test]
    fn test_first_duplicate_wins() {
        let index = TerritoryIndex::build(vec![
            Territory::new("P1", "first", TerritoryType::Parish)
                .with_child(Territory::new("Z1", "inner", TerritoryType::Zone)),
            Territory::new("Z1", "outer", TerritoryType::Zone),
        ]);
        assert_eq!(index.find_by_id("Z1").unwrap().name, "inner");
    }

    #[test]
    fn test_kind_queries() {
        let index = tree();
        assert_eq!(index.apv_ids_in_zone("ZONE001"), vec!["APV001", "APV002"]);
        assert!(index.apv_ids_in_zone("NOPE").is_empty());

        let apvs: Vec<_> = index
            .descendants_of_kind("PAR001", TerritoryType::Apv)
            .into_iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(apvs, vec!["APV001", "APV002", "APV003"]);

        assert_eq!(
            index.ancestor_of_kind("APV003", TerritoryType::Parish).unwrap().id,
            "PAR001"
        );
        assert_eq!(
            index.ancestor_of_kind("ZONE001", TerritoryType::Zone).unwrap().id,
            "ZONE001"
        );
    }

    #[test]
    fn test_members_under() {
        let index = tree();
        let mut b1 = Believer::new("M1", "Jean", "Rakoto");
        b1.parish = "PAR001".to_string();
        let b2 = Believer::new("M2", "Marie", "Rabe");
        let b3 = Believer::new("M3", "Paul", "Rasoa");
        let believers = vec![b1, b2, b3];
        let families = vec![
            Family {
                id: "F1".to_string(),
                apv_id: "APV002".to_string(),
                members: vec!["M2".to_string()],
                ..Default::default()
            },
            Family {
                id: "F2".to_string(),
                apv_id: "APV003".to_string(),
                members: vec!["M3".to_string()],
                ..Default::default()
            },
        ];

        let ids = |t: &str| -> Vec<String> {
            let node = index.find_by_id(t).unwrap();
            index
                .members_under(node, &families, &believers)
                .into_iter()
                .map(|b| b.id.clone())
                .collect()
        };
        assert_eq!(ids("PAR001"), vec!["M1"]);
        assert_eq!(ids("ZONE001"), vec!["M2"]);
        assert_eq!(ids("APV003"), vec!["M3"]);
        assert!(ids("ARC001").is_empty());
    }

    #[test]
    fn test_add_update_remove() {
        let mut index = tree();
        index
            .add_child("ZONE002", Territory::new("APV004", "Vaovao", TerritoryType::Apv))
            .unwrap();
        assert_eq!(index.apv_ids_in_zone("ZONE002"), vec!["APV003", "APV004"]);
        assert!(index
            .add_child("ZONE002", Territory::new("APV004", "dup", TerritoryType::Apv))
            .is_err());
        assert!(index
            .add_child("NOPE", Territory::new("X", "x", TerritoryType::Apv))
            .is_err());

        index
            .update("APV004", |t| {
                t.name = "Masina Andrea".to_string();
                t.id = "HIJACK".to_string();
            })
            .unwrap();
        assert_eq!(index.find_by_id("APV004").unwrap().name, "Masina Andrea");
        assert!(index.find_by_id("HIJACK").is_none());

        let removed = index.remove("ZONE001").unwrap();
        assert_eq!(removed.apvs.len(), 2);
        assert!(index.find_by_id("APV001").is_none());
        assert!(index.find_by_id("ZONE002").is_some());
    }

    #[test]
    fn test_tree_roundtrip_keeps_shape() {
        let index = tree();
        let rebuilt = TerritoryIndex::build(index.to_tree());
        assert_eq!(rebuilt.len(), index.len());
        assert_eq!(rebuilt.to_tree()[0].parishes[0].zones[1].apvs[0].id, "APV003");
    }
}
