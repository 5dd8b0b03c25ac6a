//! MemoryStore - 메모리 저장소 + JSON 자동 저장

use super::{DataStore, NewBeliever, NewContribution, NewFamily, Placement};
use crate::territory::{TerritoryIndex, TerritoryTree};
use parish_foundation::{
    Believer, Contribution, Error, Family, JsonStore, Result, Sacrament, Territory,
    TerritoryType, User,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// 저장 형식 (`data.json`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParishData {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub believers: Vec<Believer>,
    #[serde(default)]
    pub families: Vec<Family>,
    #[serde(default)]
    pub territories: TerritoryTree,
}

/// 자동 저장 대상
#[derive(Debug, Clone)]
struct AutoSave {
    store: JsonStore,
    filename: String,
}

/// 메모리 DataStore
///
/// 변경 직후 자동 저장이 켜져 있으면 JSON 파일에 기록한다.
/// 저장 실패는 경고만 남기고 메모리 변경은 유지한다.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    users: Vec<User>,
    believers: Vec<Believer>,
    families: Vec<Family>,
    territories: TerritoryIndex,
    autosave: Option<AutoSave>,
}

impl MemoryStore {
    pub fn new(data: ParishData) -> Self {
        Self {
            users: data.users,
            believers: data.believers,
            families: data.families,
            territories: data.territories.into(),
            autosave: None,
        }
    }

    /// 샘플 데이터로 생성
    pub fn sample() -> Self {
        Self::new(super::sample_data())
    }

    /// JSON 파일에서 로드하고 자동 저장 활성화
    pub fn open(store: JsonStore, filename: impl Into<String>) -> Result<Self> {
        let filename = filename.into();
        let data: ParishData = store.load(&filename)?;
        info!(
            path = %store.file_path(&filename).display(),
            users = data.users.len(),
            believers = data.believers.len(),
            families = data.families.len(),
            "Parish data loaded"
        );
        Ok(Self::new(data).with_autosave(store, filename))
    }

    pub fn with_autosave(mut self, store: JsonStore, filename: impl Into<String>) -> Self {
        self.autosave = Some(AutoSave {
            store,
            filename: filename.into(),
        });
        self
    }

    /// 현재 상태를 저장 형식으로
    pub fn snapshot(&self) -> ParishData {
        ParishData {
            users: self.users.clone(),
            believers: self.believers.clone(),
            families: self.families.clone(),
            territories: TerritoryTree::from(&self.territories),
        }
    }

    pub fn save_to(&self, store: &JsonStore, filename: &str) -> Result<()> {
        store.save(filename, &self.snapshot())
    }

    fn persist(&self) {
        if let Some(auto) = &self.autosave {
            match self.save_to(&auto.store, &auto.filename) {
                Ok(()) => debug!(file = %auto.filename, "Parish data saved"),
                Err(e) => warn!("Failed to save parish data: {}", e),
            }
        }
    }

    fn new_id(prefix: &str) -> String {
        format!("{}-{}", prefix, Uuid::new_v4())
    }

    fn believer_mut(&mut self, id: &str) -> Result<&mut Believer> {
        self.believers
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| Error::not_found("believer", id))
    }

    fn family_mut(&mut self, id: &str) -> Result<&mut Family> {
        self.families
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| Error::not_found("family", id))
    }

    /// APV가 속한 본당 ID
    fn parish_above(&self, apv_id: &str) -> Option<String> {
        self.territories
            .ancestor_of_kind(apv_id, TerritoryType::Parish)
            .map(|p| p.id.clone())
    }
}

impl DataStore for MemoryStore {
    fn users(&self) -> &[User] {
        &self.users
    }

    fn believers(&self) -> &[Believer] {
        &self.believers
    }

    fn families(&self) -> &[Family] {
        &self.families
    }

    fn territories(&self) -> &TerritoryIndex {
        &self.territories
    }

    // ========================================================================
    // Family & Contribution
    // ========================================================================

    fn add_contribution_to_family(
        &mut self,
        family_id: &str,
        contribution: NewContribution,
    ) -> Result<Contribution> {
        let record = Contribution {
            id: Self::new_id("C"),
            date: contribution.date,
            category: contribution.category,
            amount: contribution.amount,
        };
        self.family_mut(family_id)?.contributions.push(record.clone());
        info!(
            family = family_id,
            category = record.category.name(),
            amount = record.amount,
            "Contribution recorded"
        );
        self.persist();
        Ok(record)
    }

    fn add_family(&mut self, family: NewFamily) -> Result<Family> {
        let mut members = family.members;
        if !family.head_of_family.is_empty() && !members.contains(&family.head_of_family) {
            members.insert(0, family.head_of_family.clone());
        }
        let parish = if family.parish.is_empty() {
            self.parish_above(&family.apv_id).unwrap_or_default()
        } else {
            family.parish
        };

        let record = Family {
            id: Self::new_id("F"),
            head_of_family: family.head_of_family,
            members,
            address: family.address,
            apv_id: family.apv_id,
            parish,
            contributions: Vec::new(),
        };
        self.families.push(record.clone());
        info!(family = %record.id, apv = %record.apv_id, "Family added");
        self.persist();
        Ok(record)
    }

    fn update_family(&mut self, family: Family) -> Result<()> {
        let slot = self.family_mut(&family.id)?;
        *slot = family;
        info!(family = %slot.id, "Family updated");
        self.persist();
        Ok(())
    }

    fn delete_family(&mut self, family_id: &str) -> Result<()> {
        let position = self
            .families
            .iter()
            .position(|f| f.id == family_id)
            .ok_or_else(|| Error::not_found("family", family_id))?;
        let family = self.families.remove(position);

        self.believers.retain(|b| !family.has_member(&b.id));
        self.users.retain(|u| {
            u.believer_id
                .as_deref()
                .map_or(true, |id| !family.has_member(id))
        });
        info!(family = family_id, members = family.members.len(), "Family deleted");
        self.persist();
        Ok(())
    }

    fn add_believer_to_family(&mut self, family_id: &str, believer_id: &str) -> Result<()> {
        let family = self.family_mut(family_id)?;
        if family.has_member(believer_id) {
            return Ok(());
        }
        family.members.push(believer_id.to_string());
        info!(family = family_id, believer = believer_id, "Member added to family");
        self.persist();
        Ok(())
    }

    // ========================================================================
    // Believer
    // ========================================================================

    fn update_believer_sacrament(
        &mut self,
        believer_id: &str,
        sacrament: Sacrament,
        date: &str,
    ) -> Result<()> {
        let believer = self.believer_mut(believer_id)?;
        sacrament.record(believer, date);
        info!(believer = believer_id, sacrament = sacrament.key(), date, "Sacrament recorded");
        self.persist();
        Ok(())
    }

    fn add_believer(&mut self, new: NewBeliever) -> Result<Believer> {
        let mut believer = new.believer;
        believer.id = Self::new_id("M");

        let (family_id, heads_new_family) = match new.placement {
            Placement::ExistingFamily(family_id) => {
                let family = self
                    .families
                    .iter()
                    .find(|f| f.id == family_id)
                    .ok_or_else(|| Error::not_found("family", &family_id))?;
                if believer.parish.is_empty() {
                    believer.parish = family.parish.clone();
                }
                (family_id, false)
            }
            Placement::NewFamily { address, apv_id } => {
                if self.territories.find_by_id(&apv_id).is_none() {
                    return Err(Error::not_found("territory", &apv_id));
                }
                if believer.parish.is_empty() {
                    believer.parish = self.parish_above(&apv_id).unwrap_or_default();
                }
                let family = Family {
                    id: Self::new_id("F"),
                    address,
                    apv_id,
                    parish: believer.parish.clone(),
                    ..Default::default()
                };
                let id = family.id.clone();
                self.families.push(family);
                (id, true)
            }
        };

        believer.family_id = family_id.clone();
        let family = self.family_mut(&family_id)?;
        family.members.push(believer.id.clone());
        if heads_new_family {
            family.head_of_family = believer.id.clone();
        }

        self.believers.push(believer.clone());
        info!(
            believer = %believer.id,
            family = %family_id,
            new_family = heads_new_family,
            "Believer added"
        );
        self.persist();
        Ok(believer)
    }

    fn update_believer(&mut self, believer: Believer) -> Result<()> {
        let slot = self.believer_mut(&believer.id)?;
        *slot = believer;
        info!(believer = %slot.id, "Believer updated");
        self.persist();
        Ok(())
    }

    fn delete_believer(&mut self, believer_id: &str) -> Result<()> {
        let position = self
            .believers
            .iter()
            .position(|b| b.id == believer_id)
            .ok_or_else(|| Error::not_found("believer", believer_id))?;
        self.believers.remove(position);

        for family in &mut self.families {
            family.members.retain(|m| m != believer_id);
        }
        self.users
            .retain(|u| u.believer_id.as_deref() != Some(believer_id));
        info!(believer = believer_id, "Believer deleted");
        self.persist();
        Ok(())
    }

    // ========================================================================
    // Territory
    // ========================================================================

    fn add_territory(&mut self, parent_id: &str, mut territory: Territory) -> Result<Territory> {
        if territory.id.is_empty() {
            territory.id = Self::new_id(territory.kind.id_prefix());
        }
        let added = self.territories.add_child(parent_id, territory)?.clone();
        info!(parent = parent_id, id = %added.id, kind = %added.kind, "Territory added");
        self.persist();
        Ok(added)
    }

    fn update_territory(&mut self, territory: Territory) -> Result<()> {
        let id = territory.id.clone();
        self.territories.update(&id, move |node| *node = territory)?;
        info!(id = %id, "Territory updated");
        self.persist();
        Ok(())
    }

    fn delete_territory(&mut self, territory_id: &str) -> Result<Territory> {
        let removed = self.territories.remove(territory_id)?;
        info!(id = territory_id, "Territory deleted");
        self.persist();
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parish_foundation::{ContributionCategory, Role};

    fn store() -> MemoryStore {
        MemoryStore::sample()
    }

    #[test]
    fn test_add_contribution() {
        let mut store = store();
        let before = store.family("F001").unwrap().contributions.len();
        let record = store
            .add_contribution_to_family(
                "F001",
                NewContribution {
                    date: "2024-05-01".to_string(),
                    category: ContributionCategory::Tithe,
                    amount: 50_000,
                },
            )
            .unwrap();

        assert!(record.id.starts_with("C-"));
        let family = store.family("F001").unwrap();
        assert_eq!(family.contributions.len(), before + 1);
        assert_eq!(family.contributions.last().unwrap().amount, 50_000);
    }

    #[test]
    fn test_missing_family_is_not_found() {
        let mut store = store();
        let err = store
            .add_contribution_to_family(
                "NOPE",
                NewContribution {
                    date: "2024-05-01".to_string(),
                    category: ContributionCategory::Donation,
                    amount: 1,
                },
            )
            .unwrap_err();
        assert!(matches!(err, Error::NotFound { kind: "family", .. }));
    }

    #[test]
    fn test_sacrament_sets_flag_and_date() {
        let mut store = store();
        store
            .update_believer_sacrament("M002", Sacrament::Confirmation, "2020-06-14")
            .unwrap();
        let b = store.believer("M002").unwrap();
        assert!(b.is_confirmed);
        assert_eq!(b.confirmation_date.as_deref(), Some("2020-06-14"));
    }

    #[test]
    fn test_add_believer_to_existing_family() {
        let mut store = store();
        let created = store
            .add_believer(NewBeliever {
                believer: Believer::new("", "Lova", "Rakoto"),
                placement: Placement::ExistingFamily("F001".to_string()),
            })
            .unwrap();

        assert!(created.id.starts_with("M-"));
        assert_eq!(created.family_id, "F001");
        assert_eq!(created.parish, "PAR001");
        let family = store.family("F001").unwrap();
        assert_eq!(family.members.last(), Some(&created.id));
        assert_eq!(family.head_of_family, "M001");
    }

    #[test]
    fn test_add_believer_with_new_family() {
        let mut store = store();
        let created = store
            .add_believer(NewBeliever {
                believer: Believer::new("", "Fara", "Randria"),
                placement: Placement::NewFamily {
                    address: "Lot 12 Ambatonakanga".to_string(),
                    apv_id: "APV002".to_string(),
                },
            })
            .unwrap();

        let family = store.family_of(&created.id).unwrap();
        assert_eq!(family.head_of_family, created.id);
        assert_eq!(family.members, vec![created.id.clone()]);
        assert_eq!(family.apv_id, "APV002");
        assert_eq!(family.parish, "PAR001");
    }

    #[test]
    fn test_add_believer_unknown_apv() {
        let mut store = store();
        let families = store.families().len();
        let result = store.add_believer(NewBeliever {
            believer: Believer::new("", "X", "Y"),
            placement: Placement::NewFamily {
                address: "somewhere".to_string(),
                apv_id: "APV999".to_string(),
            },
        });
        assert!(result.is_err());
        assert_eq!(store.families().len(), families);
    }

    #[test]
    fn test_delete_believer_cascades() {
        let mut store = store();
        assert!(store.users().iter().any(|u| u.believer_id.as_deref() == Some("M002")));

        store.delete_believer("M002").unwrap();
        assert!(store.believer("M002").is_none());
        assert!(!store.family("F001").unwrap().has_member("M002"));
        assert!(!store.users().iter().any(|u| u.believer_id.as_deref() == Some("M002")));
    }

    #[test]
    fn test_delete_family_cascades() {
        let mut store = store();
        store.delete_family("F001").unwrap();

        assert!(store.family("F001").is_none());
        assert!(store.believer("M001").is_none());
        assert!(store.believer("M002").is_none());
        assert!(!store.users().iter().any(|u| u.role == Role::HeadOfFamily));
        assert!(store.believer("M003").is_some());
    }

    #[test]
    fn test_add_member_is_idempotent() {
        let mut store = store();
        store.add_believer_to_family("F002", "M001").unwrap();
        store.add_believer_to_family("F002", "M001").unwrap();
        let count = store
            .family("F002")
            .unwrap()
            .members
            .iter()
            .filter(|m| *m == "M001")
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_territory_mutations() {
        let mut store = store();
        let zone = store
            .add_territory("PAR001", Territory::new("", "Faritra 3", TerritoryType::Zone))
            .unwrap();
        assert!(zone.id.starts_with("ZONE-"));
        assert_eq!(zone.parent_id.as_deref(), Some("PAR001"));

        let mut renamed = zone.clone();
        renamed.name = "Faritra Masina".to_string();
        store.update_territory(renamed).unwrap();
        assert_eq!(store.territory(&zone.id).unwrap().name, "Faritra Masina");

        store.delete_territory(&zone.id).unwrap();
        assert!(store.territory(&zone.id).is_none());
    }

    #[test]
    fn test_autosave_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let json = JsonStore::new(dir.path());
        MemoryStore::sample().save_to(&json, "data.json").unwrap();

        let mut opened = MemoryStore::open(json.clone(), "data.json").unwrap();
        opened.delete_believer("M004").unwrap();

        let reopened = MemoryStore::open(json, "data.json").unwrap();
        assert!(reopened.believer("M004").is_none());
        assert!(reopened.territory("APV003").is_some());
    }
}
