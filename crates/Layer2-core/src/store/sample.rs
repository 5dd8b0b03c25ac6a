//! 샘플 데이터 (데모 + 테스트)
//!
//! ```text
//! ARC001 Antananarivo
//! └── DIO001 → VIC001 → DIS001
//!     └── PAR001 Ankadifotsy
//!         ├── ZONE001 (APV001, APV002)
//!         └── ZONE002 (APV003)
//! ```

use super::ParishData;
use crate::territory::TerritoryTree;
use parish_foundation::{
    Believer, Contribution, ContributionCategory, ExecTeam, Family, Gender, Role, Territory,
    TerritoryType, User,
};

fn territories() -> TerritoryTree {
    let zone1 = Territory::new("ZONE001", "Faritra Avaratra", TerritoryType::Zone)
        .with_child(Territory::new("APV001", "APV Masina Maria", TerritoryType::Apv))
        .with_child(Territory::new("APV002", "APV Masina Josefa", TerritoryType::Apv));
    let zone2 = Territory::new("ZONE002", "Faritra Atsimo", TerritoryType::Zone)
        .with_child(Territory::new("APV003", "APV Masina Petera", TerritoryType::Apv));

    let mut parish = Territory::new("PAR001", "Paroasy Ankadifotsy", TerritoryType::Parish)
        .with_child(zone1)
        .with_child(zone2);
    parish.priest = Some("Mompera Jean-Claude".to_string());
    parish.address = Some("Ankadifotsy, Antananarivo".to_string());
    parish.leader_id = Some("U_PARISH".to_string());
    parish.exec_team = Some(ExecTeam {
        president: Some("U_PARISH".to_string()),
        ..Default::default()
    });

    let district = Territory::new("DIS001", "Distrika Antananarivo Renivohitra", TerritoryType::District)
        .with_child(parish);
    let vicariate =
        Territory::new("VIC001", "Vikaria Atsimo", TerritoryType::Vicariate).with_child(district);
    let diocese =
        Territory::new("DIO001", "Diosezy Antananarivo", TerritoryType::Diocese).with_child(vicariate);
    let arch = Territory::new("ARC001", "Arsidiosezy Antananarivo", TerritoryType::Archdiocese)
        .with_child(diocese);

    TerritoryTree {
        archdioceses: vec![arch],
    }
}

fn believer(id: &str, first: &str, last: &str, family: &str, gender: Gender) -> Believer {
    let mut b = Believer::new(id, first, last);
    b.family_id = family.to_string();
    b.parish = "PAR001".to_string();
    b.gender = gender;
    b
}

fn believers() -> Vec<Believer> {
    let mut jean = believer("M001", "Jean", "Rakoto", "F001", Gender::Male);
    jean.date_of_birth = "1975-03-12".to_string();
    jean.relationship_to_head = "Head".to_string();
    jean.is_baptized = true;
    jean.baptism_date = Some("1975-04-20".to_string());
    jean.is_married_sacramentally = true;
    jean.marriage_date = Some("2001-08-18".to_string());

    let mut marie = believer("M002", "Marie", "Rakoto", "F001", Gender::Female);
    marie.date_of_birth = "1979-11-02".to_string();
    marie.relationship_to_head = "Spouse".to_string();
    marie.is_baptized = true;
    marie.baptism_date = Some("1979-12-25".to_string());

    let mut paul = believer("M003", "Paul", "Rabe", "F002", Gender::Male);
    paul.date_of_birth = "1968-07-30".to_string();
    paul.relationship_to_head = "Head".to_string();

    let mut hery = believer("M004", "Hery", "Rabe", "F002", Gender::Male);
    hery.date_of_birth = "2004-01-15".to_string();
    hery.relationship_to_head = "Child".to_string();

    let mut soa = believer("M005", "Soa", "Rasoa", "F003", Gender::Female);
    soa.date_of_birth = "1990-05-09".to_string();
    soa.relationship_to_head = "Head".to_string();

    vec![jean, marie, paul, hery, soa]
}

fn family(id: &str, head: &str, members: &[&str], address: &str, apv: &str) -> Family {
    Family {
        id: id.to_string(),
        head_of_family: head.to_string(),
        members: members.iter().map(|m| m.to_string()).collect(),
        address: address.to_string(),
        apv_id: apv.to_string(),
        parish: "PAR001".to_string(),
        contributions: Vec::new(),
    }
}

fn families() -> Vec<Family> {
    let mut rakoto = family("F001", "M001", &["M001", "M002"], "Lot II A 12 Ankadifotsy", "APV001");
    rakoto.contributions.push(Contribution {
        id: "C001".to_string(),
        date: "2024-01-07".to_string(),
        category: ContributionCategory::Tithe,
        amount: 20_000,
    });

    vec![
        rakoto,
        family("F002", "M003", &["M003", "M004"], "Lot IV B 3 Ambohijatovo", "APV002"),
        family("F003", "M005", &["M005"], "Lot 67 Andravoahangy", "APV003"),
    ]
}

fn users() -> Vec<User> {
    vec![
        User::new("U_ADMIN", "admin", Role::Admin)
            .owning("ARCHDIOCESE", "ARC001")
            .home("PAR001"),
        User::new("U_PARISH", "filoha.paroasy", Role::ParishLeader)
            .owning("PARISH", "PAR001")
            .home("PAR001"),
        User::new("U_PRIEST", "mompera", Role::Priest)
            .owning("PARISH", "PAR001")
            .home("PAR001"),
        User::new("U_ZONE", "filoha.faritra", Role::ZoneLeader)
            .owning("ZONE", "ZONE001")
            .home("PAR001")
            .acting_on("APV003"),
        User::new("U_APV", "mpitarika.apv", Role::ApvLeader)
            .owning("APV", "APV001")
            .home("PAR001"),
        User::new("U_HOF", "jean.rakoto", Role::HeadOfFamily)
            .owning("FAMILY", "F001")
            .home("PAR001")
            .linked_to("M001"),
        User::new("U_BELIEVER", "marie.rakoto", Role::Believer)
            .home("PAR001")
            .linked_to("M002"),
    ]
}

/// 데모용 교구 데이터
pub fn sample_data() -> ParishData {
    ParishData {
        users: users(),
        believers: believers(),
        families: families(),
        territories: territories(),
    }
}
