mod common;

use common::{repository_with_rows, seeded_repository};
use periodic_core::{Block, MalformedRowError, RepoError};
use std::collections::HashSet;

#[test]
fn get_by_number_returns_hydrogen() {
    let repo = seeded_repository();

    let hydrogen = repo.get_by_number(1).unwrap().unwrap();
    assert_eq!(hydrogen.atomic_number, 1);
    assert_eq!(hydrogen.symbol, "H");
    assert_eq!(hydrogen.name, "Hydrogen");
    assert_eq!(hydrogen.block, Block::S);
    assert_eq!(hydrogen.period, 1);
    assert_eq!(hydrogen.group_number, Some(1));
    assert_eq!(hydrogen.electron_configuration, "1s1");
    assert!((hydrogen.atomic_mass - 1.008).abs() < 1e-9);
}

#[test]
fn get_by_number_matches_every_stored_number() {
    let repo = seeded_repository();

    for number in 1..=10 {
        let element = repo.get_by_number(number).unwrap().unwrap();
        assert_eq!(element.atomic_number, number);
    }
}

#[test]
fn get_by_number_absent_is_none_not_error() {
    let repo = seeded_repository();

    assert!(repo.get_by_number(999).unwrap().is_none());
    assert!(repo.get_by_number(0).unwrap().is_none());
    assert!(repo.get_by_number(-3).unwrap().is_none());
}

#[test]
fn get_by_symbol_is_exact_and_case_sensitive() {
    let repo = seeded_repository();

    let helium = repo.get_by_symbol("He").unwrap().unwrap();
    assert_eq!(helium.atomic_number, 2);

    assert!(repo.get_by_symbol("he").unwrap().is_none());
    assert!(repo.get_by_symbol("HE").unwrap().is_none());
    assert!(repo.get_by_symbol("N").unwrap().is_some());
    assert!(repo.get_by_symbol("Ne ").unwrap().is_none());
    assert!(repo.get_by_symbol("").unwrap().is_none());
}

#[test]
fn get_by_block_p_returns_six_p_block_elements() {
    let repo = seeded_repository();

    let p_block = repo.get_by_block(Block::P).unwrap();
    assert_eq!(p_block.len(), 6);
    assert!(p_block.iter().all(|element| element.block == Block::P));
}

#[test]
fn block_lookups_partition_the_full_listing() {
    let repo = seeded_repository();

    let mut from_blocks = HashSet::new();
    for block in Block::ALL {
        for element in repo.get_by_block(block).unwrap() {
            assert!(from_blocks.insert(element.atomic_number));
        }
    }
    let all: HashSet<_> = repo
        .get_all()
        .unwrap()
        .into_iter()
        .map(|element| element.atomic_number)
        .collect();

    assert_eq!(from_blocks, all);
}

#[test]
fn get_by_period_is_ordered_by_atomic_number() {
    let repo = seeded_repository();

    let symbols: Vec<_> = repo
        .get_by_period(2)
        .unwrap()
        .into_iter()
        .map(|element| element.symbol)
        .collect();
    assert_eq!(symbols, vec!["Li", "Be", "B", "C", "N", "O", "F", "Ne"]);

    assert_eq!(repo.get_by_period(1).unwrap().len(), 2);
    assert!(repo.get_by_period(7).unwrap().is_empty());
}

#[test]
fn get_all_is_ascending_despite_insert_order() {
    let repo = seeded_repository();

    let numbers: Vec<_> = repo
        .get_all()
        .unwrap()
        .into_iter()
        .map(|element| element.atomic_number)
        .collect();
    assert_eq!(numbers, (1..=10).collect::<Vec<_>>());
}

#[test]
fn get_all_on_empty_dataset_is_empty() {
    let repo = repository_with_rows("");
    assert!(repo.get_all().unwrap().is_empty());
    assert!(repo.get_by_block(Block::S).unwrap().is_empty());
}

#[test]
fn null_group_and_integral_mass_are_normalized() {
    let repo = repository_with_rows(
        "INSERT INTO Elements VALUES (113, 'Nh', 'Nihonium', '286', 'p', NULL, 7, '[Rn] 5f14 6d10 7s2 7p1');",
    );

    let nihonium = repo.get_by_symbol("Nh").unwrap().unwrap();
    assert_eq!(nihonium.group_number, None);
    assert_eq!(nihonium.atomic_mass, 286.0);
}

#[test]
fn non_numeric_mass_surfaces_as_malformed_row() {
    let repo = repository_with_rows(
        "INSERT INTO Elements VALUES (1, 'H', 'Hydrogen', 'unknown', 's', 1, 1, '1s1');",
    );

    let err = repo.get_by_number(1).unwrap_err();
    assert!(matches!(
        err,
        RepoError::MalformedRow(MalformedRowError::NonNumericMass(ref value)) if value == "unknown"
    ));
}

#[test]
fn unknown_block_in_store_surfaces_as_malformed_row() {
    let repo = repository_with_rows(
        "INSERT INTO Elements VALUES (26, 'Fe', 'Iron', 55.845, 'd', 8, 4, '[Ar] 3d6 4s2');",
    );

    assert!(matches!(
        repo.get_all(),
        Err(RepoError::MalformedRow(MalformedRowError::InvalidColumn {
            column: "block",
            ..
        }))
    ));
}
