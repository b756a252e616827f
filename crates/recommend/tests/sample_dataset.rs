use giftwise_model::{PreferenceTable, ReactionTier};
use giftwise_recommend::{classify, rank, recommend, RecommendError};
use giftwise_source_csv::{CsvSource, CsvSourceConfig, PreferenceSource};
use pretty_assertions::assert_eq;
use std::path::PathBuf;

fn sample_table() -> PreferenceTable {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data/characters.csv");
    CsvSource::new(CsvSourceConfig {
        path,
        ..Default::default()
    })
    .load()
    .expect("sample dataset loads")
}

fn names_in(table: &PreferenceTable, gift: &str, tier: ReactionTier) -> Vec<String> {
    let report = recommend(table, gift);
    let mut names: Vec<String> = report
        .bucket(tier)
        .matches
        .iter()
        .map(|m| m.character.name.clone())
        .collect();
    names.sort();
    names
}

#[test]
fn test_sample_loads_every_row() {
    let table = sample_table();
    assert_eq!(table.len(), 8);
    let linus = table.get("Linus").unwrap();
    assert!(linus.gifts.loved.raw().iter().any(|g| g == "Dish O' The Sea"));
    assert!(linus.family.is_empty());
    assert!(!linus.can_marry);
}

#[test]
fn test_classify_against_sample() {
    let table = sample_table();
    assert_eq!(classify(&table, "Abigail", "Amethyst"), Ok(Some(ReactionTier::Loved)));
    assert_eq!(classify(&table, "Abigail", "Nonexistent Item"), Ok(None));
    assert_eq!(classify(&table, "Pam", "pina colada"), Ok(Some(ReactionTier::Loved)));
    assert_eq!(classify(&table, "Linus", "dish o' the sea"), Ok(Some(ReactionTier::Loved)));
    assert_eq!(
        classify(&table, "NoSuchCharacter", "Amethyst"),
        Err(RecommendError::CharacterNotFound("NoSuchCharacter".into()))
    );
}

#[test]
fn test_daffodil_report() {
    let table = sample_table();
    assert_eq!(
        names_in(&table, "Daffodil", ReactionTier::Liked),
        vec!["Emily", "Haley", "Leah", "Linus", "Pam", "Pierre"]
    );
    assert_eq!(names_in(&table, "Daffodil", ReactionTier::Disliked), vec!["Sebastian"]);
    assert!(names_in(&table, "Daffodil", ReactionTier::Loved).is_empty());
}

#[test]
fn test_holly_report_is_ordered() {
    let table = sample_table();
    let report = recommend(&table, "Holly");

    let matches: Vec<_> = report.matches().collect();
    assert_eq!(matches.len(), 5);
    assert_eq!(matches[0].character.name, "Leah");
    assert_eq!(matches[0].tier, ReactionTier::Liked);
    for pair in matches.windows(2) {
        assert!(pair[0].tier.rank() <= pair[1].tier.rank());
        if pair[0].tier == pair[1].tier {
            assert!(pair[0].score >= pair[1].score);
        }
    }
}

#[test]
fn test_every_sample_score_in_range() {
    let table = sample_table();
    for gift in ["Quartz", "Void Egg", "Tea Leaves", "Café au lait", "!!!", "Clay"] {
        for (_, score) in rank(&table, gift) {
            assert!((0.0..=1.0).contains(&score));
        }
    }
    assert!(rank(&table, "Dragon Tooth").iter().all(|(_, s)| *s == 0.0));
}
