//! Presentation of gift reports.
//!
//! Converts reports into cards and text suitable for the terminal, or into
//! a serializable view for JSON output.

use giftwise_model::{Character, GiftMatch, GiftReport, ReactionTier};
use serde::Serialize;
use std::fmt;

const RULE_WIDTH: usize = 50;

/// Display fields for one character in a report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CharacterCard {
    pub name: String,

    /// Season and day, e.g. "Fall 13"
    pub birthday: String,

    pub residence: String,

    /// Comma-separated family members, or "none"
    pub family: String,

    pub can_marry: bool,

    /// Similarity with two decimals
    pub score: String,
}

impl CharacterCard {
    pub fn from_match(m: &GiftMatch<'_>) -> Self {
        let character = m.character;
        Self {
            name: character.name.clone(),
            birthday: character.birthday.to_string(),
            residence: character.residence.clone(),
            family: format_family(&character.family),
            can_marry: character.can_marry,
            score: format_score(m.score),
        }
    }
}

/// One tier of the view, present even when empty.
#[derive(Debug, Clone, Serialize)]
pub struct TierView {
    pub tier: ReactionTier,
    pub characters: Vec<CharacterCard>,
}

/// Serializable form of a report.
#[derive(Debug, Clone, Serialize)]
pub struct ReportView {
    pub query: String,
    pub tiers: Vec<TierView>,
}

impl ReportView {
    pub fn from_report(report: &GiftReport<'_>) -> Self {
        Self {
            query: report.query.clone(),
            tiers: report
                .buckets
                .iter()
                .map(|bucket| TierView {
                    tier: bucket.tier,
                    characters: bucket.matches.iter().map(CharacterCard::from_match).collect(),
                })
                .collect(),
        }
    }
}

pub fn format_family(family: &[String]) -> String {
    if family.is_empty() {
        "none".to_string()
    } else {
        family.join(", ")
    }
}

pub fn format_score(score: f32) -> String {
    format!("{:.2}", score)
}

/// Text form of a report, one section per tier in fixed order.
pub struct ReportText<'r, 'a>(pub &'r GiftReport<'a>);

impl fmt::Display for ReportText<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        if report.is_empty() {
            return writeln!(f, "No character reacts to '{}'", report.query);
        }

        writeln!(f, "RESULTS FOR: {}", report.query.to_uppercase())?;
        writeln!(f, "{}", "=".repeat(RULE_WIDTH))?;

        for bucket in &report.buckets {
            let heading = bucket.tier.label().to_uppercase();
            writeln!(f, "\n{}", heading)?;
            writeln!(f, "{}", "-".repeat(heading.len()))?;

            if bucket.matches.is_empty() {
                writeln!(f, "No characters in this tier")?;
                continue;
            }

            for m in &bucket.matches {
                let card = CharacterCard::from_match(m);
                writeln!(f, "\n{}", card.name)?;
                writeln!(f, "Birthday: {}", card.birthday)?;
                writeln!(f, "Lives in: {}", card.residence)?;
                writeln!(f, "Family: {}", card.family)?;
                writeln!(f, "Can marry: {}", if card.can_marry { "yes" } else { "no" })?;
                writeln!(f, "Similarity: {}", card.score)?;
            }
        }

        Ok(())
    }
}

/// Render a report as text. See [`ReportText`].
pub fn render_report(report: &GiftReport<'_>) -> String {
    ReportText(report).to_string()
}

/// Generate a one-line count of matches per tier.
pub fn summarize_report(report: &GiftReport<'_>) -> String {
    if report.is_empty() {
        return "No reactions".to_string();
    }

    report
        .buckets
        .iter()
        .map(|b| format!("{} {}", b.tier.label(), b.matches.len()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Describe a single character's reaction to a gift.
pub fn describe_reaction(character: &Character, tier: Option<ReactionTier>, gift: &str) -> String {
    match tier {
        Some(tier) => format!("{} reacts to '{}': {}", character.name, gift, tier.label()),
        None => format!("{} has no listed reaction to '{}'", character.name, gift),
    }
}
