//! Core domain model for giftwise gift recommendations.
//!
//! This crate defines the fundamental types used throughout the system:
//! - `Character`: A villager with birthday, residence, family and gift tiers
//! - `ReactionTier`: Loved, Liked, Neutral, Disliked, Hated
//! - `PreferenceTable`: The immutable table of characters loaded once per run
//! - `GiftReport`: The tier-grouped, similarity-ordered answer to a query

use giftwise_features::normalize_text;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Season of a character's birthday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
    /// Missing or unrecognised season
    Unknown,
}

impl Default for Season {
    fn default() -> Self {
        Self::Unknown
    }
}

impl From<&str> for Season {
    fn from(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "SPRING" => Self::Spring,
            "SUMMER" => Self::Summer,
            "FALL" | "AUTUMN" => Self::Fall,
            "WINTER" => Self::Winter,
            _ => Self::Unknown,
        }
    }
}

impl Season {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Spring => "Spring",
            Self::Summer => "Summer",
            Self::Fall => "Fall",
            Self::Winter => "Winter",
            Self::Unknown => "Unknown",
        }
    }
}

/// Birthday of a character.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Birthday {
    pub season: Season,

    /// Day of the season (1-28), absent when the source cell is empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<u8>,
}

impl Birthday {
    pub fn new(season: Season, day: u8) -> Self {
        Self {
            season,
            day: Some(day),
        }
    }
}

impl fmt::Display for Birthday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.day {
            Some(day) => write!(f, "{} {}", self.season.label(), day),
            None => f.write_str(self.season.label()),
        }
    }
}

/// How a character reacts to a gift.
///
/// Variants are declared in desirability order, so the derived `Ord` is the
/// ranking order: `Loved < Liked < Neutral < Disliked < Hated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionTier {
    Loved,
    Liked,
    Neutral,
    Disliked,
    Hated,
}

impl ReactionTier {
    /// Every tier in priority order. Classification checks tiers in this
    /// order and reports are grouped in this order.
    pub const ALL: [ReactionTier; 5] = [
        Self::Loved,
        Self::Liked,
        Self::Neutral,
        Self::Disliked,
        Self::Hated,
    ];

    /// Sort rank, 0 for `Loved` through 4 for `Hated`.
    pub fn rank(&self) -> u8 {
        *self as u8
    }

    /// Get a human-readable label for this tier.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Loved => "Loved",
            Self::Liked => "Liked",
            Self::Neutral => "Neutral",
            Self::Disliked => "Disliked",
            Self::Hated => "Hated",
        }
    }

    /// Name of the dataset column holding this tier's gifts.
    pub fn column(&self) -> &'static str {
        match self {
            Self::Loved => "Loved Gifts",
            Self::Liked => "Liked Gifts",
            Self::Neutral => "Neutral Gifts",
            Self::Disliked => "Disliked Gifts",
            Self::Hated => "Hated Gifts",
        }
    }
}

impl fmt::Display for ReactionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One tier's gifts as listed in the source, plus their normalized forms.
///
/// `normalized[i]` is always the normalized form of `raw[i]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GiftList {
    raw: Vec<String>,
    normalized: Vec<String>,
}

impl GiftList {
    /// Build a list, normalizing every raw entry.
    pub fn new(raw: Vec<String>) -> Self {
        let normalized = raw.iter().map(|gift| normalize_text(gift)).collect();
        Self { raw, normalized }
    }

    pub fn raw(&self) -> &[String] {
        &self.raw
    }

    pub fn normalized(&self) -> &[String] {
        &self.normalized
    }

    /// Exact match against the normalized entries.
    pub fn contains_normalized(&self, normalized_gift: &str) -> bool {
        self.normalized.iter().any(|g| g == normalized_gift)
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}

/// The five gift lists of a character.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GiftTiers {
    pub loved: GiftList,
    pub liked: GiftList,
    pub neutral: GiftList,
    pub disliked: GiftList,
    pub hated: GiftList,
}

impl GiftTiers {
    pub fn get(&self, tier: ReactionTier) -> &GiftList {
        match tier {
            ReactionTier::Loved => &self.loved,
            ReactionTier::Liked => &self.liked,
            ReactionTier::Neutral => &self.neutral,
            ReactionTier::Disliked => &self.disliked,
            ReactionTier::Hated => &self.hated,
        }
    }

    pub fn get_mut(&mut self, tier: ReactionTier) -> &mut GiftList {
        match tier {
            ReactionTier::Loved => &mut self.loved,
            ReactionTier::Liked => &mut self.liked,
            ReactionTier::Neutral => &mut self.neutral,
            ReactionTier::Disliked => &mut self.disliked,
            ReactionTier::Hated => &mut self.hated,
        }
    }

    /// Iterate the lists in priority order.
    pub fn iter(&self) -> impl Iterator<Item = (ReactionTier, &GiftList)> + '_ {
        ReactionTier::ALL.into_iter().map(move |tier| (tier, self.get(tier)))
    }

    /// All raw entries, loved first and hated last.
    pub fn raw_entries(&self) -> impl Iterator<Item = &str> + '_ {
        self.iter()
            .flat_map(|(_, list)| list.raw().iter().map(String::as_str))
    }
}

/// A character from the preference dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Character {
    /// Character name, the lookup key
    pub name: String,

    pub birthday: Birthday,

    /// Where the character lives
    pub residence: String,

    /// Family members in source order
    pub family: Vec<String>,

    /// Whether the player can marry this character
    pub can_marry: bool,

    pub gifts: GiftTiers,
}

impl Character {
    /// Create a minimal character with no gifts.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_tier(mut self, tier: ReactionTier, gifts: GiftList) -> Self {
        *self.gifts.get_mut(tier) = gifts;
        self
    }

    /// First tier, in priority order, whose normalized list contains the gift.
    pub fn reaction_to(&self, normalized_gift: &str) -> Option<ReactionTier> {
        self.gifts
            .iter()
            .find(|(_, list)| list.contains_normalized(normalized_gift))
            .map(|(tier, _)| tier)
    }

    /// All raw gift entries of the five tiers joined by single spaces.
    pub fn gift_document(&self) -> String {
        self.gifts.raw_entries().collect::<Vec<_>>().join(" ")
    }
}

/// The immutable set of characters a session answers queries against.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PreferenceTable {
    characters: Vec<Character>,
}

impl PreferenceTable {
    pub fn new(characters: Vec<Character>) -> Self {
        Self { characters }
    }

    /// Look up a character by exact name. The first row wins on duplicates.
    pub fn get(&self, name: &str) -> Option<&Character> {
        self.characters.iter().find(|c| c.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Character> {
        self.characters.iter()
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }
}

impl FromIterator<Character> for PreferenceTable {
    fn from_iter<I: IntoIterator<Item = Character>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// A character that reacts to the queried gift.
#[derive(Debug, Clone, Serialize)]
pub struct GiftMatch<'a> {
    pub character: &'a Character,

    pub tier: ReactionTier,

    /// Cosine similarity between the query and the character's gifts (0.0 - 1.0)
    pub score: f32,
}

/// All matches for one tier, best score first.
#[derive(Debug, Clone, Serialize)]
pub struct TierBucket<'a> {
    pub tier: ReactionTier,
    pub matches: Vec<GiftMatch<'a>>,
}

/// The answer to a gift query: five buckets in tier order.
#[derive(Debug, Clone, Serialize)]
pub struct GiftReport<'a> {
    /// The gift text as the user typed it
    pub query: String,

    pub normalized_query: String,

    pub buckets: Vec<TierBucket<'a>>,
}

impl<'a> GiftReport<'a> {
    /// Group already-sorted matches into one bucket per tier.
    pub fn from_sorted(
        query: impl Into<String>,
        normalized_query: impl Into<String>,
        matches: Vec<GiftMatch<'a>>,
    ) -> Self {
        let mut buckets: Vec<TierBucket<'a>> = ReactionTier::ALL
            .into_iter()
            .map(|tier| TierBucket {
                tier,
                matches: Vec::new(),
            })
            .collect();

        for m in matches {
            buckets[m.tier.rank() as usize].matches.push(m);
        }

        Self {
            query: query.into(),
            normalized_query: normalized_query.into(),
            buckets,
        }
    }

    pub fn bucket(&self, tier: ReactionTier) -> &TierBucket<'a> {
        &self.buckets[tier.rank() as usize]
    }

    /// Matches in report order: by tier, then by score.
    pub fn matches(&self) -> impl Iterator<Item = &GiftMatch<'a>> + '_ {
        self.buckets.iter().flat_map(|b| b.matches.iter())
    }

    pub fn len(&self) -> usize {
        self.buckets.iter().map(|b| b.matches.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(|b| b.matches.is_empty())
    }
}
