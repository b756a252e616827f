//! Classification and ranking of characters for a queried gift.
//!
//! Takes the preference table and a gift name and produces a report:
//! every character that reacts to the gift, grouped by reaction tier and
//! ordered by how similar the gift is to the rest of their preferences.

use giftwise_features::{
    build_document, cosine_similarity, normalize_text, TermVector, TfIdfConfig, TfIdfVectorizer,
};
use giftwise_model::{GiftMatch, GiftReport, PreferenceTable, ReactionTier};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecommendError {
    #[error("Unknown character: {0}")]
    CharacterNotFound(String),
}

/// Classify how one character reacts to a gift.
///
/// Returns `Ok(None)` when the character exists but none of their lists
/// contains the gift.
pub fn classify(
    table: &PreferenceTable,
    character_name: &str,
    gift_text: &str,
) -> Result<Option<ReactionTier>, RecommendError> {
    let character = table
        .get(character_name)
        .ok_or_else(|| RecommendError::CharacterNotFound(character_name.to_string()))?;

    Ok(character.reaction_to(&normalize_text(gift_text)))
}

/// Similarity of a gift to every character's preferences, in table order.
pub fn rank<'a>(table: &'a PreferenceTable, gift_text: &str) -> Vec<(&'a str, f32)> {
    Recommender::new(table).rank(gift_text)
}

/// Build the full report for a gift.
pub fn recommend<'a>(table: &'a PreferenceTable, gift_text: &str) -> GiftReport<'a> {
    Recommender::new(table).recommend(gift_text)
}

/// A vectorizer fitted on one table, reusable across queries.
///
/// Gives the same results as the free functions without refitting for
/// every query.
#[derive(Debug, Clone)]
pub struct Recommender<'a> {
    table: &'a PreferenceTable,
    vectorizer: TfIdfVectorizer,
    /// One vector per character, in table order
    profiles: Vec<TermVector>,
}

impl<'a> Recommender<'a> {
    pub fn new(table: &'a PreferenceTable) -> Self {
        Self::with_config(table, TfIdfConfig::default())
    }

    pub fn with_config(table: &'a PreferenceTable, config: TfIdfConfig) -> Self {
        let documents: Vec<String> = table
            .iter()
            .map(|c| build_document(c.gifts.raw_entries()))
            .collect();

        let vectorizer = TfIdfVectorizer::fit_with_config(&documents, config);
        let profiles = documents.iter().map(|d| vectorizer.transform(d)).collect();

        tracing::debug!(
            characters = table.len(),
            vocabulary = vectorizer.vocabulary_len(),
            "Fitted gift vectorizer"
        );

        Self {
            table,
            vectorizer,
            profiles,
        }
    }

    /// See [`classify`].
    pub fn classify(
        &self,
        character_name: &str,
        gift_text: &str,
    ) -> Result<Option<ReactionTier>, RecommendError> {
        classify(self.table, character_name, gift_text)
    }

    /// See [`rank`].
    pub fn rank(&self, gift_text: &str) -> Vec<(&'a str, f32)> {
        let scores = self.scores(&normalize_text(gift_text));
        self.table
            .iter()
            .map(|c| c.name.as_str())
            .zip(scores)
            .collect()
    }

    /// See [`recommend`].
    pub fn recommend(&self, gift_text: &str) -> GiftReport<'a> {
        let normalized = normalize_text(gift_text);
        let scores = self.scores(&normalized);

        let mut matches: Vec<GiftMatch<'a>> = self
            .table
            .iter()
            .zip(scores)
            .filter_map(|(character, score)| {
                character.reaction_to(&normalized).map(|tier| GiftMatch {
                    character,
                    tier,
                    score,
                })
            })
            .collect();

        // Stable: equal scores keep table order.
        matches.sort_by(|a, b| a.tier.cmp(&b.tier).then_with(|| b.score.total_cmp(&a.score)));

        tracing::debug!(
            query = %gift_text,
            normalized = %normalized,
            matches = matches.len(),
            "Assembled gift report"
        );

        GiftReport::from_sorted(gift_text, normalized, matches)
    }

    /// Cosine similarity of normalized query text to each profile.
    fn scores(&self, normalized_query: &str) -> Vec<f32> {
        let query = self.vectorizer.transform(normalized_query);
        if query.is_zero() {
            return vec![0.0; self.profiles.len()];
        }
        self.profiles
            .iter()
            .map(|profile| cosine_similarity(&query, profile))
            .collect()
    }
}
