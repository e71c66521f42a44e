use crate::config::Number;
use crate::error::AdvisorError;
use crate::taxonomy::SkillTaxonomy;
use crate::vector_ops::min_max_scale;
use crate::vectorizer::TextVectorizer;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const MAX_RATING: u8 = 5;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SkillRating {
    pub skill: String,
    pub rating: u8,
}

/// One user query, in either of the two input modes the deployment exposes.
///
/// `Text` is a free-form interests string encoded by the pre-trained
/// vectorizer. `Ratings` is a sparse list of (skill, 0-5 rating) pairs over
/// the taxonomy, optionally restricted to a single category; unselected
/// skills implicitly rate 0. Ratings are kept as an ordered list because the
/// submission order breaks ties when ranking the user's own top skills.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum QueryInput {
    Text {
        text: String,
    },
    Ratings {
        #[serde(default)]
        category: Option<String>,
        ratings: Vec<SkillRating>,
    },
}

impl QueryInput {
    /// Encode the query into the fixed-dimension vector the model consumes.
    ///
    /// Empty input short-circuits with `EmptyInput` before any lookup can
    /// happen; callers must not touch the model when this fails.
    pub fn encode(
        &self,
        taxonomy: &SkillTaxonomy,
        vectorizer: Option<&TextVectorizer>,
    ) -> Result<Vec<Number>, AdvisorError> {
        match self {
            QueryInput::Text { text } => {
                if text.trim().is_empty() {
                    return Err(AdvisorError::EmptyInput);
                }
                let vectorizer = vectorizer.ok_or(AdvisorError::VectorizerUnavailable)?;
                Ok(vectorizer.transform(text))
            }
            QueryInput::Ratings { category, ratings } => {
                if ratings.is_empty() {
                    return Err(AdvisorError::EmptyInput);
                }

                let canonical: Vec<&str> = match category {
                    Some(name) => taxonomy
                        .category(name)
                        .ok_or_else(|| AdvisorError::UnknownCategory(name.clone()))?
                        .skills
                        .iter()
                        .map(|s| s.as_str())
                        .collect(),
                    None => taxonomy.canonical_skills(),
                };
                let positions: HashMap<&str, usize> = canonical
                    .iter()
                    .enumerate()
                    .map(|(i, s)| (*s, i))
                    .collect();

                let mut vector = vec![0.0; canonical.len()];
                for SkillRating { skill, rating } in ratings {
                    if *rating > MAX_RATING {
                        return Err(AdvisorError::RatingOutOfRange {
                            skill: skill.clone(),
                            rating: *rating,
                            max: MAX_RATING,
                        });
                    }
                    let position = positions
                        .get(skill.as_str())
                        .ok_or_else(|| AdvisorError::UnknownSkill(skill.clone()))?;
                    // Repeated skills: the last submitted rating wins.
                    vector[*position] = Number::from(*rating);
                }

                if !min_max_scale(&mut vector) {
                    log::debug!("query vector has zero range, passed through unscaled");
                }
                Ok(vector)
            }
        }
    }

    /// The user's submitted skills sorted by rating, highest first, ties in
    /// submission order. `None` in free-text mode.
    pub fn ranked_skills(&self) -> Option<Vec<SkillRating>> {
        match self {
            QueryInput::Text { .. } => None,
            QueryInput::Ratings { ratings, .. } => {
                let mut ranked = ratings.clone();
                // Stable sort keeps input order for equal ratings.
                ranked.sort_by(|a, b| b.rating.cmp(&a.rating));
                Some(ranked)
            }
        }
    }
}
