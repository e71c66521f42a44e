use crate::artifact::{read_artifact, ArtifactKind};
use crate::config::Number;
use crate::error::AdvisorError;
use crate::vector_ops::normalize_vector;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Pre-trained tf-idf vectorizer for free-text queries. The vocabulary and
/// idf weights were fixed when the model was built; `transform` must keep
/// producing vectors in that exact input space, so the tokenization rules
/// here are part of the artifact contract and must not drift.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextVectorizer {
    pub vocabulary: HashMap<String, usize>,
    pub idf: Vec<Number>,
}

impl TextVectorizer {
    pub fn load(path: &str) -> Result<Self, AdvisorError> {
        let vectorizer: TextVectorizer = read_artifact(path, ArtifactKind::TextVectorizer)?;
        vectorizer.validate(path)?;
        log::info!(
            "text vectorizer: {} terms in vocabulary",
            vectorizer.vocabulary.len()
        );
        Ok(vectorizer)
    }

    fn validate(&self, path: &str) -> Result<(), AdvisorError> {
        let corrupt = |reason: String| AdvisorError::CorruptArtifact {
            path: path.to_string(),
            reason,
        };
        if self.vocabulary.is_empty() {
            return Err(corrupt("vocabulary is empty".to_string()));
        }
        if self.vocabulary.len() != self.idf.len() {
            return Err(corrupt(format!(
                "{} vocabulary terms but {} idf weights",
                self.vocabulary.len(),
                self.idf.len()
            )));
        }
        if let Some((term, &index)) = self
            .vocabulary
            .iter()
            .find(|(_, &index)| index >= self.idf.len())
        {
            return Err(corrupt(format!(
                "term '{}' points at column {} outside 0..{}",
                term,
                index,
                self.idf.len()
            )));
        }
        Ok(())
    }

    pub fn dimensions(&self) -> usize {
        self.idf.len()
    }

    /// Encode free text as an l2-normalized tf-idf vector over the fixed
    /// vocabulary. Terms outside the vocabulary are ignored.
    pub fn transform(&self, text: &str) -> Vec<Number> {
        let mut vector = vec![0.0; self.idf.len()];
        for token in tokenize(text) {
            if let Some(&index) = self.vocabulary.get(&token) {
                vector[index] += self.idf[index];
            }
        }
        normalize_vector(&mut vector);
        vector
    }
}

/// Lowercased alphanumeric runs of length >= 2, matching the tokenization
/// the vocabulary was built with.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() >= 2)
        .map(|t| t.to_string())
        .collect()
}
