use crate::artifact::{read_artifact, ArtifactKind};
use crate::config::Number;
use crate::error::AdvisorError;
use crate::vector_ops::{cosine_distance_simd, euclidean_distance_simd};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Distance metric baked into the model at build time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Metric {
    Euclidean,
    Cosine,
}

/// Pre-trained nearest-neighbor model: the matrix the index was built over,
/// plus the metric and the fixed neighbor count chosen at build time. This
/// repository never trains or re-fits one; it is loaded as an opaque artifact
/// and queried.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeighborModel {
    pub metric: Metric,
    pub neighbor_count: usize,
    pub dimensions: usize,
    pub rows: Vec<Vec<Number>>,
}

impl NeighborModel {
    pub fn load(path: &str) -> Result<Self, AdvisorError> {
        let model: NeighborModel = read_artifact(path, ArtifactKind::NeighborModel)?;
        model.validate(path)?;
        log::info!(
            "neighbor model: {} rows, {} dimensions, k={}, metric={:?}",
            model.rows.len(),
            model.dimensions,
            model.neighbor_count,
            model.metric
        );
        Ok(model)
    }

    fn validate(&self, path: &str) -> Result<(), AdvisorError> {
        let corrupt = |reason: String| AdvisorError::CorruptArtifact {
            path: path.to_string(),
            reason,
        };
        if self.rows.is_empty() {
            return Err(corrupt("model has no rows".to_string()));
        }
        if self.neighbor_count == 0 || self.neighbor_count > self.rows.len() {
            return Err(corrupt(format!(
                "neighbor count {} is outside 1..={}",
                self.neighbor_count,
                self.rows.len()
            )));
        }
        if let Some((i, row)) = self
            .rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != self.dimensions)
        {
            return Err(corrupt(format!(
                "row {} has {} dimensions, expected {}",
                i,
                row.len(),
                self.dimensions
            )));
        }
        Ok(())
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Find the `neighbor_count` rows closest to `query`, nearest first.
    ///
    /// Deterministic: distances are compared ascending and equal distances
    /// fall back to row-index order, so a fixed model and a fixed query
    /// always produce the same index sequence.
    pub fn kneighbors(&self, query: &[Number]) -> Result<(Vec<Number>, Vec<usize>), AdvisorError> {
        if query.len() != self.dimensions {
            return Err(AdvisorError::DimensionMismatch {
                expected: self.dimensions,
                got: query.len(),
            });
        }

        let mut scored: Vec<(Number, usize)> = self
            .rows
            .par_iter()
            .enumerate()
            .map(|(i, row)| -> Result<(Number, usize), AdvisorError> {
                let distance = match self.metric {
                    Metric::Euclidean => euclidean_distance_simd(query, row),
                    Metric::Cosine => cosine_distance_simd(query, row),
                }
                .ok_or(AdvisorError::DimensionMismatch {
                    expected: self.dimensions,
                    got: row.len(),
                })?;
                Ok((distance, i))
            })
            .collect::<Result<Vec<_>, _>>()?;

        scored.sort_unstable_by(|a, b| {
            a.0.partial_cmp(&b.0)
                .unwrap_or(Ordering::Equal)
                .then(a.1.cmp(&b.1))
        });
        scored.truncate(self.neighbor_count);

        for (distance, index) in &scored {
            log::debug!("neighbor row {} at distance {}", index, distance);
        }

        Ok(scored.into_iter().unzip())
    }
}
