use crate::catalog::CareerCatalog;
use crate::config::State;
use crate::encoder::QueryInput;
use crate::error::AdvisorError;
use crate::model::NeighborModel;
use crate::presenter::{join_catalog, top_skills, Report};
use crate::taxonomy::SkillTaxonomy;
use crate::vectorizer::TextVectorizer;
use anyhow::{Context, Result};

/// All process-wide resources, loaded once at startup and read-only
/// afterwards. Queries borrow the advisor immutably, so concurrent readers
/// in a hosting process need no locking.
pub struct Advisor {
    pub taxonomy: SkillTaxonomy,
    pub catalog: CareerCatalog,
    pub model: NeighborModel,
    vectorizer: Option<TextVectorizer>,
    top_skills: usize,
    resource_site: String,
}

impl Advisor {
    /// Load every configured resource, failing startup on the first missing
    /// or incompatible artifact. Nothing is retried or partially served.
    pub fn load(state: &State) -> Result<Self> {
        let taxonomy = SkillTaxonomy::load(state.taxonomy_path.as_deref())?;
        let catalog = CareerCatalog::load(&state.catalog_path)?;
        let model = NeighborModel::load(&state.model_path)?;

        if model.row_count() > catalog.len() {
            anyhow::bail!(
                "model has {} rows but catalog '{}' only has {}; the artifacts are out of sync",
                model.row_count(),
                state.catalog_path,
                catalog.len()
            );
        }

        let vectorizer = state
            .vectorizer_path
            .as_deref()
            .map(TextVectorizer::load)
            .transpose()
            .context("Failed to load vectorizer artifact")?;

        if let Some(v) = &vectorizer {
            if v.dimensions() != model.dimensions {
                anyhow::bail!(
                    "vectorizer produces {}-dimensional vectors but the model expects {}; \
                     the artifacts are out of sync",
                    v.dimensions(),
                    model.dimensions
                );
            }
        }

        Ok(Self {
            taxonomy,
            catalog,
            model,
            vectorizer,
            top_skills: state.top_skills,
            resource_site: state.resource_site.clone(),
        })
    }

    /// Run the full pipeline for one query: encode, look up neighbors, join
    /// the catalog, rank the user's own skills.
    pub fn recommend(&self, query: &QueryInput) -> Result<Report, AdvisorError> {
        let vector = query.encode(&self.taxonomy, self.vectorizer.as_ref())?;
        let (_, indices) = self.model.kneighbors(&vector)?;
        let recommendations = join_catalog(&indices, &self.catalog)?;
        let ranked = query
            .ranked_skills()
            .map(|ranked| top_skills(&ranked, self.top_skills, &self.resource_site));
        Ok(Report {
            recommendations,
            top_skills: ranked,
        })
    }

    pub fn neighbor_count(&self) -> usize {
        self.model.neighbor_count
    }
}
