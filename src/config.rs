use anyhow::{Context, Result};
use config::{Config, ConfigError, Environment, File as ConfigFile};
use serde::Deserialize;
use std::env;

pub type Number = f32;

pub const EPSILON: f32 = 1e-6;

#[derive(Deserialize)]
pub struct CareerpathConfig {
    pub model_path: Option<String>,
    pub catalog_path: Option<String>,
    pub vectorizer_path: Option<String>,
    pub taxonomy_path: Option<String>,
    pub top_skills: Option<usize>,
    pub resource_site: Option<String>,
}

impl CareerpathConfig {
    pub fn try_from(config: &Config) -> Result<Self, ConfigError> {
        Ok(CareerpathConfig {
            model_path: config.get("model_path").ok(),
            catalog_path: config.get("catalog_path").ok(),
            vectorizer_path: config.get("vectorizer_path").ok(),
            taxonomy_path: config.get("taxonomy_path").ok(),
            top_skills: config.get("top_skills").ok(),
            resource_site: config.get("resource_site").ok(),
        })
    }
}

pub struct State {
    pub model_path: String,
    pub catalog_path: String,
    pub vectorizer_path: Option<String>,
    pub taxonomy_path: Option<String>,
    pub top_skills: usize,
    pub resource_site: String,
}

impl State {
    pub fn new() -> Result<Self> {
        let mut config = Config::default();
        #[allow(deprecated)]
        {
            config.merge(ConfigFile::with_name("careerpath_config").required(false))?;
            config.merge(Environment::with_prefix("CAREERPATH"))?;
        }

        let careerpath_config = CareerpathConfig::try_from(&config)?;

        let model_path = careerpath_config
            .model_path
            .or_else(|| env::var("CAREERPATH_MODEL_PATH").ok())
            .context("CAREERPATH_MODEL_PATH not set in config or environment")?;

        let catalog_path = careerpath_config
            .catalog_path
            .or_else(|| env::var("CAREERPATH_CATALOG_PATH").ok())
            .context("CAREERPATH_CATALOG_PATH not set in config or environment")?;

        let vectorizer_path = careerpath_config
            .vectorizer_path
            .or_else(|| env::var("CAREERPATH_VECTORIZER_PATH").ok());

        let taxonomy_path = careerpath_config
            .taxonomy_path
            .or_else(|| env::var("CAREERPATH_TAXONOMY_PATH").ok());

        let top_skills = careerpath_config
            .top_skills
            .or_else(|| env::var("CAREERPATH_TOP_SKILLS").ok().and_then(|s| s.parse().ok()))
            .unwrap_or(5);

        let resource_site = careerpath_config
            .resource_site
            .or_else(|| env::var("CAREERPATH_RESOURCE_SITE").ok())
            .unwrap_or_else(|| "https://www.google.com/search".to_string());

        if top_skills == 0 {
            anyhow::bail!("CAREERPATH_TOP_SKILLS must be at least 1.");
        }

        Ok(Self {
            model_path,
            catalog_path,
            vectorizer_path,
            taxonomy_path,
            top_skills,
            resource_site,
        })
    }

    pub fn print_config(&self) {
        println!("model_path={}", self.model_path);
        println!("catalog_path={}", self.catalog_path);
        println!(
            "vectorizer_path={}",
            self.vectorizer_path.as_deref().unwrap_or("(unset)")
        );
        println!(
            "taxonomy_path={}",
            self.taxonomy_path.as_deref().unwrap_or("(built-in)")
        );
        println!("top_skills={}", self.top_skills);
        println!("resource_site={}", self.resource_site);
    }
}
