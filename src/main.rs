mod advisor;
mod artifact;
mod catalog;
mod config;
mod encoder;
mod error;
mod model;
mod presenter;
mod taxonomy;
mod vectorizer;
mod vector_ops;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io;

use crate::advisor::Advisor;
use crate::catalog::CareerCatalog;
use crate::config::State;
use crate::encoder::QueryInput;
use crate::error::AdvisorError;
use crate::taxonomy::SkillTaxonomy;

#[derive(Parser)]
#[command(name = "careerpath")]
#[command(version = "0.1")]
#[command(about = "Career recommendations from your skills", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read one JSON query from stdin and print recommendations as JSON
    Recommend,
    /// List catalog careers in row order
    Catalog,
    /// List taxonomy categories and their skills
    Taxonomy,
    /// Print the resolved configuration
    Config,
}

fn recommend_command(state: &State) -> Result<()> {
    let advisor = Advisor::load(state)?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let query: QueryInput =
        serde_json::from_str(input.trim()).context("Failed to parse JSON query")?;

    let report = match advisor.recommend(&query) {
        Ok(report) => report,
        Err(AdvisorError::EmptyInput) => {
            println!(
                "{}",
                serde_json::json!({
                    "recommendations": [],
                    "message": AdvisorError::EmptyInput.to_string(),
                })
            );
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let output = serde_json::json!({
        "recommendations": report.recommendations,
        "top_skills": report.top_skills,
        "requested_neighbors": advisor.neighbor_count(),
        "catalog_rows": advisor.catalog.len(),
    });
    println!("{}", serde_json::to_string(&output)?);

    Ok(())
}

fn catalog_command(state: &State) -> Result<()> {
    let catalog = CareerCatalog::load(&state.catalog_path)?;
    for name in catalog.names() {
        println!("{}", name);
    }
    Ok(())
}

fn taxonomy_command(state: &State) -> Result<()> {
    let taxonomy = SkillTaxonomy::load(state.taxonomy_path.as_deref())?;
    for category in &taxonomy.categories {
        println!("{}: {}", category.name, category.skills.join(", "));
    }
    Ok(())
}

fn config_command(state: &State) -> Result<()> {
    state.print_config();
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let args = Cli::parse();
    let state = State::new()?;

    match args.command {
        Commands::Recommend => recommend_command(&state)?,
        Commands::Catalog => catalog_command(&state)?,
        Commands::Taxonomy => taxonomy_command(&state)?,
        Commands::Config => config_command(&state)?,
    }
    Ok(())
}
