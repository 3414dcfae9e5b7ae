//! # Tablefix
//!
//! Command-line access to the synthetic table fixtures: list them, describe
//! one, or render a selection to PNG files for inspection or for test suites
//! that load images from disk.

mod args;

use anyhow::Result;
use args::{Args, Commands};
use clap::Parser;
use tablefix::{catalog::Fixture, config::RenderConfig, render};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match args.command {
        Commands::List => list(),
        Commands::Describe { name } => describe(&name)?,
        Commands::Render {
            config,
            out,
            seed,
            only,
            no_manifest,
        } => {
            let mut config = match config {
                Some(path) => RenderConfig::load(path)?,
                None => RenderConfig::default(),
            };
            if let Some(out) = out {
                config.output_dir = out;
            }
            if seed.is_some() {
                config.seed = seed;
            }
            if !only.is_empty() {
                config.fixtures = only;
            }
            if no_manifest {
                config.manifest = false;
            }
            run_render(&config)?;
        }
    }

    Ok(())
}

/// Prints one line per fixture.
fn list() {
    for fixture in Fixture::ALL {
        let shape = fixture
            .shape()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "path".to_string());
        println!("{:<16} {:<12} {}", fixture.name(), shape, fixture.description());
    }
}

fn describe(name: &str) -> Result<()> {
    let fixture: Fixture = name.parse()?;
    println!("{}", serde_json::to_string_pretty(&fixture.info())?);
    Ok(())
}

fn run_render(config: &RenderConfig) -> Result<()> {
    let rendered = render::render_fixtures(config)?;
    println!(
        "Rendered {} fixture(s) into {}",
        rendered.len(),
        config.output_dir.display()
    );
    Ok(())
}
