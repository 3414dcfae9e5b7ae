//! This module writes fixtures to disk.
//!
//! Selected image fixtures are built in parallel, saved as `<name>.png` in the
//! output directory and optionally listed in a `manifest.csv` next to them.
//! The manifest records each file's shape and the SHA-256 digest of the raw
//! buffer, so a consumer can check that a decoded PNG still matches the
//! fixture byte for byte.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use indexmap::IndexMap;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use crate::{
    catalog::{Fixture, FixtureContext, FixtureOutput},
    config::RenderConfig,
    raster::Shape,
};

pub const MANIFEST_FILE: &str = "manifest.csv";

/// A fixture written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFixture {
    pub fixture: Fixture,
    pub path: PathBuf,
    pub shape: Shape,
    pub digest: String,
}

/// One row of `manifest.csv`.
#[derive(Debug, Serialize)]
struct ManifestRecord<'a> {
    name: &'a str,
    file: String,
    height: usize,
    width: usize,
    channels: usize,
    sha256: &'a str,
}

/// Builds and saves one fixture. Path fixtures produce nothing.
pub fn render_fixture(
    fixture: Fixture,
    ctx: &FixtureContext,
    output_dir: &Path,
) -> Result<Option<RenderedFixture>> {
    let raster = match fixture.build(ctx) {
        FixtureOutput::Image(raster) => raster,
        FixtureOutput::Path(path) => {
            debug!(fixture = fixture.name(), path = ?path, "Skipping path fixture");
            return Ok(None);
        }
    };

    let path = output_dir.join(format!("{}.png", fixture.name()));
    raster
        .save(&path)
        .with_context(|| format!("Failed to render fixture {}", fixture))?;
    info!(fixture = fixture.name(), path = ?path, shape = %raster.shape(), "Wrote fixture");

    Ok(Some(RenderedFixture {
        fixture,
        path,
        shape: raster.shape(),
        digest: raster.digest(),
    }))
}

/// Renders every fixture selected by `config`, keyed by fixture name in selection order.
pub fn render_fixtures(config: &RenderConfig) -> Result<IndexMap<String, RenderedFixture>> {
    let fixtures = config.selected()?;
    let output_dir = &config.output_dir;
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory: {:?}", output_dir))?;

    let ctx = FixtureContext::new(output_dir).with_seed(config.seed);
    let rendered: Vec<Option<RenderedFixture>> = fixtures
        .par_iter()
        .map(|fixture| render_fixture(*fixture, &ctx, output_dir))
        .collect::<Result<_>>()?;

    let rendered: IndexMap<String, RenderedFixture> = rendered
        .into_iter()
        .flatten()
        .map(|r| (r.fixture.name().to_string(), r))
        .collect();

    if config.manifest {
        write_manifest(output_dir, rendered.values())?;
    }

    Ok(rendered)
}

/// Writes `manifest.csv` into `output_dir`.
pub fn write_manifest<'a, I>(output_dir: &Path, rendered: I) -> Result<PathBuf>
where
    I: IntoIterator<Item = &'a RenderedFixture>,
{
    let path = output_dir.join(MANIFEST_FILE);
    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("Failed to create manifest: {:?}", path))?;

    for r in rendered {
        let file = r
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        writer.serialize(ManifestRecord {
            name: r.fixture.name(),
            file,
            height: r.shape.height,
            width: r.shape.width,
            channels: r.shape.channels.count(),
            sha256: &r.digest,
        })?;
    }
    writer.flush()?;

    info!(path = ?path, "Wrote manifest");
    Ok(path)
}
