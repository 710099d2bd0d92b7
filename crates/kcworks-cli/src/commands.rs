//! Command implementations.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, info_span};

use kcworks_assets::{AssetResolver, DEFAULT_LOCALE, assets_root};
use kcworks_bib::{BibliographyGenerator, PlainTextEngine};
use kcworks_client::ProxyClient;
use kcworks_model::{BlockSettings, SortKey};
use kcworks_pipeline::{PipelineState, QueryPipeline};

use crate::cli::{AssetsArgs, RenderArgs};

/// One row of the rendered item summary.
#[derive(Debug, Serialize)]
pub struct ItemRow {
    pub id: String,
    pub title: Option<String>,
    pub year: Option<i32>,
}

/// Snapshot of a finished pipeline run, for printing or JSON output.
#[derive(Debug, Serialize)]
pub struct RenderOutcome {
    pub query: String,
    pub style: String,
    pub locale: String,
    pub sort: String,
    pub items: Vec<ItemRow>,
    pub bibliography: Option<String>,
    pub error: Option<String>,
    pub generation_error: Option<String>,
}

impl RenderOutcome {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

pub fn run_render(args: &RenderArgs) -> Result<RenderOutcome> {
    let span = info_span!("render", query = %args.query);
    let _guard = span.enter();

    let resolver = build_resolver(args.assets_dir.as_deref())?;
    let client = ProxyClient::new(&args.proxy_url).context("create proxy client")?;
    let generator = BibliographyGenerator::new(resolver, PlainTextEngine);
    let sort = SortKey::from(args.sort);
    let settings = BlockSettings {
        query: args.query.clone(),
        validated: true,
        style: args.style.clone(),
        locale: args.locale.clone(),
        sort,
    };

    let mut pipeline = QueryPipeline::new(client, generator, settings);
    pipeline.run();

    let (items, error) = match pipeline.state() {
        PipelineState::Ready(items) => {
            info!(items = items.len(), "query completed");
            let rows = items
                .iter()
                .map(|item| ItemRow {
                    id: item.id.clone(),
                    title: item.title.clone(),
                    year: item.year,
                })
                .collect();
            (rows, None)
        }
        PipelineState::Error(failure) => (Vec::new(), Some(failure.to_string())),
        PipelineState::Idle | PipelineState::Loading => (Vec::new(), None),
    };

    let bibliography = error
        .is_none()
        .then(|| pipeline.bibliography().to_string());

    Ok(RenderOutcome {
        query: args.query.clone(),
        style: pipeline.settings().style.clone(),
        locale: pipeline.settings().locale.clone(),
        sort: pipeline.settings().sort.to_string(),
        items,
        bibliography,
        error,
        generation_error: pipeline.generation_error().map(str::to_string),
    })
}

/// Inventory of the assets directory, for the `assets` subcommand.
#[derive(Debug, Serialize)]
pub struct AssetInventory {
    pub root: String,
    pub styles: Vec<StyleRow>,
    pub locales: Vec<LocaleRow>,
}

#[derive(Debug, Serialize)]
pub struct StyleRow {
    pub id: String,
    pub title: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LocaleRow {
    pub id: String,
    pub is_default: bool,
}

pub fn run_assets(args: &AssetsArgs) -> Result<AssetInventory> {
    let resolver = build_resolver(args.assets_dir.as_deref())?;
    let mut styles = Vec::new();
    for id in resolver.list_styles().context("list styles")? {
        let title = resolver
            .resolve_style(Some(&id))
            .ok()
            .flatten()
            .and_then(|style| style.title());
        styles.push(StyleRow { id, title });
    }
    let locales = resolver
        .list_locales()
        .context("list locales")?
        .into_iter()
        .map(|id| LocaleRow {
            is_default: id == DEFAULT_LOCALE,
            id,
        })
        .collect();
    Ok(AssetInventory {
        root: resolver.root().display().to_string(),
        styles,
        locales,
    })
}

fn build_resolver(assets_dir: Option<&Path>) -> Result<AssetResolver> {
    let root = assets_dir.map_or_else(assets_root, Path::to_path_buf);
    AssetResolver::new(&root)
        .with_context(|| format!("load assets from {}", root.display()))
}
