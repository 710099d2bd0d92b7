//! State machine tests with a scripted source and a recording engine.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use serde_json::{Value, json};
use tempfile::TempDir;

use kcworks_assets::AssetResolver;
use kcworks_bib::{BibliographyGenerator, CitationEngine, EngineError, EngineSys};
use kcworks_client::{FetchError, RecordSource};
use kcworks_model::{BlockSettings, SortKey};
use kcworks_pipeline::{BIBLIOGRAPHY_PLACEHOLDER, FailureKind, QueryPipeline};

const STYLE_XML: &str = r#"<style xmlns="http://purl.org/net/xbiblio/csl"><info><title>Test Style</title></info></style>"#;
const LOCALE_XML: &str = r#"<locale xml:lang="en-US"><terms/></locale>"#;
const LOCALES_JSON: &str = r#"{ "primary-dialects": { "en": "en-US" } }"#;

fn write_fixture_tree(root: &Path) {
    fs::create_dir_all(root.join("styles")).expect("create styles dir");
    fs::create_dir_all(root.join("locales")).expect("create locales dir");
    fs::write(root.join("styles/apa.csl"), STYLE_XML).expect("write style");
    fs::write(root.join("locales/locales-en-US.xml"), LOCALE_XML).expect("write locale");
    fs::write(root.join("locales/locales.json"), LOCALES_JSON).expect("write metadata");
}

/// Scripted record source; shared handles survive the move into the pipeline.
#[derive(Clone, Default)]
struct MockSource {
    calls: Rc<Cell<usize>>,
    responses: Rc<RefCell<VecDeque<Result<Value, FetchError>>>>,
}

impl MockSource {
    fn push(&self, response: Result<Value, FetchError>) {
        self.responses.borrow_mut().push_back(response);
    }

    fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl RecordSource for MockSource {
    fn fetch_records(&self, _query: &str) -> Result<Value, FetchError> {
        self.calls.set(self.calls.get() + 1);
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(json!({ "items": [] })))
    }
}

/// Engine that records the id order of its last invocation.
#[derive(Clone, Default)]
struct RecordingEngine {
    last_ids: Rc<RefCell<Vec<String>>>,
}

impl CitationEngine for RecordingEngine {
    fn make_bibliography(
        &self,
        sys: &dyn EngineSys,
        _style_xml: &str,
        item_ids: &[String],
    ) -> Result<Vec<String>, EngineError> {
        *self.last_ids.borrow_mut() = item_ids.to_vec();
        item_ids
            .iter()
            .map(|id| {
                sys.retrieve_item(id)
                    .map(|item| format!("entry:{}", item.id))
                    .ok_or_else(|| EngineError(format!("unknown item id: {id}")))
            })
            .collect()
    }
}

struct Harness {
    _assets: TempDir,
    source: MockSource,
    engine: RecordingEngine,
    pipeline: QueryPipeline<MockSource, RecordingEngine>,
}

fn harness(settings: BlockSettings) -> Harness {
    let assets = TempDir::new().expect("create tempdir");
    write_fixture_tree(assets.path());
    let resolver = AssetResolver::new(assets.path()).expect("create resolver");
    let source = MockSource::default();
    let engine = RecordingEngine::default();
    let generator = BibliographyGenerator::new(resolver, engine.clone());
    let pipeline = QueryPipeline::new(source.clone(), generator, settings);
    Harness {
        _assets: assets,
        source,
        engine,
        pipeline,
    }
}

fn scenario_payload() -> Value {
    json!({ "items": [ { "id": "A", "year": 2020 }, { "id": "B", "year": 2022 } ] })
}

#[test]
fn end_to_end_newest_order() {
    let mut h = harness(BlockSettings::for_query("orcid:0000-0001"));
    h.source.push(Ok(scenario_payload()));
    h.pipeline.run();

    let items = h.pipeline.state().items().expect("ready items");
    let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, ["B", "A"]);
    assert_eq!(*h.engine.last_ids.borrow(), ["B", "A"]);
    assert!(!h.pipeline.bibliography().is_empty());
    assert_ne!(h.pipeline.bibliography(), BIBLIOGRAPHY_PLACEHOLDER);
}

#[test]
fn double_submit_does_not_refetch() {
    let mut h = harness(BlockSettings::for_query("orcid:0000-0001"));
    h.source.push(Ok(scenario_payload()));
    h.pipeline.run();
    assert_eq!(h.source.calls(), 1);

    // Same (query, validated) pair: neither resubmission nor re-render
    // triggers another fetch.
    assert!(h.pipeline.submit().is_none());
    assert!(h.pipeline.refresh().is_none());
    assert_eq!(h.source.calls(), 1);
    assert!(h.pipeline.state().is_ready());
}

#[test]
fn submit_while_loading_same_query_is_deduped() {
    let mut h = harness(BlockSettings::for_query("q"));
    let ticket = h.pipeline.submit().expect("fetch starts");
    assert!(h.pipeline.state().is_loading());
    assert!(h.pipeline.submit().is_none());
    assert!(h.pipeline.refresh().is_none());
    h.pipeline.complete(ticket, Ok(scenario_payload()));
    assert!(h.pipeline.state().is_ready());
}

#[test]
fn empty_query_stays_idle() {
    let mut h = harness(BlockSettings::default());
    assert!(h.pipeline.submit().is_none());
    assert!(h.pipeline.state().is_idle());
    assert_eq!(h.source.calls(), 0);
    assert_eq!(h.pipeline.bibliography(), BIBLIOGRAPHY_PLACEHOLDER);
}

#[test]
fn http_error_surfaces_as_error_state() {
    let mut h = harness(BlockSettings::for_query("q"));
    h.source.push(Err(FetchError::Status { status: 502 }));
    h.pipeline.run();

    let failure = h.pipeline.state().failure().expect("error state");
    assert_eq!(failure.kind, FailureKind::Fetch);
    assert_eq!(h.pipeline.bibliography(), BIBLIOGRAPHY_PLACEHOLDER);

    // No automatic retry: a re-render leaves the error in place, an explicit
    // resubmission fetches again.
    assert!(h.pipeline.refresh().is_none());
    assert_eq!(h.source.calls(), 1);
    h.source.push(Ok(scenario_payload()));
    h.pipeline.run();
    assert_eq!(h.source.calls(), 2);
    assert!(h.pipeline.state().is_ready());
}

#[test]
fn unrecognizable_payload_is_a_payload_failure() {
    let mut h = harness(BlockSettings::for_query("q"));
    h.source.push(Ok(json!({ "message": "not a result set" })));
    h.pipeline.run();
    let failure = h.pipeline.state().failure().expect("error state");
    assert_eq!(failure.kind, FailureKind::Payload);
}

#[test]
fn sort_change_regenerates_without_fetch() {
    let mut h = harness(BlockSettings::for_query("q"));
    h.source.push(Ok(scenario_payload()));
    h.pipeline.run();
    assert_eq!(*h.engine.last_ids.borrow(), ["B", "A"]);

    h.pipeline.set_sort(SortKey::Oldest);
    assert_eq!(h.source.calls(), 1);
    assert_eq!(*h.engine.last_ids.borrow(), ["A", "B"]);
    assert_eq!(h.pipeline.settings().sort, SortKey::Oldest);
}

#[test]
fn stale_fetch_result_is_discarded() {
    let mut h = harness(BlockSettings::for_query("first"));
    let first = h.pipeline.submit().expect("first fetch starts");

    h.pipeline.set_query("second");
    let second = h.pipeline.submit().expect("second fetch starts");

    // First response arrives after the second was submitted: discard it.
    h.pipeline
        .complete(first, Ok(json!({ "items": [ { "id": "stale" } ] })));
    assert!(h.pipeline.state().is_loading());

    h.pipeline
        .complete(second, Ok(json!({ "items": [ { "id": "fresh" } ] })));
    let items = h.pipeline.state().items().expect("ready items");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, "fresh");
}

#[test]
fn query_change_invalidates_inflight_fetch() {
    let mut h = harness(BlockSettings::for_query("first"));
    let ticket = h.pipeline.submit().expect("fetch starts");
    h.pipeline.set_query("second");
    h.pipeline
        .complete(ticket, Ok(json!({ "items": [ { "id": "stale" } ] })));
    assert!(h.pipeline.state().is_idle());
    assert!(!h.pipeline.settings().validated);
}

#[test]
fn locale_substitution_updates_settings() {
    let mut h = harness(BlockSettings::for_query("q"));
    h.source.push(Ok(scenario_payload()));
    h.pipeline.run();

    h.pipeline.set_locale("xx-XX");
    // The resolver substituted the default; the setting follows suit.
    assert_eq!(h.pipeline.settings().locale, "en-US");
    assert!(h.pipeline.generation_error().is_none());
}

#[test]
fn missing_style_keeps_previous_text() {
    let mut h = harness(BlockSettings::for_query("q"));
    h.source.push(Ok(scenario_payload()));
    h.pipeline.run();
    let before = h.pipeline.bibliography().to_string();

    h.pipeline.set_style("chicago");
    assert_eq!(h.pipeline.bibliography(), before);
    assert!(h.pipeline.generation_error().is_some());
    assert!(h.pipeline.state().is_ready());

    h.pipeline.set_style("apa");
    assert!(h.pipeline.generation_error().is_none());
}

#[test]
fn refresh_drives_exactly_one_fetch() {
    let mut h = harness(BlockSettings::for_query("q"));
    let ticket = h.pipeline.refresh().expect("validated query fetches");
    assert!(h.pipeline.state().is_loading());
    assert!(h.pipeline.refresh().is_none());

    h.pipeline.complete(ticket, Ok(scenario_payload()));
    assert!(h.pipeline.refresh().is_none());
    assert!(h.pipeline.state().is_ready());
}

#[test]
fn unvalidated_query_never_fetches() {
    let settings = BlockSettings {
        query: "q".to_string(),
        validated: false,
        ..BlockSettings::default()
    };
    let mut h = harness(settings);
    assert!(h.pipeline.refresh().is_none());
    assert_eq!(h.source.calls(), 0);
    assert!(h.pipeline.state().is_idle());
}
