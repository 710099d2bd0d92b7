//! Generator tests against an on-disk asset fixture and a recording engine.

use std::cell::RefCell;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use kcworks_assets::{AssetError, AssetResolver};
use kcworks_bib::{
    BibError, BibliographyGenerator, CitationEngine, EngineError, EngineSys, PlainTextEngine,
};
use kcworks_model::BibliographicItem;
use tempfile::TempDir;

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

fn fixture_resolver() -> (TempDir, AssetResolver) {
    let dir = TempDir::new().expect("create tempdir");
    write_fixture_tree(dir.path());
    let resolver = AssetResolver::new(dir.path()).expect("create resolver");
    (dir, resolver)
}

fn items() -> Vec<BibliographicItem> {
    vec![
        BibliographicItem::new("B").with_title("Newer work").with_year(2022),
        BibliographicItem::new("A").with_title("Older work").with_year(2020),
    ]
}

/// What the engine observed during its last invocation.
#[derive(Default)]
struct Observed {
    item_ids: RefCell<Vec<String>>,
    locale_xml: RefCell<Option<String>>,
    style_xml: RefCell<String>,
}

/// Engine that records what it was invoked with and probes the sys callbacks.
#[derive(Default, Clone)]
struct RecordingEngine {
    observed: Rc<Observed>,
}

impl CitationEngine for RecordingEngine {
    fn make_bibliography(
        &self,
        sys: &dyn EngineSys,
        style_xml: &str,
        item_ids: &[String],
    ) -> Result<Vec<String>, EngineError> {
        *self.observed.item_ids.borrow_mut() = item_ids.to_vec();
        *self.observed.locale_xml.borrow_mut() = sys.retrieve_locale("en-US");
        *self.observed.style_xml.borrow_mut() = style_xml.to_string();
        item_ids
            .iter()
            .map(|id| {
                let item = sys
                    .retrieve_item(id)
                    .ok_or_else(|| EngineError(format!("unknown item id: {id}")))?;
                Ok(format!("entry:{}", item.id))
            })
            .collect()
    }
}

#[test]
fn registers_ids_in_collection_order() {
    let (_dir, resolver) = fixture_resolver();
    let engine = RecordingEngine::default();
    let observed = Rc::clone(&engine.observed);
    let generator = BibliographyGenerator::new(resolver, engine);
    let result = generator
        .generate(&items(), Some("apa"), Some("en-US"))
        .expect("generate");
    // Collection order, not id order, and entries joined with a newline.
    assert_eq!(*observed.item_ids.borrow(), ["B", "A"]);
    assert_eq!(result.text, "entry:B\nentry:A");
    assert_eq!(result.locale, "en-US");
}

#[test]
fn engine_sees_style_and_locale_documents() {
    let (_dir, resolver) = fixture_resolver();
    let engine = RecordingEngine::default();
    let observed = Rc::clone(&engine.observed);
    let generator = BibliographyGenerator::new(resolver, engine);
    generator
        .generate(&items(), Some("apa"), Some("en-US"))
        .expect("generate");
    assert!(observed.style_xml.borrow().contains("Test Style"));
    let locale_xml = observed.locale_xml.borrow();
    assert!(locale_xml.as_deref().is_some_and(|xml| xml.contains("en-US")));
}

#[test]
fn locale_substitution_is_reported() {
    let (_dir, resolver) = fixture_resolver();
    let generator = BibliographyGenerator::new(resolver, RecordingEngine::default());
    let result = generator
        .generate(&items(), Some("apa"), Some("xx-XX"))
        .expect("generate");
    assert_eq!(result.locale, "en-US");
    assert!(!result.text.is_empty());
}

#[test]
fn absent_style_id_yields_empty_text() {
    let (_dir, resolver) = fixture_resolver();
    let generator = BibliographyGenerator::new(resolver, PlainTextEngine);
    let result = generator
        .generate(&items(), None, Some("en-US"))
        .expect("generate");
    assert!(result.text.is_empty());
    assert_eq!(result.locale, "en-US");
}

#[test]
fn missing_style_is_an_asset_error() {
    let (_dir, resolver) = fixture_resolver();
    let generator = BibliographyGenerator::new(resolver, PlainTextEngine);
    let err = generator
        .generate(&items(), Some("chicago"), Some("en-US"))
        .unwrap_err();
    assert!(matches!(
        err,
        BibError::Asset(AssetError::StyleNotFound { .. })
    ));
}

#[test]
fn plain_engine_produces_readable_entries() {
    let (_dir, resolver) = fixture_resolver();
    let generator = BibliographyGenerator::new(resolver, PlainTextEngine);
    let result = generator
        .generate(&items(), Some("apa"), Some("en-US"))
        .expect("generate");
    assert_eq!(result.text, "Newer work (2022).\nOlder work (2020).");
}
