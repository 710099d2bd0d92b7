//! The query pipeline: validation, fetch, normalization, and bibliography
//! regeneration behind one explicit state machine.

use serde_json::Value;
use tracing::{debug, info, warn};

use kcworks_bib::{BibliographyGenerator, CitationEngine};
use kcworks_client::{FetchError, RecordSource};
use kcworks_model::{BlockSettings, SortKey};
use kcworks_normalize::{extract_items, sort_items};

use crate::state::{PipelineFailure, PipelineState};
use crate::validate::validate_query;

/// Bibliography text shown before the first successful generation, and kept
/// when a fetch or generation fails.
pub const BIBLIOGRAPHY_PLACEHOLDER: &str = "<p>...</p>";

/// Handle for one started fetch.
///
/// The generation is monotonically increasing per pipeline; a completion
/// whose ticket is not the current generation is discarded, which gives
/// last-write-wins in submission order regardless of arrival order.
#[derive(Debug)]
pub struct FetchTicket {
    generation: u64,
    query: String,
}

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}

/// One query session: settings, state machine, and derived bibliography.
///
/// The source and the citation engine are trait-typed seams; production code
/// plugs in `ProxyClient` and a CSL engine, tests plug in scripted doubles.
/// Each pipeline instance is independent; there is no shared state between
/// sessions.
pub struct QueryPipeline<S, E> {
    source: S,
    generator: BibliographyGenerator<E>,
    settings: BlockSettings,
    state: PipelineState,
    generation: u64,
    /// Query of the in-flight fetch, used to dedupe double submissions.
    inflight_query: Option<String>,
    /// Query of the last fetch that completed successfully.
    completed_query: Option<String>,
    bibliography: String,
    /// Set when bibliography generation failed and the previous text was
    /// kept; cleared by the next successful generation.
    generation_error: Option<String>,
}

impl<S: RecordSource, E: CitationEngine> QueryPipeline<S, E> {
    pub fn new(source: S, generator: BibliographyGenerator<E>, settings: BlockSettings) -> Self {
        Self {
            source,
            generator,
            settings,
            state: PipelineState::Idle,
            generation: 0,
            inflight_query: None,
            completed_query: None,
            bibliography: BIBLIOGRAPHY_PLACEHOLDER.to_string(),
            generation_error: None,
        }
    }

    pub fn state(&self) -> &PipelineState {
        &self.state
    }

    pub fn settings(&self) -> &BlockSettings {
        &self.settings
    }

    pub fn bibliography(&self) -> &str {
        &self.bibliography
    }

    pub fn generation_error(&self) -> Option<&str> {
        self.generation_error.as_deref()
    }

    /// Replace the query text.
    ///
    /// A genuine change resets validation, forgets the completed fetch, and
    /// invalidates any in-flight fetch by advancing the generation.
    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query == self.settings.query {
            return;
        }
        self.settings.query = query;
        self.settings.validated = false;
        self.completed_query = None;
        self.inflight_query = None;
        self.generation += 1;
        self.state = PipelineState::Idle;
    }

    /// Explicit user submission of the current query.
    ///
    /// Marks the query validated and starts a fetch unless one has already
    /// completed, or is still in flight, for this exact query. Returns the
    /// ticket for the started fetch, or `None` when nothing was started.
    pub fn submit(&mut self) -> Option<FetchTicket> {
        self.settings.validated = true;
        if self.settings.query.is_empty() {
            self.state = PipelineState::Idle;
            return None;
        }
        if self.completed_query.as_deref() == Some(self.settings.query.as_str()) {
            debug!(query = %self.settings.query, "fetch already completed for this query");
            return None;
        }
        if self.state.is_loading()
            && self.inflight_query.as_deref() == Some(self.settings.query.as_str())
        {
            debug!(query = %self.settings.query, "fetch already in flight for this query");
            return None;
        }
        if let Err(error) = validate_query(&self.settings.query) {
            warn!(%error, "query rejected");
            self.state = PipelineState::Error(PipelineFailure::from(error));
            return None;
        }
        self.start_fetch()
    }

    /// Render-time re-entrancy hook.
    ///
    /// Starts a fetch only for a non-empty, validated query that has neither
    /// completed nor started; a mere re-render never re-fetches, and an error
    /// state waits for an explicit [`QueryPipeline::submit`].
    pub fn refresh(&mut self) -> Option<FetchTicket> {
        if self.settings.query.is_empty() || !self.settings.validated {
            return None;
        }
        match self.state {
            PipelineState::Loading | PipelineState::Error(_) => None,
            PipelineState::Idle | PipelineState::Ready(_) => {
                if self.completed_query.as_deref() == Some(self.settings.query.as_str()) {
                    None
                } else {
                    self.submit()
                }
            }
        }
    }

    /// Apply the outcome of a fetch.
    ///
    /// A stale ticket (superseded by a newer submission) is discarded without
    /// touching state.
    pub fn complete(&mut self, ticket: FetchTicket, result: Result<Value, FetchError>) {
        if ticket.generation != self.generation {
            debug!(
                stale = ticket.generation,
                current = self.generation,
                "discarding stale fetch result"
            );
            return;
        }
        self.inflight_query = None;
        let outcome = result
            .map_err(PipelineFailure::from)
            .and_then(|payload| extract_items(&payload).map_err(PipelineFailure::from));
        match outcome {
            Ok(mut items) => {
                sort_items(&mut items, self.settings.sort);
                info!(
                    generation = ticket.generation,
                    items = items.len(),
                    "fetch completed"
                );
                self.completed_query = Some(ticket.query);
                self.state = PipelineState::Ready(items);
                self.regenerate();
            }
            Err(failure) => {
                warn!(generation = ticket.generation, %failure, "fetch failed");
                self.state = PipelineState::Error(failure);
            }
        }
    }

    /// Submit and drive the source synchronously.
    pub fn run(&mut self) {
        if let Some(ticket) = self.submit() {
            let result = self.source.fetch_records(&ticket.query);
            self.complete(ticket, result);
        }
    }

    /// Change the citation style; regenerates, never fetches.
    pub fn set_style(&mut self, style: impl Into<String>) {
        let style = style.into();
        if style == self.settings.style {
            return;
        }
        self.settings.style = style;
        self.regenerate();
    }

    /// Change the locale; regenerates, never fetches.
    pub fn set_locale(&mut self, locale: impl Into<String>) {
        let locale = locale.into();
        if locale == self.settings.locale {
            return;
        }
        self.settings.locale = locale;
        self.regenerate();
    }

    /// Change the sort order; re-sorts the ready collection and regenerates,
    /// never fetches.
    pub fn set_sort(&mut self, sort: SortKey) {
        if sort == self.settings.sort {
            return;
        }
        self.settings.sort = sort;
        if let PipelineState::Ready(items) = &mut self.state {
            sort_items(items, sort);
        }
        self.regenerate();
    }

    fn start_fetch(&mut self) -> Option<FetchTicket> {
        self.generation += 1;
        self.inflight_query = Some(self.settings.query.clone());
        self.state = PipelineState::Loading;
        debug!(generation = self.generation, query = %self.settings.query, "fetch started");
        Some(FetchTicket {
            generation: self.generation,
            query: self.settings.query.clone(),
        })
    }

    /// Recompute the bibliography from the ready collection.
    ///
    /// On generation failure the previous text is kept and the failure is
    /// surfaced through [`QueryPipeline::generation_error`].
    fn regenerate(&mut self) {
        let PipelineState::Ready(items) = &self.state else {
            return;
        };
        if items.is_empty() {
            return;
        }
        match self.generator.generate(
            items,
            Some(&self.settings.style),
            Some(&self.settings.locale),
        ) {
            Ok(generated) => {
                self.bibliography = generated.text;
                // Keep the displayed locale consistent with what the engine
                // actually used.
                self.settings.locale = generated.locale;
                self.generation_error = None;
            }
            Err(error) => {
                warn!(%error, "bibliography generation failed, keeping previous text");
                self.generation_error = Some(error.to_string());
            }
        }
    }
}
