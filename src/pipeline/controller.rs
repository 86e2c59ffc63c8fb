//! The pagination controller: de-duplication, chunking and per-chunk
//! rendering under time budgets.

use super::config::EngineConfig;
use super::report::{ChunkOutcome, ChunkReport, RunPhase, RunReport};
use crate::error::PipelineError;
use itertools::Itertools;
use labelgrid_core::composer::{ComposerError, DocumentComposer};
use labelgrid_core::label::{LabelContextBuilder, QrCache};
use labelgrid_core::layout::{CellCategories, Deadline, SpanMaterializer};
use labelgrid_core::template::{Category, LabelContext, TemplateKind, bound_cells, inject_contexts};
use labelgrid_core::{
    Document, Record, RenderError, StructuralValidator, ValidationOutcome, cleanup_residue,
};
use labelgrid_source::DataSource;
use log::{debug, error, info, warn};
use std::cell::Cell;
use std::collections::HashSet;
use std::time::Instant;

/// The final document of a run and its report.
#[derive(Debug)]
pub struct RunOutput {
    pub document: Document,
    pub report: RunReport,
}

/// A configured labelling engine. Holds the prepared grid of its kind and
/// renders any number of runs from it; every page is a deep copy.
#[derive(Debug)]
pub struct LabelPipeline {
    config: EngineConfig,
    grid: Document,
    contexts: LabelContextBuilder,
    materializer: SpanMaterializer,
    validator: StructuralValidator,
    phase: Cell<RunPhase>,
}

/// Result of one rendered chunk, before it is added to the document.
struct RenderedChunk {
    page: Document,
    outcome: ChunkOutcome,
    detail: Option<String>,
}

impl LabelPipeline {
    pub(crate) fn new(
        config: EngineConfig,
        grid: Document,
        contexts: LabelContextBuilder,
        materializer: SpanMaterializer,
    ) -> Self {
        let validator = StructuralValidator::new(config.kind);
        Self {
            config,
            grid,
            contexts,
            materializer,
            validator,
            phase: Cell::new(RunPhase::Idle),
        }
    }

    pub fn kind(&self) -> TemplateKind {
        self.config.kind
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The phase of the current (or last) run.
    pub fn phase(&self) -> RunPhase {
        self.phase.get()
    }

    /// The prepared, unpopulated grid pages are copied from.
    pub fn grid(&self) -> &Document {
        &self.grid
    }

    /// Drains `source` and runs on its records.
    pub fn run_source(&self, source: &mut dyn DataSource) -> Result<RunOutput, PipelineError> {
        self.run(source.collect_records())
    }

    /// Renders `records` into one document.
    ///
    /// Chunk failures, composition failures and timeouts are recorded in the
    /// report, never returned.
    pub fn run(&self, records: Vec<Record>) -> Result<RunOutput, PipelineError> {
        let started = Instant::now();
        let total = Deadline::from_budget(self.config.total_budget());
        let kind = self.config.kind;
        let mut report = RunReport::new(kind.name(), records.len());
        self.phase.set(RunPhase::Idle);
        info!("Starting {} run over {} record(s)", kind, records.len());

        self.enter(RunPhase::Deduping);
        let (unique, duplicates) = dedupe(records, &self.config.name_key);
        report.records_processed = unique.len();
        report.duplicates_skipped = duplicates;

        self.enter(RunPhase::Chunking);
        let chunks: Vec<Vec<Record>> = unique
            .into_iter()
            .chunks(kind.capacity())
            .into_iter()
            .map(|chunk| chunk.collect())
            .collect();
        info!(
            "{} record(s) in {} chunk(s) of up to {}",
            report.records_processed,
            chunks.len(),
            kind.capacity()
        );

        let mut composer = DocumentComposer::new();
        for (index, chunk) in chunks.iter().enumerate() {
            if total.is_expired() {
                self.enter(RunPhase::ChunkSkipped);
                warn!("Run budget exhausted, skipping chunk {}", index + 1);
                report.push_chunk(ChunkReport::skipped(index, chunk.len()));
                continue;
            }

            self.enter(RunPhase::RenderChunk);
            let chunk_started = Instant::now();
            let rendered = self.render_chunk(index, chunk);
            let composed = composer.push_page(&rendered.page).map(|_| composer.page_count());
            let mut chunk_report = chunk_report(index, chunk.len(), rendered, composed);
            chunk_report.elapsed_ms = chunk_started.elapsed().as_millis() as u64;
            report.push_chunk(chunk_report);
        }

        self.enter(RunPhase::Compose);
        let document = composer.finish();
        report.finish(started.elapsed());
        self.enter(RunPhase::Done);
        info!(
            "Run done: {} page(s), {} completed, {} degraded, {} skipped, {} duplicate(s) in {} ms",
            report.pages,
            report.chunks_completed,
            report.chunks_degraded,
            report.chunks_skipped,
            report.duplicates_skipped.len(),
            report.elapsed_ms
        );
        Ok(RunOutput { document, report })
    }

    fn enter(&self, next: RunPhase) {
        let current = self.phase.get();
        if !current.can_advance_to(next) {
            warn!("Unexpected phase change {} -> {}", current, next);
        }
        debug!("Phase {} -> {}", current, next);
        self.phase.set(next);
    }

    /// Renders one chunk onto a fresh copy of the grid. Never fails: errors
    /// degrade the chunk and the page is kept as far as it got.
    fn render_chunk(&self, index: usize, chunk: &[Record]) -> RenderedChunk {
        let deadline = Deadline::from_budget(self.config.chunk_budget());
        let mut page = self.grid.clone();

        let mut qr_cache = QrCache::new();
        let contexts: Vec<LabelContext> = chunk
            .iter()
            .map(|record| self.contexts.build(record, &mut qr_cache))
            .collect();
        let categories: Vec<Category> = contexts.iter().map(LabelContext::category).collect();

        let mut rendered = RenderedChunk {
            page: Document::new(),
            outcome: ChunkOutcome::Completed,
            detail: None,
        };
        if let Err(e) = self.post_process(&mut page, &contexts, &categories, deadline, &mut rendered) {
            error!("Chunk {} failed, keeping best-effort page: {}", index + 1, e);
            rendered.outcome = ChunkOutcome::Degraded;
            rendered.detail = Some(e.to_string());
        }

        self.enter(RunPhase::ValidateChunk);
        let removed = cleanup_residue(&mut page);
        if removed > 0 {
            debug!("Chunk {}: removed {} leftover marker(s)", index + 1, removed);
        }
        rendered.page = page;
        rendered
    }

    fn post_process(
        &self,
        page: &mut Document,
        contexts: &[LabelContext],
        categories: &[Category],
        deadline: Deadline,
        rendered: &mut RenderedChunk,
    ) -> Result<(), RenderError> {
        if self.validator.validate_and_repair(page)? == ValidationOutcome::Rebuilt {
            rendered.outcome = ChunkOutcome::Degraded;
            rendered.detail = Some("grid rebuilt blank".to_string());
        }

        let cells: CellCategories = bound_cells(page)
            .into_iter()
            .map(|(cell, index)| (cell, categories.get(index.slot()).copied().unwrap_or_default()))
            .collect();

        let stats = inject_contexts(page, contexts)?;
        debug!(
            "Injected {} of {} placeholder(s), {} blank, {} graphic(s)",
            stats.filled, stats.placeholders, stats.blanked, stats.graphics
        );

        if deadline.is_expired() {
            warn!("Chunk budget exhausted before sizing");
            rendered.outcome = ChunkOutcome::Degraded;
            rendered.detail = Some("chunk budget exhausted before sizing".to_string());
            return Ok(());
        }
        let sizing = self.materializer.apply(page, &cells, deadline)?;
        if sizing.timed_out {
            rendered.outcome = ChunkOutcome::Degraded;
            rendered.detail = Some(format!(
                "chunk budget exhausted, {} paragraph(s) unsized",
                sizing.skipped_paragraphs
            ));
        }
        Ok(())
    }
}

/// The report line of a rendered chunk, given whether its page made it into
/// the document. A page that could not be composed degrades the chunk.
fn chunk_report(
    index: usize,
    records: usize,
    rendered: RenderedChunk,
    composed: Result<usize, ComposerError>,
) -> ChunkReport {
    let mut report = ChunkReport {
        index,
        records,
        outcome: rendered.outcome,
        page: None,
        elapsed_ms: 0,
        detail: rendered.detail,
    };
    match composed {
        Ok(page) => report.page = Some(page),
        Err(e) => {
            error!("Chunk {} rendered but its page could not be composed: {}", index + 1, e);
            report.outcome = ChunkOutcome::Degraded;
            report.detail = Some(format!("page could not be composed: {}", e));
        }
    }
    report
}

/// Keeps the first record of every name, in order. Returns the kept records
/// and the names of the dropped ones. Records without a name are never
/// treated as duplicates.
pub fn dedupe(records: Vec<Record>, name_key: &str) -> (Vec<Record>, Vec<String>) {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    let mut unique = Vec::with_capacity(records.len());
    for record in records {
        let name = record.text(name_key);
        if name.is_empty() || seen.insert(name.clone()) {
            unique.push(record);
        } else {
            warn!("Skipping duplicate record '{}'", name);
            duplicates.push(name);
        }
    }
    (unique, duplicates)
}
