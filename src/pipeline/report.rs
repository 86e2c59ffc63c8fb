//! What a run did, for logs and for the caller.

use chrono::Utc;
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Stages of a run, in order. `RenderChunk` and `ValidateChunk` repeat per
/// chunk; a chunk that is not started goes to `ChunkSkipped` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunPhase {
    Idle,
    Deduping,
    Chunking,
    RenderChunk,
    ValidateChunk,
    ChunkSkipped,
    Compose,
    Done,
}

impl RunPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunPhase::Idle => "IDLE",
            RunPhase::Deduping => "DEDUPING",
            RunPhase::Chunking => "CHUNKING",
            RunPhase::RenderChunk => "RENDER_CHUNK",
            RunPhase::ValidateChunk => "VALIDATE_CHUNK",
            RunPhase::ChunkSkipped => "CHUNK_SKIPPED",
            RunPhase::Compose => "COMPOSE",
            RunPhase::Done => "DONE",
        }
    }

    /// Whether a run may move from `self` to `next`.
    pub fn can_advance_to(&self, next: RunPhase) -> bool {
        use RunPhase::*;
        matches!(
            (self, next),
            (Idle, Deduping)
                | (Deduping, Chunking)
                | (Chunking | ValidateChunk | ChunkSkipped, RenderChunk | ChunkSkipped | Compose)
                | (RenderChunk, ValidateChunk | ChunkSkipped)
                | (Compose, Done)
        )
    }
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkOutcome {
    Completed,
    /// Rendered, but post-processing failed, ran out of time or lost content.
    Degraded,
    SkippedForTimeout,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChunkReport {
    /// 0-based chunk position.
    pub index: usize,
    pub records: usize,
    pub outcome: ChunkOutcome,
    /// Page number in the final document, if the chunk produced a page.
    pub page: Option<usize>,
    pub elapsed_ms: u64,
    /// Why the chunk is degraded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ChunkReport {
    pub fn skipped(index: usize, records: usize) -> Self {
        Self {
            index,
            records,
            outcome: ChunkOutcome::SkippedForTimeout,
            page: None,
            elapsed_ms: 0,
            detail: None,
        }
    }
}

/// Summary of one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub kind: String,
    pub records_received: usize,
    pub records_processed: usize,
    /// Names of dropped duplicates, in the order they were seen.
    pub duplicates_skipped: Vec<String>,
    pub chunks: Vec<ChunkReport>,
    pub chunks_completed: usize,
    pub chunks_degraded: usize,
    pub chunks_skipped: usize,
    pub pages: usize,
    pub elapsed_ms: u64,
    /// RFC 3339 time the run finished.
    pub generated_at: String,
}

impl RunReport {
    pub fn new(kind: impl Into<String>, records_received: usize) -> Self {
        Self {
            kind: kind.into(),
            records_received,
            records_processed: 0,
            duplicates_skipped: Vec::new(),
            chunks: Vec::new(),
            chunks_completed: 0,
            chunks_degraded: 0,
            chunks_skipped: 0,
            pages: 0,
            elapsed_ms: 0,
            generated_at: String::new(),
        }
    }

    pub fn push_chunk(&mut self, chunk: ChunkReport) {
        match chunk.outcome {
            ChunkOutcome::Completed => self.chunks_completed += 1,
            ChunkOutcome::Degraded => self.chunks_degraded += 1,
            ChunkOutcome::SkippedForTimeout => self.chunks_skipped += 1,
        }
        if chunk.page.is_some() {
            self.pages += 1;
        }
        self.chunks.push(chunk);
    }

    pub fn finish(&mut self, elapsed: Duration) {
        self.elapsed_ms = elapsed.as_millis() as u64;
        self.generated_at = Utc::now().to_rfc3339();
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_transitions_follow_the_run() {
        use RunPhase::*;
        let run = [Idle, Deduping, Chunking, RenderChunk, ValidateChunk, ChunkSkipped, Compose, Done];
        for pair in run.windows(2) {
            assert!(pair[0].can_advance_to(pair[1]), "{} -> {}", pair[0], pair[1]);
        }
        assert!(RenderChunk.can_advance_to(ChunkSkipped));
        assert!(Chunking.can_advance_to(Compose));
        assert!(!Idle.can_advance_to(RenderChunk));
        assert!(!Done.can_advance_to(Idle));
    }

    #[test]
    fn test_counts_follow_pushed_chunks() {
        let mut report = RunReport::new("horizontal", 10);
        report.push_chunk(ChunkReport {
            index: 0,
            records: 9,
            outcome: ChunkOutcome::Completed,
            page: Some(1),
            elapsed_ms: 3,
            detail: None,
        });
        report.push_chunk(ChunkReport::skipped(1, 1));
        report.finish(Duration::from_millis(12));

        assert_eq!(report.pages, 1);
        assert_eq!((report.chunks_completed, report.chunks_degraded, report.chunks_skipped), (1, 0, 1));
        assert_eq!(report.elapsed_ms, 12);
        assert!(!report.generated_at.is_empty());

        let json = report.to_json().unwrap();
        assert!(json.contains("\"skipped_for_timeout\""));
        assert!(!json.contains("\"detail\""));
    }

    #[test]
    fn test_phase_serializes_like_its_log_name() {
        assert_eq!(serde_json::to_string(&RunPhase::RenderChunk).unwrap(), "\"RENDER_CHUNK\"");
        assert_eq!(RunPhase::ChunkSkipped.to_string(), "CHUNK_SKIPPED");
    }
}
