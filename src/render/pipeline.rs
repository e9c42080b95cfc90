//! Debounced, ordered rendering for a live preview.
//!
//! A render moves through three steps so hosts can run the conversion
//! wherever they like:
//!
//! 1. [`RenderPipeline::take_job`] starts a job once the input has settled.
//! 2. [`RenderJob::run`] converts and sanitizes.
//! 3. [`RenderPipeline::complete`] applies the result, but only if no newer
//!    job has been started since.
//!
//! [`RenderPipeline::tick`] runs all three synchronously.

use serde::Serialize;

use super::Renderer;
use crate::debounce::Debouncer;

/// Default quiet period before a render starts.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// The preview currently on display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderOutput {
    /// Sanitized HTML, or [`FALLBACK_HTML`](super::FALLBACK_HTML) if conversion failed.
    pub html: String,
    /// Generation of the job that produced this output; 0 before any render.
    pub generation: u64,
    pub failed: bool,
}

/// A started render that has not produced HTML yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderJob {
    generation: u64,
    source: String,
}

impl RenderJob {
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Convert and sanitize the job's source.
    pub fn run(self, renderer: &Renderer) -> CompletedRender {
        let _span = tracing::debug_span!("render", generation = self.generation).entered();
        let (html, failed) = renderer.render_output(&self.source);
        CompletedRender {
            generation: self.generation,
            html,
            failed,
        }
    }
}

/// Result of [`RenderJob::run`], waiting to be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedRender {
    generation: u64,
    html: String,
    failed: bool,
}

impl CompletedRender {
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    pub fn html(&self) -> &str {
        &self.html
    }
}

/// Coalesces source edits and keeps the preview on the newest render.
#[derive(Debug)]
pub struct RenderPipeline {
    renderer: Renderer,
    debouncer: Debouncer<String>,
    last_started: u64,
    output: RenderOutput,
}

impl RenderPipeline {
    pub fn new(debounce_ms: u64) -> Self {
        Self::with_renderer(Renderer::new(), debounce_ms)
    }

    pub fn with_renderer(renderer: Renderer, debounce_ms: u64) -> Self {
        Self {
            renderer,
            debouncer: Debouncer::new(debounce_ms),
            last_started: 0,
            output: RenderOutput::default(),
        }
    }

    /// Record new source text; restarts the quiet period.
    pub fn submit(&mut self, source: impl Into<String>, now_ms: u64) {
        self.debouncer.queue(source.into(), now_ms);
    }

    /// Start a job if the latest submission has settled.
    pub fn take_job(&mut self, now_ms: u64) -> Option<RenderJob> {
        let source = self.debouncer.take_ready(now_ms)?;
        Some(self.start_job(source))
    }

    /// Start a job for the pending submission without waiting.
    pub fn take_job_now(&mut self) -> Option<RenderJob> {
        let source = self.debouncer.take_now()?;
        Some(self.start_job(source))
    }

    fn start_job(&mut self, source: String) -> RenderJob {
        self.last_started += 1;
        tracing::debug!(
            generation = self.last_started,
            bytes = source.len(),
            "render started"
        );
        RenderJob {
            generation: self.last_started,
            source,
        }
    }

    /// Apply a finished render if it belongs to the newest started job.
    ///
    /// Returns `true` if the displayed output changed hands.
    pub fn complete(&mut self, done: CompletedRender) -> bool {
        if done.generation != self.last_started || done.generation == self.output.generation {
            tracing::debug!(
                generation = done.generation,
                latest = self.last_started,
                "discarding superseded render"
            );
            return false;
        }
        self.output = RenderOutput {
            html: done.html,
            generation: done.generation,
            failed: done.failed,
        };
        true
    }

    /// Start, run and apply a render if the input has settled.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let Some(job) = self.take_job(now_ms) else {
            return false;
        };
        let done = job.run(&self.renderer);
        self.complete(done)
    }

    /// Render the pending submission immediately.
    pub fn flush(&mut self) -> bool {
        let Some(job) = self.take_job_now() else {
            return false;
        };
        let done = job.run(&self.renderer);
        self.complete(done)
    }

    pub fn html(&self) -> &str {
        &self.output.html
    }

    pub const fn output(&self) -> &RenderOutput {
        &self.output
    }

    /// True from the start of the newest job until its result is applied.
    pub const fn is_processing(&self) -> bool {
        self.last_started != self.output.generation
    }

    /// True while a submission is waiting out its quiet period.
    pub const fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// When the pending submission becomes ready to render.
    pub fn next_deadline(&self) -> Option<u64> {
        self.debouncer.ready_at()
    }

    pub const fn last_started_generation(&self) -> u64 {
        self.last_started
    }

    pub const fn renderer(&self) -> &Renderer {
        &self.renderer
    }
}

impl Default for RenderPipeline {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_MS)
    }
}
