use crate::editor::{EditorBuffer, TextStats};
use crate::render::{
    DEFAULT_DEBOUNCE_MS, DEFAULT_MAX_SOURCE_BYTES, RenderOutput, RenderPipeline, Renderer,
};
use crate::sync::{DEFAULT_GUARD_MS, ScrollPane, ScrollSync};

/// Timing and limits for an editing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Quiet period before the preview re-renders.
    pub debounce_ms: u64,
    /// Scroll-sync guard window; 0 relies on origin-tagged events only.
    pub sync_guard_ms: u64,
    pub max_source_bytes: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            sync_guard_ms: DEFAULT_GUARD_MS,
            max_source_bytes: DEFAULT_MAX_SOURCE_BYTES,
        }
    }
}

/// How the editor and preview are laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    EditorOnly,
    PreviewOnly,
    /// Editor left, preview right.
    #[default]
    SplitHorizontal,
    /// Editor above, preview below.
    SplitVertical,
}

impl ViewMode {
    /// Both panes are visible, so scroll sync applies.
    pub const fn is_split(self) -> bool {
        matches!(self, Self::SplitHorizontal | Self::SplitVertical)
    }
}

/// The complete state of one editing session.
///
/// All state lives here - the scroll coordinator and render pipeline are
/// owned by the session rather than shared globally.
#[derive(Debug)]
pub struct Model<P> {
    pub buffer: EditorBuffer,
    pub pipeline: RenderPipeline,
    pub sync: ScrollSync<P>,
    pub view_mode: ViewMode,
    mounted: bool,
}

impl<P: ScrollPane> Model<P> {
    /// Start a session on `content`; the first preview renders once the
    /// debounce window has passed.
    pub fn new(content: &str, config: &SessionConfig, now_ms: u64) -> Self {
        let renderer = Renderer::new().with_max_source_bytes(config.max_source_bytes);
        let mut pipeline = RenderPipeline::with_renderer(renderer, config.debounce_ms);
        pipeline.submit(content, now_ms);
        Self {
            buffer: EditorBuffer::from_text(content),
            pipeline,
            sync: ScrollSync::new(config.sync_guard_ms),
            view_mode: ViewMode::default(),
            mounted: false,
        }
    }

    /// Bind the editor and preview panes.
    pub fn mount(&mut self, editor: P, preview: P) {
        self.sync.set_elements(Some(editor), Some(preview));
        self.mounted = true;
        tracing::debug!("session mounted");
    }

    /// Release both panes. Any pending edit is rendered first so the
    /// preview is current if the panes are mounted again.
    pub fn unmount(&mut self) -> (Option<P>, Option<P>) {
        self.pipeline.flush();
        self.mounted = false;
        tracing::debug!("session unmounted");
        self.sync.take_elements()
    }

    pub const fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn preview_html(&self) -> &str {
        self.pipeline.html()
    }

    pub const fn preview(&self) -> &RenderOutput {
        self.pipeline.output()
    }

    pub const fn is_processing(&self) -> bool {
        self.pipeline.is_processing()
    }

    pub const fn has_unsaved_changes(&self) -> bool {
        self.buffer.is_dirty()
    }

    pub fn stats(&self) -> TextStats {
        self.buffer.stats()
    }

    /// When the host should next send [`Message::Tick`](super::Message::Tick).
    pub fn next_wakeup(&self) -> Option<u64> {
        self.pipeline.next_deadline()
    }

    pub(super) fn content_changed(&mut self, now_ms: u64) {
        self.pipeline.submit(self.buffer.text(), now_ms);
    }
}
