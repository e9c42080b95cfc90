use crate::editor::MarkdownFormat;
use crate::sync::{PaneId, PaneMetrics, ScrollEvent, VirtualPane};

use super::{Message, Model, SessionConfig, ViewMode, update};

fn create_test_model(content: &str) -> Model<VirtualPane> {
    let mut model = Model::new(content, &SessionConfig::default(), 0);
    model.mount(VirtualPane::new(2000.0, 500.0), VirtualPane::new(1200.0, 400.0));
    model
}

fn editor_scroll(scroll_top: f64) -> Message {
    Message::Scrolled(ScrollEvent::user(
        PaneId::Source,
        PaneMetrics::new(scroll_top, 2000.0, 500.0),
    ))
}

fn preview_top(model: &Model<VirtualPane>) -> f64 {
    model.sync.mirror().unwrap().scroll_top()
}

#[test]
fn test_initial_content_renders_after_debounce() {
    let model = create_test_model("# Hello");
    let model = update(model, Message::Tick, 299);
    assert_eq!(model.preview_html(), "");
    let model = update(model, Message::Tick, 300);
    assert_eq!(model.preview_html(), "<h1>Hello</h1>\n");
}

#[test]
fn test_typing_burst_renders_once() {
    let mut model = create_test_model("");
    model = update(model, Message::Tick, 300);
    let before = model.pipeline.last_started_generation();

    for (i, ch) in "abc".chars().enumerate() {
        let now = 1000 + 10 * i as u64;
        model = update(model, Message::InsertText(ch.to_string()), now);
        model = update(model, Message::Tick, now);
    }
    model = update(model, Message::Tick, 1319);
    assert_eq!(model.pipeline.last_started_generation(), before);

    model = update(model, Message::Tick, 1320);
    assert_eq!(model.pipeline.last_started_generation(), before + 1);
    assert_eq!(model.preview_html(), "<p>abc</p>\n");
}

#[test]
fn test_content_replaced_with_same_text_does_not_rerender() {
    let model = create_test_model("same");
    let model = update(model, Message::Tick, 300);
    let model = update(model, Message::ContentReplaced("same".into()), 400);
    assert!(!model.pipeline.is_pending());
    assert!(!model.has_unsaved_changes());
}

#[test]
fn test_script_in_content_never_reaches_preview() {
    let model = create_test_model("");
    let model = update(
        model,
        Message::ContentReplaced("ok <script>alert(1)</script>".into()),
        0,
    );
    let model = update(model, Message::Tick, 300);
    assert!(!model.preview_html().contains("<script"));
    assert!(model.preview_html().contains("ok"));
}

#[test]
fn test_format_message_edits_and_schedules_render() {
    let model = create_test_model("word");
    let model = update(model, Message::Select(0..4), 10);
    let model = update(model, Message::Format(MarkdownFormat::Bold), 10);
    assert_eq!(model.buffer.text(), "**word**");
    let model = update(model, Message::Tick, 310);
    assert!(model.preview_html().contains("<strong>word</strong>"));
}

#[test]
fn test_delete_back_at_start_does_not_schedule_render() {
    let model = create_test_model("x");
    let model = update(model, Message::Tick, 300);
    let model = update(model, Message::MoveCursor(0), 400);
    let model = update(model, Message::DeleteBack, 400);
    assert!(!model.pipeline.is_pending());
}

#[test]
fn test_editor_scroll_moves_preview_in_split_mode() {
    let model = create_test_model("text");
    let model = update(model, editor_scroll(750.0), 0);
    assert_eq!(preview_top(&model), 400.0);
}

#[test]
fn test_scroll_ignored_outside_split_modes() {
    let mut model = create_test_model("text");
    for mode in [ViewMode::EditorOnly, ViewMode::PreviewOnly] {
        model = update(model, Message::SetViewMode(mode), 0);
        model = update(model, editor_scroll(1500.0), 1000);
        assert_eq!(preview_top(&model), 0.0);
    }
    model = update(model, Message::SetViewMode(ViewMode::SplitVertical), 0);
    model = update(model, editor_scroll(1500.0), 2000);
    assert_eq!(preview_top(&model), 800.0);
}

#[test]
fn test_preview_echo_does_not_scroll_editor_back() {
    let model = create_test_model("text");
    let model = update(model, editor_scroll(750.0), 0);
    let echo = Message::Scrolled(ScrollEvent::programmatic(
        PaneId::Mirror,
        PaneMetrics::new(400.0, 1200.0, 400.0),
    ));
    let model = update(model, echo, 100);
    assert_eq!(model.sync.source().unwrap().writes(), 0);
}

#[test]
fn test_toggle_scroll_sync() {
    let model = create_test_model("text");
    let model = update(model, Message::ToggleScrollSync, 0);
    assert!(!model.sync.is_enabled());
    let model = update(model, editor_scroll(750.0), 0);
    assert_eq!(preview_top(&model), 0.0);

    let model = update(model, Message::ToggleScrollSync, 10);
    assert!(model.sync.is_enabled());
    let model = update(model, editor_scroll(750.0), 10);
    assert_eq!(preview_top(&model), 400.0);
}

#[test]
fn test_unsaved_changes_cleared_by_mark_saved() {
    let model = create_test_model("a");
    let model = update(model, Message::InsertText("b".into()), 0);
    assert!(model.has_unsaved_changes());
    let model = update(model, Message::MarkSaved, 0);
    assert!(!model.has_unsaved_changes());
}

#[test]
fn test_unmount_flushes_and_releases_panes() {
    let mut model = create_test_model("# Draft");
    assert!(model.is_mounted());
    let (editor, preview) = model.unmount();
    assert!(editor.is_some() && preview.is_some());
    assert!(!model.is_mounted());
    assert_eq!(model.preview_html(), "<h1>Draft</h1>\n");

    let model = update(model, editor_scroll(750.0), 0);
    assert!(model.sync.mirror().is_none());
}

#[test]
fn test_next_wakeup_follows_last_edit() {
    let model = create_test_model("");
    assert_eq!(model.next_wakeup(), Some(300));
    let model = update(model, Message::InsertText("x".into()), 120);
    assert_eq!(model.next_wakeup(), Some(420));
}

#[test]
fn test_stats_reflect_buffer() {
    let model = create_test_model("one two\nthree");
    assert_eq!(model.stats().words, 3);
    assert_eq!(model.stats().lines, 2);
}

#[test]
fn test_default_view_mode_is_horizontal_split() {
    let model = create_test_model("");
    assert_eq!(model.view_mode, ViewMode::SplitHorizontal);
    assert!(model.view_mode.is_split());
}
