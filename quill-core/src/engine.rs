//! Core editor engine with platform-agnostic business logic

use tracing::{debug, info, warn};

use crate::actions::EditorAction;
use crate::clipboard::{Clipboard, MemoryClipboard};
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::file::{FileBridge, FsFiles, SaveOutcome};
use crate::input::InputFrame;
use crate::keymap;
use crate::render::{FontMetrics, RenderFrame, View};
use crate::state::Document;

/// Upper bound on actions taken from a single frame.
pub const MAX_ACTIONS_PER_FRAME: usize = 16;

/// What a processed frame asks of the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameOutcome {
    pub actions: usize,
    pub quit_requested: bool,
}

pub struct EditorEngine<C = MemoryClipboard, F = FsFiles> {
    document: Document,
    view: View,
    clipboard: C,
    files: F,
    status: Option<String>,
}

impl EditorEngine {
    /// Engine with the default configuration, an in-memory clipboard and the
    /// plain filesystem.
    pub fn new() -> Self {
        Self::with_bridges(&EngineConfig::default(), MemoryClipboard::new(), FsFiles::new())
    }
}

impl Default for EditorEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clipboard, F: FileBridge> EditorEngine<C, F> {
    pub fn with_bridges(config: &EngineConfig, clipboard: C, files: F) -> Self {
        Self {
            document: Document::new(config),
            view: View::new(config.cursor_blink_frames),
            clipboard,
            files,
            status: None,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut View {
        &mut self.view
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    pub fn clipboard_mut(&mut self) -> &mut C {
        &mut self.clipboard
    }

    pub fn files_mut(&mut self) -> &mut F {
        &mut self.files
    }

    /// Last status line produced by an action, for the host to display.
    pub fn status_message(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    /// Translates one frame of input into actions and applies them.
    ///
    /// Errors are logged and turned into a status message; they never abort
    /// the frame.
    pub fn process_frame(&mut self, frame: &InputFrame) -> FrameOutcome {
        let mut actions: Vec<EditorAction> = frame
            .pressed_keys()
            .filter_map(|key| keymap::lookup(frame.modifiers, key))
            .collect();

        if let Some(ch) = frame.pressed_char {
            if (0x20..0x7f).contains(&ch) && !frame.modifiers.ctrl && !frame.modifiers.alt {
                actions.push(EditorAction::TypeCharacter(ch));
            }
        }

        let mut outcome = FrameOutcome::default();
        for action in actions.into_iter().take(MAX_ACTIONS_PER_FRAME) {
            outcome.actions += 1;
            if action == EditorAction::Quit {
                outcome.quit_requested = true;
                continue;
            }
            if let Err(err) = self.handle_action(action) {
                warn!(?action, error = %err, "action failed");
                self.status = Some(err.to_string());
            }
        }

        if outcome.actions > 0 {
            self.view.reset_blink();
        } else {
            self.view.tick();
        }
        outcome
    }

    pub fn handle_action(&mut self, action: EditorAction) -> EngineResult<()> {
        let doc = &mut self.document;
        let result = match action {
            EditorAction::TypeCharacter(ch) => {
                doc.remove_selected_text();
                doc.add_char(ch)
            }
            EditorAction::Backspace => {
                doc.backspace();
                Ok(())
            }
            EditorAction::Delete => {
                doc.delete_forward();
                Ok(())
            }
            EditorAction::Newline => doc.newline(),
            EditorAction::MoveLeft => {
                doc.move_cursor_backward(false, false);
                Ok(())
            }
            EditorAction::MoveRight => {
                doc.move_cursor_forward(false, false);
                Ok(())
            }
            EditorAction::MoveUp => {
                doc.move_cursor_up(false);
                Ok(())
            }
            EditorAction::MoveDown => {
                doc.move_cursor_down(false);
                Ok(())
            }
            EditorAction::MoveToBeginningOfLine => {
                doc.move_cursor_to_line_start(false);
                Ok(())
            }
            EditorAction::MoveToEndOfLine => {
                doc.move_cursor_to_line_end(false);
                Ok(())
            }
            EditorAction::MoveWordLeft => {
                doc.move_cursor_backward(true, false);
                Ok(())
            }
            EditorAction::MoveWordRight => {
                doc.move_cursor_forward(true, false);
                Ok(())
            }
            EditorAction::SelectLeft => {
                doc.move_cursor_backward(false, true);
                Ok(())
            }
            EditorAction::SelectRight => {
                doc.move_cursor_forward(false, true);
                Ok(())
            }
            EditorAction::SelectUp => {
                doc.move_cursor_up(true);
                Ok(())
            }
            EditorAction::SelectDown => {
                doc.move_cursor_down(true);
                Ok(())
            }
            EditorAction::SelectWordLeft => {
                doc.move_cursor_backward(true, true);
                Ok(())
            }
            EditorAction::SelectWordRight => {
                doc.move_cursor_forward(true, true);
                Ok(())
            }
            EditorAction::SelectToBeginningOfLine => {
                doc.move_cursor_to_line_start(true);
                Ok(())
            }
            EditorAction::SelectToEndOfLine => {
                doc.move_cursor_to_line_end(true);
                Ok(())
            }
            EditorAction::SelectAll => {
                doc.highlight_entire_file();
                Ok(())
            }
            EditorAction::ClearSelection => {
                doc.clear_highlights();
                Ok(())
            }
            EditorAction::Copy => self.copy(),
            EditorAction::Cut => self.cut(),
            EditorAction::Paste => self.paste(),
            EditorAction::Open => self.open_file(),
            EditorAction::Save => self.save().map(|_| ()),
            EditorAction::SaveAs => self.save_as().map(|_| ()),
            EditorAction::Quit => Ok(()),
        };

        #[cfg(debug_assertions)]
        if let Err(violation) = self.document.check_invariants() {
            panic!("document invariant broken after {action:?}: {violation}");
        }

        result
    }

    /// Puts the selected text on the clipboard. No-op without a selection.
    pub fn copy(&mut self) -> EngineResult<()> {
        let Some(text) = self.document.highlighted_text() else {
            return Ok(());
        };
        self.clipboard.set_text(&text)?;
        debug!(bytes = text.len(), "copied selection");
        Ok(())
    }

    pub fn cut(&mut self) -> EngineResult<()> {
        if self.document.highlighted_text().is_none() {
            return Ok(());
        }
        self.copy()?;
        self.document.remove_highlighted_text();
        self.document.clear_highlights();
        Ok(())
    }

    pub fn paste(&mut self) -> EngineResult<()> {
        match self.clipboard.get_text()? {
            Some(text) => self.document.paste_text(&text),
            None => {
                self.status = Some("Clipboard is empty".to_string());
                Ok(())
            }
        }
    }

    /// Replaces the document with a file chosen through the file bridge.
    /// On any failure the document is left as it was.
    pub fn open_file(&mut self) -> EngineResult<()> {
        let path = self
            .files
            .pick_file_for_open()
            .ok_or(EngineError::NoFileSelected)?;
        let bytes = self
            .files
            .read_file(&path)
            .map_err(|source| EngineError::Read {
                path: path.clone(),
                source,
            })?;
        self.document.load_bytes(&bytes, Some(path.clone()))?;
        self.view = View::new(self.document.config().cursor_blink_frames);
        info!(path = %path.display(), lines = self.document.line_count(), "opened file");
        self.status = Some(format!("Opened {}", path.display()));
        Ok(())
    }

    /// Writes unsaved changes back to the document's file, or falls back to
    /// Save As when it has none.
    pub fn save(&mut self) -> EngineResult<SaveOutcome> {
        if !self.document.has_unsaved_changes() {
            return Ok(SaveOutcome::Unchanged);
        }
        match self.document.file_name().map(|path| path.to_path_buf()) {
            Some(path) => self.write_to(path),
            None => self.save_as(),
        }
    }

    /// Writes the whole document to a newly chosen file.
    pub fn save_as(&mut self) -> EngineResult<SaveOutcome> {
        let path = self
            .files
            .pick_file_for_save()
            .ok_or(EngineError::NoFileSelected)?;
        self.write_to(path)
    }

    fn write_to(&mut self, path: std::path::PathBuf) -> EngineResult<SaveOutcome> {
        let Some(plan) = self.document.save_plan(&path) else {
            return Ok(SaveOutcome::Unchanged);
        };
        self.files
            .write_file(&path, &plan.bytes, plan.offset, plan.overwrite)
            .map_err(|source| EngineError::Write {
                path: path.clone(),
                source,
            })?;
        info!(
            path = %path.display(),
            offset = plan.offset,
            bytes = plan.bytes.len(),
            "saved file"
        );
        self.status = Some(format!("Saved {}", path.display()));
        self.document.mark_saved(path.clone());
        Ok(SaveOutcome::Written {
            path,
            bytes: plan.bytes.len(),
        })
    }

    /// Keeps the cursor inside a `rows` x `columns` window.
    pub fn scroll_to_cursor(&mut self, rows: usize, columns: usize, padding: usize) {
        self.view
            .scroll_to_cursor(&self.document, rows, columns, padding);
    }

    /// Scrolls the view without moving the cursor (mouse wheel).
    pub fn scroll_lines(&mut self, delta: isize) {
        self.view.scroll_lines(&self.document, delta);
    }

    /// Scrolls to keep the cursor in view, then lays out the visible lines.
    pub fn render(
        &mut self,
        metrics: &impl FontMetrics,
        rows: usize,
        columns: usize,
        padding: usize,
    ) -> RenderFrame<'_> {
        self.scroll_to_cursor(rows, columns, padding);
        self.view.layout(&self.document, metrics, rows)
    }
}
