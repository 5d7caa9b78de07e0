use std::io::Stdout;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, poll, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent,
        KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use quill_core::{
    keymap, Document, EditorAction, EditorEngine, FsFiles, InputFrame, Key, Modifiers, Monospace,
    Position, RenderLine,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use tracing::{debug, info};

use crate::clipboard::SystemClipboard;
use crate::config::TuiConfig;

const SCROLL_LINES: isize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PromptKind {
    Open,
    SaveAs,
}

/// Path entry shown in the status bar.
#[derive(Debug, Clone)]
struct Prompt {
    kind: PromptKind,
    input: String,
}

impl Prompt {
    fn label(&self) -> &'static str {
        match self.kind {
            PromptKind::Open => "Open: ",
            PromptKind::SaveAs => "Save as: ",
        }
    }
}

pub struct TuiEditor {
    engine: EditorEngine<SystemClipboard, FsFiles>,
    scroll_padding: usize,
    prompt: Option<Prompt>,
    /// Set after a quit request was refused because of unsaved changes.
    quit_armed: bool,
    quit: bool,
    screen: Rect,
    text_area: Rect,
    gutter_width: u16,
}

impl TuiEditor {
    pub fn new(config: &TuiConfig, file: Option<&Path>) -> Self {
        let mut engine =
            EditorEngine::with_bridges(&config.engine, SystemClipboard::new(), FsFiles::new());

        if let Some(path) = file {
            if path.exists() {
                engine.files_mut().select_for_open(path);
                if let Err(err) = engine.open_file() {
                    engine.set_status(err.to_string());
                }
            } else {
                // New file: the first save writes it.
                engine.files_mut().select_for_save(path);
                engine.set_status(format!("New file {}", path.display()));
            }
        }

        Self {
            engine,
            scroll_padding: config.scroll_padding,
            prompt: None,
            quit_armed: false,
            quit: false,
            screen: Rect::default(),
            text_area: Rect::default(),
            gutter_width: 0,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode().context("enabling raw mode")?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.run_loop(&mut terminal);

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    fn run_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        while !self.quit {
            let size = terminal.size()?;
            self.update_layout(size);

            terminal.draw(|frame| self.render(frame))?;

            // Idle frames keep the cursor blinking.
            if !poll(Duration::from_millis(100))? {
                self.engine.process_frame(&InputFrame::default());
                continue;
            }
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(key),
                Event::Mouse(mouse) => self.handle_mouse(mouse),
                _ => {}
            }
        }
        info!("quitting");
        Ok(())
    }

    fn update_layout(&mut self, size: Rect) {
        let digits = self.engine.document().line_count().to_string().len() as u16;
        self.gutter_width = digits.max(3) + 1;
        self.text_area = Rect {
            x: size.x + self.gutter_width,
            y: size.y,
            width: size.width.saturating_sub(self.gutter_width),
            height: size.height.saturating_sub(1),
        };
        self.screen = size;
        self.engine.scroll_to_cursor(
            self.text_area.height as usize,
            self.text_area.width as usize,
            self.scroll_padding,
        );
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.prompt.is_some() {
            self.handle_prompt_key(key);
            return;
        }
        let Some(frame) = translate_key_event(key) else {
            return;
        };

        let intercepted = frame
            .pressed_keys()
            .find_map(|key| keymap::lookup(frame.modifiers, key));
        match intercepted {
            Some(EditorAction::Quit) => {
                self.request_quit();
                return;
            }
            Some(EditorAction::Open) => {
                self.start_prompt(PromptKind::Open);
                return;
            }
            Some(EditorAction::SaveAs) => {
                self.start_prompt(PromptKind::SaveAs);
                return;
            }
            Some(EditorAction::Save)
                if self.engine.document().file_name().is_none()
                    && self.engine.document().has_unsaved_changes() =>
            {
                // A path given on the command line is already queued.
                if let Err(err) = self.engine.save() {
                    debug!(error = %err, "no save target, prompting");
                    self.start_prompt(PromptKind::SaveAs);
                }
                return;
            }
            _ => {}
        }

        self.quit_armed = false;
        self.engine.process_frame(&frame);
    }

    fn request_quit(&mut self) {
        if !self.engine.document().has_unsaved_changes() || self.quit_armed {
            self.quit = true;
            return;
        }
        self.quit_armed = true;
        self.engine
            .set_status("Unsaved changes. Quit again to discard, Ctrl+S to save");
    }

    fn start_prompt(&mut self, kind: PromptKind) {
        let input = match kind {
            PromptKind::Open => String::new(),
            PromptKind::SaveAs => self
                .engine
                .document()
                .file_name()
                .map(|path| path.display().to_string())
                .unwrap_or_default(),
        };
        self.prompt = Some(Prompt { kind, input });
    }

    fn handle_prompt_key(&mut self, key: KeyEvent) {
        let Some(prompt) = self.prompt.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Esc => {
                self.prompt = None;
                self.engine.set_status("Cancelled");
            }
            KeyCode::Backspace => {
                prompt.input.pop();
            }
            KeyCode::Enter => {
                let Some(prompt) = self.prompt.take() else {
                    return;
                };
                let path = prompt.input.trim();
                if path.is_empty() {
                    self.engine.set_status("No file name given");
                    return;
                }
                let action = match prompt.kind {
                    PromptKind::Open => {
                        self.engine.files_mut().select_for_open(path);
                        EditorAction::Open
                    }
                    PromptKind::SaveAs => {
                        self.engine.files_mut().select_for_save(path);
                        EditorAction::SaveAs
                    }
                };
                if let Err(err) = self.engine.handle_action(action) {
                    self.engine.set_status(err.to_string());
                }
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                prompt.input.push(c);
            }
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollUp => self.engine.scroll_lines(-SCROLL_LINES),
            MouseEventKind::ScrollDown => self.engine.scroll_lines(SCROLL_LINES),
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(position) = self.screen_to_document(mouse.column, mouse.row) {
                    self.engine.document_mut().set_cursor(position);
                    self.engine.view_mut().reset_blink();
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(position) = self.screen_to_document(mouse.column, mouse.row) {
                    self.engine.document_mut().extend_highlight_to(position);
                    self.engine.view_mut().reset_blink();
                }
            }
            _ => {}
        }
    }

    /// Converts screen coordinates to a document position, or `None` when
    /// the click falls outside the text area.
    fn screen_to_document(&self, column: u16, row: u16) -> Option<Position> {
        let area = self.text_area;
        if column < area.x || column >= area.x + area.width {
            return None;
        }
        if row < area.y || row >= area.y + area.height {
            return None;
        }
        let view = self.engine.view();
        Some(Position::new(
            (row - area.y) as usize + view.top_line,
            (column - area.x) as usize + view.left_column,
        ))
    }

    fn render(&self, frame: &mut Frame) {
        let document = self.engine.document();
        let view = self.engine.view();
        let area = self.text_area;
        let layout = view.layout(document, &Monospace::TERMINAL, area.height as usize);

        let gutter_style = Style::default().fg(Color::DarkGray);
        let highlight_style = Style::default().bg(Color::DarkGray);
        let cursor_style = Style::default().add_modifier(Modifier::REVERSED);

        let mut lines: Vec<Line> = Vec::with_capacity(layout.lines.len());
        for (row, line) in layout.lines.iter().enumerate() {
            let cursor_column = layout
                .cursor
                .filter(|cursor| cursor.visible && cursor.row == row)
                .map(|cursor| cursor.column);
            let mut spans = vec![Span::styled(
                format!("{:>width$} ", line.number, width = self.gutter_width as usize - 1),
                gutter_style,
            )];
            spans.extend(line_spans(
                line,
                area.width as usize,
                cursor_column,
                highlight_style,
                cursor_style,
            ));
            lines.push(Line::from(spans));
        }

        let screen = self.screen;
        frame.render_widget(
            Paragraph::new(lines),
            Rect {
                height: area.height,
                ..screen
            },
        );
        if screen.height == 0 {
            return;
        }

        let status_area = Rect {
            y: screen.y + screen.height - 1,
            height: 1,
            ..screen
        };
        frame.render_widget(
            Paragraph::new(self.status_line(document))
                .style(Style::default().add_modifier(Modifier::REVERSED)),
            status_area,
        );
    }

    fn status_line(&self, document: &Document) -> String {
        if let Some(prompt) = &self.prompt {
            return format!("{}{}", prompt.label(), prompt.input);
        }
        let name = document
            .file_name()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "[No Name]".to_string());
        let dirty = if document.has_unsaved_changes() { " *" } else { "" };
        let cursor = document.cursor();
        let mut status = format!(
            " {name}{dirty}  Ln {}, Col {}",
            cursor.line + 1,
            cursor.column + 1
        );
        if let Some(message) = self.engine.status_message() {
            status.push_str("  ");
            status.push_str(message);
        }
        status
    }
}

/// Builds styled runs for one visible line: plain text, highlighted text,
/// and the cursor cell.
fn line_spans(
    line: &RenderLine<'_>,
    width: usize,
    cursor_column: Option<usize>,
    highlight_style: Style,
    cursor_style: Style,
) -> Vec<Span<'static>> {
    let (hl_start, hl_end) = match line.highlight {
        // A selection running past the line end covers one extra cell.
        Some(span) => (
            span.start_column,
            span.end_column + usize::from(span.continues),
        ),
        None => (0, 0),
    };
    let cells = line
        .text
        .len()
        .max(hl_end)
        .max(cursor_column.map_or(0, |column| column + 1))
        .min(width);

    let mut spans = Vec::new();
    let mut run = String::new();
    let mut run_style = Style::default();
    for column in 0..cells {
        let ch = match line.text.get(column) {
            Some(&byte) if (0x20..0x7f).contains(&byte) => byte as char,
            Some(_) => '?',
            None => ' ',
        };
        let style = if cursor_column == Some(column) {
            cursor_style
        } else if (hl_start..hl_end).contains(&column) {
            highlight_style
        } else {
            Style::default()
        };
        if style != run_style && !run.is_empty() {
            spans.push(Span::styled(std::mem::take(&mut run), run_style));
        }
        run_style = style;
        run.push(ch);
    }
    if !run.is_empty() {
        spans.push(Span::styled(run, run_style));
    }
    spans
}

fn translate_modifiers(modifiers: KeyModifiers) -> Modifiers {
    Modifiers::new(
        modifiers.contains(KeyModifiers::SHIFT),
        modifiers.contains(KeyModifiers::CONTROL),
        modifiers.contains(KeyModifiers::ALT),
    )
}

/// Turns one crossterm key press into an input frame. Returns `None` for
/// keys the engine has no use for.
fn translate_key_event(event: KeyEvent) -> Option<InputFrame> {
    let modifiers = translate_modifiers(event.modifiers);
    let key = match event.code {
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Enter => Key::Enter,
        KeyCode::Tab => Key::Tab,
        KeyCode::Esc => Key::Escape,
        KeyCode::Char(c) if modifiers.ctrl || modifiers.alt => {
            // Terminals report Ctrl+Shift+S as an uppercase letter.
            let modifiers = Modifiers {
                shift: modifiers.shift || c.is_ascii_uppercase(),
                ..modifiers
            };
            return Key::from_letter(c).map(|key| InputFrame::key_press(key, modifiers));
        }
        KeyCode::Char(c) if c.is_ascii() => {
            let mut frame = InputFrame::new(modifiers);
            frame.pressed_char = Some(c as u8);
            return Some(frame);
        }
        _ => return None,
    };
    Some(InputFrame::key_press(key, modifiers))
}
