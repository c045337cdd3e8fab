use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result};
use log::info;
use marginalia_engine::{
    AnnotationField, AnnotationOpener, Cmd, DecorationSet, Document, EditorMode, ScanOptions,
    Selection, Span, ViewState, ViewUpdate,
};

use crate::preview::{self, Hit, Segment};

/// Editor state for one open file.
pub struct App {
    path: Option<PathBuf>,
    document: Document,
    anchor: usize,
    head: usize,
    mode: EditorMode,
    /// First line on screen.
    top: usize,
    /// Number of text rows on screen.
    height: usize,
    field: AnnotationField,
    opened: Rc<Cell<Option<u32>>>,
    status: String,
    dirty: bool,
}

impl App {
    pub fn new(
        path: Option<PathBuf>,
        document: Document,
        options: ScanOptions,
        mode: EditorMode,
        height: usize,
    ) -> Self {
        let opened = Rc::new(Cell::new(None));
        let sink = Rc::clone(&opened);
        let opener: Rc<dyn AnnotationOpener> = Rc::new(move |index: u32| {
            info!("opening annotation {index}");
            sink.set(Some(index));
        });

        let mut app = Self {
            path,
            document,
            anchor: 0,
            head: 0,
            mode,
            top: 0,
            height,
            field: AnnotationField::new(options, Some(opener)),
            opened,
            status: String::new(),
            dirty: false,
        };
        app.refresh(ViewUpdate::DOC | ViewUpdate::VIEWPORT | ViewUpdate::SELECTION);
        app
    }

    #[cfg(test)]
    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn set_status(&mut self, status: String) {
        self.status = status;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn title(&self) -> String {
        let name = self
            .path
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "scratch".to_string());
        let mode = match self.mode() {
            EditorMode::LivePreview => "live",
            EditorMode::Source => "source",
        };
        let dirty = if self.is_dirty() { " *" } else { "" };
        format!(" {name}{dirty} [{mode}] ")
    }

    pub fn decorations(&self) -> &DecorationSet {
        self.field.decorations()
    }

    pub fn selection(&self) -> Selection {
        Selection::single(self.anchor, self.head)
    }

    #[cfg(test)]
    pub fn caret(&self) -> usize {
        self.head
    }

    pub fn resize(&mut self, height: usize) {
        if height == self.height {
            return;
        }
        self.height = height;
        self.scroll_to_caret();
        self.refresh(ViewUpdate::VIEWPORT);
    }

    /// Rendered segments for each line on screen, top to bottom.
    pub fn visible_lines(&self) -> Vec<Vec<Segment>> {
        let selection = self.selection();
        let lines = preview::line_spans(&self.document);
        lines
            .iter()
            .skip(self.top)
            .take(self.height)
            .map(|&line| {
                let text = self.document.slice(line);
                preview::render_line(&text, line.start, self.decorations(), &selection)
            })
            .collect()
    }

    /// Caret position relative to the text area, if it is on screen.
    pub fn caret_cell(&self) -> Option<(usize, usize)> {
        let lines = preview::line_spans(&self.document);
        let row = preview::line_of(&lines, self.head);
        if row < self.top || row >= self.top + self.height {
            return None;
        }
        let line = lines[row];
        let text = self.document.slice(line);
        let segments =
            preview::render_line(&text, line.start, self.decorations(), &self.selection());
        Some((preview::caret_column(&segments, self.head), row - self.top))
    }

    pub fn move_left(&mut self, extend: bool) {
        let to = self.document.prev_char(self.head);
        self.move_caret(to, extend);
    }

    pub fn move_right(&mut self, extend: bool) {
        let to = self.document.next_char(self.head);
        self.move_caret(to, extend);
    }

    pub fn move_up(&mut self, extend: bool) {
        self.move_vertically(-1, extend);
    }

    pub fn move_down(&mut self, extend: bool) {
        self.move_vertically(1, extend);
    }

    pub fn move_home(&mut self, extend: bool) {
        let lines = preview::line_spans(&self.document);
        let line = lines[preview::line_of(&lines, self.head)];
        self.move_caret(line.start, extend);
    }

    pub fn move_end(&mut self, extend: bool) {
        let lines = preview::line_spans(&self.document);
        let line = lines[preview::line_of(&lines, self.head)];
        self.move_caret(line.end, extend);
    }

    fn move_vertically(&mut self, delta: isize, extend: bool) {
        let lines = preview::line_spans(&self.document);
        let row = preview::line_of(&lines, self.head);
        let Some(target) = row.checked_add_signed(delta).filter(|r| *r < lines.len()) else {
            return;
        };

        let current = lines[row];
        let column = self
            .document
            .slice(Span::new(current.start, self.head.min(current.end)))
            .chars()
            .count();
        let line = lines[target];
        let bytes: usize = self
            .document
            .slice(line)
            .chars()
            .take(column)
            .map(char::len_utf8)
            .sum();
        self.move_caret(line.start + bytes, extend);
    }

    fn move_caret(&mut self, to: usize, extend: bool) {
        self.head = to.min(self.document.len());
        if !extend {
            self.anchor = self.head;
        }
        self.status.clear();
        let scrolled = self.scroll_to_caret();
        let update = if scrolled {
            ViewUpdate::SELECTION | ViewUpdate::VIEWPORT
        } else {
            ViewUpdate::SELECTION
        };
        self.refresh(update);
    }

    /// Replaces the selection with `text`, or inserts it at the caret.
    pub fn insert(&mut self, text: &str) {
        let selection = self.selection().main();
        let cmd = if selection.is_empty() {
            Cmd::InsertText {
                at: self.head,
                text: text.to_string(),
            }
        } else {
            Cmd::ReplaceRange {
                range: selection.range(),
                text: text.to_string(),
            }
        };
        self.edit(cmd, selection.start + text.len());
    }

    pub fn backspace(&mut self) {
        let selection = self.selection().main();
        if selection.is_empty() {
            if self.head == 0 {
                return;
            }
            let start = self.document.prev_char(self.head);
            self.edit(
                Cmd::DeleteRange {
                    range: start..self.head,
                },
                start,
            );
        } else {
            self.edit(
                Cmd::DeleteRange {
                    range: selection.range(),
                },
                selection.start,
            );
        }
    }

    pub fn delete(&mut self) {
        let selection = self.selection().main();
        if selection.is_empty() {
            let end = self.document.next_char(self.head);
            if end == self.head {
                return;
            }
            self.edit(
                Cmd::DeleteRange {
                    range: self.head..end,
                },
                self.head,
            );
        } else {
            self.edit(
                Cmd::DeleteRange {
                    range: selection.range(),
                },
                selection.start,
            );
        }
    }

    fn edit(&mut self, cmd: Cmd, caret: usize) {
        match self.document.apply(cmd) {
            Ok(_) => {
                self.head = caret;
                self.anchor = caret;
                self.dirty = true;
                self.status.clear();
                self.scroll_to_caret();
                self.refresh(ViewUpdate::DOC | ViewUpdate::VIEWPORT | ViewUpdate::SELECTION);
            }
            Err(e) => self.status = format!("Edit rejected: {e}"),
        }
    }

    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            EditorMode::LivePreview => EditorMode::Source,
            EditorMode::Source => EditorMode::LivePreview,
        };
        self.refresh(ViewUpdate::MODE);
    }

    /// Enter: opens the first widget at or after the caret on its line, or
    /// breaks the line when there is none.
    pub fn enter(&mut self) {
        let lines = preview::line_spans(&self.document);
        let line = lines[preview::line_of(&lines, self.head)];
        match preview::widget_after(self.decorations(), self.head, line.end) {
            Some(span) => self.activate(span),
            None => self.insert("\n"),
        }
    }

    /// A left click at `column` of text row `row`.
    pub fn click(&mut self, row: usize, column: usize) {
        let lines = preview::line_spans(&self.document);
        let Some(&line) = lines.get(self.top + row) else {
            let end = self.document.len();
            self.move_caret(end, false);
            return;
        };
        let hit = {
            let text = self.document.slice(line);
            let segments =
                preview::render_line(&text, line.start, self.decorations(), &self.selection());
            preview::hit_test(&segments, column, line.end)
        };
        match hit {
            Hit::Widget(span) => self.activate(span),
            Hit::Offset(offset) => self.move_caret(offset, false),
        }
    }

    fn activate(&mut self, span: Span) {
        let Some((_, widget)) = self.field.decorations().widget_at(span.start) else {
            return;
        };
        self.opened.set(None);
        self.status = if widget.activate() {
            match self.opened.get() {
                Some(index) => format!("Annotation {index}"),
                None => String::new(),
            }
        } else {
            format!("Marker on \"{}\" has no annotation index", widget.anchor_text())
        };
    }

    pub fn save(&mut self) -> Result<()> {
        let Some(path) = &self.path else {
            self.status = "No file to save to".to_string();
            return Ok(());
        };
        std::fs::write(path, self.document.to_bytes())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        self.dirty = false;
        self.status = format!("Saved {}", path.display());
        Ok(())
    }

    fn scroll_to_caret(&mut self) -> bool {
        let lines = preview::line_spans(&self.document);
        let row = preview::line_of(&lines, self.head);
        let before = self.top;
        if row < self.top {
            self.top = row;
        } else if self.height > 0 && row >= self.top + self.height {
            self.top = row + 1 - self.height;
        }
        self.top = self.top.min(lines.len().saturating_sub(1));
        before != self.top
    }

    fn visible_ranges(&self) -> Vec<Span> {
        let lines = preview::line_spans(&self.document);
        let on_screen: Vec<Span> = lines
            .iter()
            .skip(self.top)
            .take(self.height)
            .copied()
            .collect();
        match (on_screen.first(), on_screen.last()) {
            (Some(first), Some(last)) => vec![Span::new(first.start, last.end)],
            _ => Vec::new(),
        }
    }

    fn refresh(&mut self, update: ViewUpdate) {
        let selection = self.selection();
        let visible = self.visible_ranges();
        let view = ViewState {
            document: Some(&self.document),
            visible_ranges: &visible,
            selection: Some(&selection),
            mode: self.mode,
        };
        self.field.update(&view, update);
    }
}
