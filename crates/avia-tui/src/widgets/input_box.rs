//! Single-line text input widget

use crate::input::Action;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthChar;

/// Single-line text input with cursor editing and horizontal scroll.
#[derive(Debug, Default)]
pub struct InputBox {
    /// Current input text
    content: String,
    /// Cursor position in characters (not bytes)
    cursor: usize,
    /// Horizontal scroll offset in display columns
    scroll: usize,
    /// Placeholder text shown while empty
    placeholder: String,
    /// Whether the input is focused
    focused: bool,
}

impl InputBox {
    /// Create a new input box
    pub fn new() -> Self {
        Self::default()
    }

    /// Set placeholder text
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Set focus state
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Get the current content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Clear the content
    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
        self.scroll = 0;
    }

    /// Byte offset of the given character index
    fn byte_at(&self, char_idx: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.content.len())
    }

    fn remove_chars(&mut self, from: usize, to: usize) {
        let start = self.byte_at(from);
        let end = self.byte_at(to);
        self.content.drain(start..end);
    }

    fn insert(&mut self, c: char) {
        let at = self.byte_at(self.cursor);
        self.content.insert(at, c);
        self.cursor += 1;
    }

    /// Display columns occupied by the text before the cursor
    fn columns_before_cursor(&self) -> usize {
        self.content
            .chars()
            .take(self.cursor)
            .map(|c| c.width().unwrap_or(0))
            .sum()
    }

    /// Handle an input action; returns whether the action was consumed
    pub fn handle_action(&mut self, action: &Action, width: u16) -> bool {
        let char_count = self.content.chars().count();

        let handled = match action {
            Action::Char(c) => {
                self.insert(*c);
                true
            }
            Action::Backspace => {
                if self.cursor > 0 {
                    self.remove_chars(self.cursor - 1, self.cursor);
                    self.cursor -= 1;
                    true
                } else {
                    false
                }
            }
            Action::Delete => {
                if self.cursor < char_count {
                    self.remove_chars(self.cursor, self.cursor + 1);
                    true
                } else {
                    false
                }
            }
            Action::Left => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    true
                } else {
                    false
                }
            }
            Action::Right => {
                if self.cursor < char_count {
                    self.cursor += 1;
                    true
                } else {
                    false
                }
            }
            Action::Home => {
                self.cursor = 0;
                true
            }
            Action::End => {
                self.cursor = char_count;
                true
            }
            Action::ClearLine => {
                self.clear();
                true
            }
            Action::DeleteWord => {
                let chars: Vec<char> = self.content.chars().collect();
                let mut target = self.cursor;
                while target > 0 && chars[target - 1] == ' ' {
                    target -= 1;
                }
                while target > 0 && chars[target - 1] != ' ' {
                    target -= 1;
                }
                self.remove_chars(target, self.cursor);
                self.cursor = target;
                true
            }
            Action::Paste(text) => {
                // Single-line input: newlines become spaces
                for c in text.chars() {
                    self.insert(if c == '\n' || c == '\r' { ' ' } else { c });
                }
                true
            }
            _ => false,
        };

        if handled {
            self.follow_cursor(width as usize);
        }
        handled
    }

    /// Keep the cursor inside the visible window
    fn follow_cursor(&mut self, width: usize) {
        let visible = width.saturating_sub(4);
        let col = self.columns_before_cursor();

        if col < self.scroll {
            self.scroll = col;
        } else if visible > 0 && col >= self.scroll + visible {
            self.scroll = col - visible + 1;
        }
    }

    /// Render the input box
    pub fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(if self.focused {
                theme.accent_style()
            } else {
                theme.border_style()
            });

        let inner = block.inner(area);
        block.render(area, buf);

        let (display_text, style) = if self.content.is_empty() {
            (self.placeholder.clone(), theme.dim_style())
        } else {
            (self.visible_slice(inner.width as usize), theme.base_style())
        };

        Paragraph::new(display_text).style(style).render(inner, buf);

        // Cursor cell
        if self.focused && inner.width > 0 {
            let cursor_x = self.columns_before_cursor().saturating_sub(self.scroll);
            if cursor_x < inner.width as usize {
                let x = inner.x + cursor_x as u16;
                if let Some(cell) = buf.cell_mut((x, inner.y)) {
                    cell.set_style(Style::default().bg(theme.accent));
                }
            }
        }
    }

    /// The portion of the content visible after horizontal scrolling
    fn visible_slice(&self, width: usize) -> String {
        let mut skipped = 0;
        let mut used = 0;
        let mut visible = String::new();

        for c in self.content.chars() {
            let w = c.width().unwrap_or(0);
            if skipped < self.scroll {
                skipped += w;
                continue;
            }
            if used + w > width {
                break;
            }
            visible.push(c);
            used += w;
        }
        visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(input: &mut InputBox, text: &str) {
        for c in text.chars() {
            input.handle_action(&Action::Char(c), 80);
        }
    }

    #[test]
    fn test_typing_and_clearing() {
        let mut input = InputBox::new();
        type_str(&mut input, "flight AB123");
        assert_eq!(input.content(), "flight AB123");

        input.handle_action(&Action::ClearLine, 80);
        assert_eq!(input.content(), "");
    }

    #[test]
    fn test_backspace_mid_string() {
        let mut input = InputBox::new();
        type_str(&mut input, "abc");
        input.handle_action(&Action::Left, 80);
        input.handle_action(&Action::Backspace, 80);
        assert_eq!(input.content(), "ac");
    }

    #[test]
    fn test_delete_at_cursor() {
        let mut input = InputBox::new();
        type_str(&mut input, "abc");
        input.handle_action(&Action::Home, 80);
        input.handle_action(&Action::Delete, 80);
        assert_eq!(input.content(), "bc");
    }

    #[test]
    fn test_delete_word() {
        let mut input = InputBox::new();
        type_str(&mut input, "status of AB123");
        input.handle_action(&Action::DeleteWord, 80);
        assert_eq!(input.content(), "status of ");

        input.handle_action(&Action::DeleteWord, 80);
        assert_eq!(input.content(), "status ");
    }

    #[test]
    fn test_paste_flattens_newlines() {
        let mut input = InputBox::new();
        input.handle_action(&Action::Paste("line one\nline two".to_string()), 80);
        assert_eq!(input.content(), "line one line two");
    }

    #[test]
    fn test_unicode_editing() {
        let mut input = InputBox::new();
        type_str(&mut input, "héllo ✈");
        input.handle_action(&Action::Backspace, 80);
        assert_eq!(input.content(), "héllo ");

        input.handle_action(&Action::Home, 80);
        input.handle_action(&Action::Right, 80);
        input.handle_action(&Action::Backspace, 80);
        assert_eq!(input.content(), "éllo ");
    }

    #[test]
    fn test_backspace_at_start_is_noop() {
        let mut input = InputBox::new();
        type_str(&mut input, "x");
        input.handle_action(&Action::Home, 80);
        assert!(!input.handle_action(&Action::Backspace, 80));
        assert_eq!(input.content(), "x");
    }
}
