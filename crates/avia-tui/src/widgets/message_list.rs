//! Message list widget for the conversation transcript

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

/// Role of a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Bot,
}

/// One entry in the rendered transcript.
#[derive(Debug, Clone)]
pub struct ChatLine {
    pub role: Role,
    pub text: String,
    /// Preformatted clock time (e.g. "14:32") shown next to the header
    pub time: Option<String>,
}

impl ChatLine {
    /// Create a user entry
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            time: None,
        }
    }

    /// Create a bot entry
    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            role: Role::Bot,
            text: text.into(),
            time: None,
        }
    }

    /// Attach a clock time to the header
    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }
}

const THINKING_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Pick an animation frame from the wall clock, so each redraw advances it.
fn thinking_frame() -> &'static str {
    let millis = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    THINKING_FRAMES[(millis / 80) as usize % THINKING_FRAMES.len()]
}

/// Widget for the scrollable transcript.
pub struct MessageList<'a> {
    entries: &'a [ChatLine],
    theme: &'a Theme,
    scroll: usize,
    awaiting: bool,
}

impl<'a> MessageList<'a> {
    /// Create a new message list
    pub fn new(entries: &'a [ChatLine], theme: &'a Theme) -> Self {
        Self {
            entries,
            theme,
            scroll: 0,
            awaiting: false,
        }
    }

    /// Set scroll offset
    pub fn scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll;
        self
    }

    /// Show the thinking indicator under the last entry
    pub fn awaiting(mut self, awaiting: bool) -> Self {
        self.awaiting = awaiting;
        self
    }

    fn entry_lines(&self, entry: &ChatLine, width: usize) -> Vec<Line<'static>> {
        let (label, style, prefix) = match entry.role {
            Role::User => ("You", self.theme.accent_bold(), "▶ "),
            Role::Bot => (
                "Assistant",
                self.theme.success_style().add_modifier(Modifier::BOLD),
                "◀ ",
            ),
        };

        let mut header = vec![Span::styled(format!("{prefix}{label}"), style)];
        if let Some(ref time) = entry.time {
            header.push(Span::styled(format!("  {time}"), self.theme.dim_style()));
        }

        let mut lines = vec![Line::from(header)];
        for wrapped in textwrap::wrap(&entry.text, content_width(width)) {
            lines.push(Line::from(Span::styled(
                format!("  {wrapped}"),
                self.theme.base_style(),
            )));
        }

        // Blank separator between entries
        lines.push(Line::from(""));
        lines
    }

    fn indicator_line(&self) -> Line<'static> {
        Line::from(Span::styled(
            format!("{} Assistant is thinking...", thinking_frame()),
            self.theme.accent_style(),
        ))
    }
}

impl Widget for MessageList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let width = area.width as usize;
        let mut all_lines: Vec<Line> = Vec::new();
        for entry in self.entries {
            all_lines.extend(self.entry_lines(entry, width));
        }
        if self.awaiting {
            all_lines.push(self.indicator_line());
        }

        let visible: Vec<Line> = all_lines
            .into_iter()
            .skip(self.scroll)
            .take(area.height as usize)
            .collect();

        Paragraph::new(visible)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}

fn content_width(width: usize) -> usize {
    width.saturating_sub(2).max(1)
}

/// Total rendered height of the transcript; must track the layout produced
/// by `MessageList::render` for scroll math to land on the last line.
pub fn transcript_height(entries: &[ChatLine], width: usize, awaiting: bool) -> usize {
    let content_width = content_width(width);
    let mut total = 0;
    for entry in entries {
        // Header + wrapped content + separator
        total += 1 + textwrap::wrap(&entry.text, content_width).len() + 1;
    }
    if awaiting {
        total += 1;
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_height_counts_header_content_separator() {
        let entries = vec![ChatLine::user("short"), ChatLine::bot("also short")];
        // Each entry: 1 header + 1 content + 1 separator
        assert_eq!(transcript_height(&entries, 80, false), 6);
    }

    #[test]
    fn test_height_accounts_for_wrapping() {
        let entries = vec![ChatLine::bot("word ".repeat(40))];
        let narrow = transcript_height(&entries, 20, false);
        let wide = transcript_height(&entries, 200, false);
        assert!(narrow > wide, "narrow={narrow} wide={wide}");
    }

    #[test]
    fn test_height_includes_thinking_indicator() {
        let entries = vec![ChatLine::user("hi")];
        assert_eq!(
            transcript_height(&entries, 80, true),
            transcript_height(&entries, 80, false) + 1
        );
    }

    #[test]
    fn test_height_survives_tiny_width() {
        let entries = vec![ChatLine::user("anything at all")];
        // Must not panic or return zero content lines
        assert!(transcript_height(&entries, 0, false) >= 3);
    }
}
