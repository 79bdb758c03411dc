//! TUI implementation for avia

use std::time::Instant;

use crossterm::event::{Event, EventStream, MouseEventKind};
use futures::StreamExt;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
};
use tokio::sync::mpsc;

use avia_chat::{ChatEvent, ChatSession, Message, Sender};
use avia_tui::{
    Theme,
    input::Action,
    widgets::{ChatLine, InputBox, MessageList, Role, Spinner, message_list},
};

/// Messages sent from input handling to the driver loop
#[derive(Debug)]
enum UiMessage {
    /// User submitted input
    Submit(String),
    /// User requested quit
    Quit,
}

/// TUI application state
struct TuiState {
    /// Rendered transcript
    entries: Vec<ChatLine>,
    /// Input box
    input: InputBox,
    /// Current scroll position
    scroll: usize,
    /// Whether a reply is outstanding
    is_waiting: bool,
    /// Status line text
    status: String,
    /// Theme
    theme: Theme,
    /// Channel into the driver loop
    ui_tx: mpsc::Sender<UiMessage>,
    /// Spinner start time for animation
    spinner_start: Instant,
}

impl TuiState {
    fn new(ui_tx: mpsc::Sender<UiMessage>) -> Self {
        let mut input =
            InputBox::new().with_placeholder("Ask about flights, airlines, or airports...");
        input.set_focused(true);

        Self {
            entries: vec![],
            input,
            scroll: 0,
            is_waiting: false,
            status: "Ready".to_string(),
            theme: Theme::dark(),
            ui_tx,
            spinner_start: Instant::now(),
        }
    }

    fn push_message(&mut self, message: &Message) {
        let role = match message.sender {
            Sender::User => Role::User,
            Sender::Bot => Role::Bot,
        };
        let mut entry = ChatLine {
            role,
            text: message.text.clone(),
            time: None,
        };
        if let Some(time) = clock_time(message.timestamp) {
            entry = entry.with_time(time);
        }
        self.entries.push(entry);
        self.scroll_to_bottom();
    }

    /// Handle session events
    fn handle_chat_event(&mut self, event: ChatEvent) {
        match event {
            ChatEvent::MessageAppended { message } => {
                self.push_message(&message);
            }
            ChatEvent::ExchangeStart => {
                self.is_waiting = true;
                self.spinner_start = Instant::now();
                self.status = "Waiting for the assistant...".to_string();
            }
            ChatEvent::ExchangeEnd => {
                self.is_waiting = false;
                self.status = "Ready".to_string();
            }
        }
    }

    fn scroll_to_bottom(&mut self) {
        // Resolved against the content height during render
        self.scroll = usize::MAX;
    }

    /// Handle keyboard action, returns false to quit
    async fn handle_action(&mut self, action: Action, width: u16) -> bool {
        match action {
            Action::Submit => {
                let content = self.input.content().trim().to_string();
                // The session guard is authoritative; this just avoids
                // clearing the input for a submission that would be dropped.
                if !content.is_empty() && !self.is_waiting {
                    self.input.clear();
                    let _ = self.ui_tx.send(UiMessage::Submit(content)).await;
                }
                true
            }
            Action::Interrupt | Action::Eof | Action::Quit => {
                let _ = self.ui_tx.send(UiMessage::Quit).await;
                false
            }
            Action::Up => {
                self.scroll = self.scroll.saturating_sub(1);
                true
            }
            Action::Down => {
                self.scroll = self.scroll.saturating_add(1);
                true
            }
            Action::PageUp => {
                self.scroll = self.scroll.saturating_sub(10);
                true
            }
            Action::PageDown => {
                self.scroll = self.scroll.saturating_add(10);
                true
            }
            _ => {
                self.input.handle_action(&action, width);
                true
            }
        }
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Layout: transcript (flex), status bar (1), input (3)
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),
                Constraint::Length(1),
                Constraint::Length(3),
            ])
            .split(size);

        self.render_transcript(frame, chunks[0]);
        self.render_status(frame, chunks[1]);
        self.input
            .render(chunks[2], frame.buffer_mut(), &self.theme);
    }

    fn render_transcript(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style())
            .title(" avia │ aviation assistant ");

        let inner = block.inner(area);
        frame.render_widget(block, area);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let content_height =
            message_list::transcript_height(&self.entries, inner.width as usize, self.is_waiting);

        // Clamp; also resolves the scroll-to-bottom sentinel
        self.scroll = self
            .scroll
            .min(content_height.saturating_sub(inner.height as usize));

        let list = MessageList::new(&self.entries, &self.theme)
            .scroll(self.scroll)
            .awaiting(self.is_waiting);
        frame.render_widget(list, inner);

        if content_height > inner.height as usize {
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("↑"))
                .end_symbol(Some("↓"))
                .track_symbol(Some("│"))
                .thumb_symbol("█");

            let mut scrollbar_state = ScrollbarState::new(content_height)
                .position(self.scroll)
                .viewport_content_length(inner.height as usize);

            frame.render_stateful_widget(scrollbar, inner, &mut scrollbar_state);
        }
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        if self.is_waiting {
            let spinner =
                Spinner::new(&self.status, &self.theme).with_start_time(self.spinner_start);
            frame.render_widget(spinner, area);
            return;
        }

        let left_content = self.status.as_str();
        let right_content = "Enter: send │ PgUp/Dn: scroll │ Ctrl+C: quit";

        let left_width = left_content.chars().count();
        let right_width = right_content.chars().count();
        let available = area.width as usize;

        let line = if left_width + right_width + 2 <= available {
            let spacing = available - left_width - right_width;
            Line::from(vec![
                Span::styled(left_content, self.theme.dim_style()),
                Span::raw(" ".repeat(spacing)),
                Span::styled(right_content, self.theme.dim_style()),
            ])
        } else {
            Line::from(Span::styled(left_content, self.theme.dim_style()))
        };

        frame.render_widget(Paragraph::new(line), area);
    }
}

/// Clock time (HH:MM, local) for a message timestamp
fn clock_time(timestamp_millis: i64) -> Option<String> {
    chrono::DateTime::from_timestamp_millis(timestamp_millis)
        .map(|utc| chrono::DateTime::<chrono::Local>::from(utc).format("%H:%M").to_string())
}

/// Run the TUI application
pub async fn run_tui(session: ChatSession) -> anyhow::Result<()> {
    use crossterm::{
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    };
    use ratatui::{Terminal, backend::CrosstermBackend};
    use std::io;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (ui_tx, mut ui_rx) = mpsc::channel::<UiMessage>(32);
    let mut state = TuiState::new(ui_tx);

    // Seed the view from the transcript so the welcome message shows
    for message in session.messages() {
        state.push_message(&message);
    }

    let mut chat_rx = session.subscribe();
    let mut event_stream = EventStream::new();

    // Tick interval for spinner animation
    let mut tick_interval = tokio::time::interval(std::time::Duration::from_millis(80));

    let result = loop {
        terminal.draw(|frame| state.render(frame))?;
        let area_width = terminal.size()?.width;

        tokio::select! {
            biased;

            // Session events first so appends render before more input
            event = chat_rx.recv() => {
                if let Ok(chat_event) = event {
                    state.handle_chat_event(chat_event);
                }
            }

            // Terminal events (keyboard input)
            event = event_stream.next() => {
                match event {
                    Some(Ok(Event::Key(key))) => {
                        let action = avia_tui::input::key_to_action(key);
                        if !state.handle_action(action, area_width).await {
                            break Ok(());
                        }
                    }
                    Some(Ok(Event::Paste(text))) => {
                        state.handle_action(Action::Paste(text), area_width).await;
                    }
                    Some(Ok(Event::Mouse(mouse))) => {
                        match mouse.kind {
                            MouseEventKind::ScrollUp => {
                                state.scroll = state.scroll.saturating_sub(3);
                            }
                            MouseEventKind::ScrollDown => {
                                state.scroll = state.scroll.saturating_add(3);
                            }
                            _ => {}
                        }
                    }
                    Some(Ok(Event::Resize(_, _))) => {}
                    Some(Err(e)) => {
                        break Err(anyhow::anyhow!("Event error: {}", e));
                    }
                    None => {
                        break Ok(());
                    }
                    _ => {}
                }
            }

            // Tick for spinner animation
            _ = tick_interval.tick() => {}

            // UI messages (submit, quit)
            msg = ui_rx.recv() => {
                match msg {
                    Some(UiMessage::Submit(content)) => {
                        // Run the exchange off the render loop; the session
                        // guard serializes requests.
                        let in_flight = session.clone();
                        tokio::spawn(async move {
                            in_flight.submit(&content).await;
                        });
                    }
                    Some(UiMessage::Quit) | None => {
                        break Ok(());
                    }
                }
            }
        }
    };

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}
