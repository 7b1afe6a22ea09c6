use crossterm::event::{Event, KeyCode};
use ratatui::{
    layout::Constraint,
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use crate::{
    app::Message,
    config::Config,
    utils::{center, centered_padding},
};

/// Page: Error
///
/// Displays an error with a single retry action. Retrying resets the flow to
/// the beginning: data is re-requested and round counters start from zero.
pub struct Error {
    message: String,
}

impl Error {
    pub const fn new(message: String) -> Self {
        Self { message }
    }
}

// Rendering logic
impl Error {
    pub fn render(
        &mut self,
        frame: &mut ratatui::Frame,
        area: ratatui::prelude::Rect,
        config: &Config,
    ) {
        let theme = &config.settings.theme.text;
        let area = center(area, Constraint::Percentage(80), Constraint::Percentage(80));

        let lines = vec![
            Line::from(vec![
                Span::styled("Error: ", Style::new().bold().fg(theme.error)),
                Span::raw(self.message.as_str()),
            ]),
            Line::raw(""),
            Line::styled("Press <Enter> to try again", Style::new().fg(theme.highlight)),
        ];

        let text = Paragraph::new(lines)
            .centered()
            .block(Block::new().padding(centered_padding(area, Some(3), None)));

        frame.render_widget(text, area);
    }

    pub fn render_top(&mut self, _config: &Config) -> Option<Line<'_>> {
        Some(Line::raw("ERROR"))
    }

    pub fn handle_events(&mut self, event: &Event, _config: &Config) -> Option<Message> {
        if let Event::Key(key) = event
            && key.is_press()
            && key.code == KeyCode::Enter
        {
            return Some(Message::Reset);
        }

        None
    }
}

impl From<Box<dyn std::error::Error + Send>> for Error {
    fn from(value: Box<dyn std::error::Error + Send>) -> Self {
        Self::new(value.to_string())
    }
}
