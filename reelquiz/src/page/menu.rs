use crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::{
    layout::Constraint,
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, List},
};

use super::{Message, loadscreen::Loading, session::Session};
use crate::{
    config::Config,
    utils::{center, centered_padding},
};

/// Page: Deck menu
pub struct Menu {
    decks: Vec<String>,
    index: usize,
}

impl Menu {
    /// Creates a new menu
    pub fn new(config: &Config) -> Self {
        Self {
            decks: config.list_decks(),
            index: 0,
        }
    }
}

// Rendering logic
impl Menu {
    pub fn render(
        &self,
        frame: &mut ratatui::Frame,
        area: ratatui::prelude::Rect,
        config: &Config,
    ) {
        let area = center(area, Constraint::Percentage(80), Constraint::Percentage(80));

        let items = self.decks.iter().enumerate().map(|(i, deck)| {
            let mut selector = "  ";
            let style = if i == self.index {
                selector = "> ";
                Style::new()
                    .fg(config.settings.theme.text.highlight)
                    .reversed()
            } else {
                Style::new()
            };

            let description = config
                .decks
                .get(deck)
                .map(|config| config.meta.description.as_str())
                .unwrap_or_default();

            Line::from(vec![
                Span::styled(format!("{selector}{deck}"), style),
                Span::styled(
                    format!("  {description}"),
                    Style::new().fg(config.settings.theme.text.dimmed),
                ),
            ])
        });

        let list = List::new(items);
        let padding = centered_padding(area, Some(list.len() as u16 + 1), None);
        let area = Block::new().padding(padding).inner(area);

        frame.render_widget(list.block(Block::new().title("Select Deck")), area);
    }

    pub fn handle_events(&mut self, event: &Event, config: &Config) -> Option<Message> {
        if let Event::Key(key) = event
            && key.is_press()
        {
            return self.handle_key(key, config);
        }

        None
    }
}

// Event handlers
impl Menu {
    fn handle_key(&mut self, key: &KeyEvent, config: &Config) -> Option<Message> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => select_previous(&mut self.index, self.decks.len()),
            KeyCode::Down | KeyCode::Char('j') => select_next(&mut self.index, self.decks.len()),
            KeyCode::Enter => return self.create_session(config),
            _ => (),
        };

        None
    }

    fn create_session(&self, config: &Config) -> Option<Message> {
        let deck_name = self.decks.get(self.index)?;
        let deck_config = config.decks.get(deck_name)?.clone();
        let decks_dir = config.decks_dir();
        let statistics_file = config.statistics_file();

        let session_loader = Loading::load("Loading questions...", move || {
            Session::new(&decks_dir, deck_config, statistics_file)
                .map(|session| Message::Show(session.into()))
        });

        Some(Message::Show(session_loader.into()))
    }
}

const fn select_previous(index: &mut usize, len: usize) {
    if len > 0 {
        *index = if *index == 0 { len - 1 } else { *index - 1 }
    }
}

const fn select_next(index: &mut usize, len: usize) {
    if len > 0 {
        *index = (*index + 1) % len
    }
}
