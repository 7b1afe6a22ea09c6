use ratatui::{
    style::{Color, Style, Stylize},
    text::Span,
};
use serde::{Deserialize, Serialize};

/// General theme
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Theme {
    pub spinner: SpinnerTheme,
    pub text: TextTheme,
}

/// Text color theme
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct TextTheme {
    pub success: Color,
    pub error: Color,
    pub highlight: Color,
    pub dimmed: Color,
}

impl Default for TextTheme {
    fn default() -> Self {
        Self {
            success: Color::Green,
            error: Color::Red,
            highlight: Color::Blue,
            dimmed: Color::DarkGray,
        }
    }
}

/// Loading-screen spinner theme
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct SpinnerTheme {
    pub color: Color,
    pub symbol: SpinnerSymbol,
}

impl Default for SpinnerTheme {
    fn default() -> Self {
        Self {
            color: Color::Yellow,
            symbol: SpinnerSymbol::Braille,
        }
    }
}

/// The glyph sets available for the loading-screen spinner
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub enum SpinnerSymbol {
    Ascii,
    Braille,
    Dots,
}

impl SpinnerSymbol {
    const fn frames(self) -> &'static [&'static str] {
        match self {
            Self::Ascii => &["|", "/", "-", "\\"],
            Self::Braille => &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"],
            Self::Dots => &[".  ", ".. ", "...", "   "],
        }
    }
}

// The event loop is unthrottled; advancing every tick would blur the glyphs
const TICKS_PER_FRAME: usize = 12;

/// Animation state for a spinner, advanced once per poll cycle.
#[derive(Debug, Default)]
pub struct SpinnerState {
    ticks: usize,
}

impl SpinnerState {
    pub const fn tick(&mut self) {
        self.ticks = self.ticks.wrapping_add(1);
    }
}

impl SpinnerTheme {
    pub fn render(&self, state: &SpinnerState) -> Span<'static> {
        let frames = self.symbol.frames();
        let frame = frames[(state.ticks / TICKS_PER_FRAME) % frames.len()];
        Span::styled(format!("{frame} "), Style::new().fg(self.color).bold())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_frames_cycle() {
        let theme = SpinnerTheme::default();
        let mut state = SpinnerState::default();

        let first = theme.render(&state).content.clone();
        for _ in 0..TICKS_PER_FRAME {
            state.tick();
        }
        let second = theme.render(&state).content.clone();
        assert_ne!(first, second);

        let frames = theme.symbol.frames();
        for _ in 0..TICKS_PER_FRAME * (frames.len() - 1) {
            state.tick();
        }
        assert_eq!(theme.render(&state).content, first);
    }
}
