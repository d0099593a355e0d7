use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::tui::helpers::FG_ACCENT;

/// Semantic heading rank, `h1` being the most prominent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum HeadingLevel {
    #[default]
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl HeadingLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            HeadingLevel::H1 => "h1",
            HeadingLevel::H2 => "h2",
            HeadingLevel::H3 => "h3",
            HeadingLevel::H4 => "h4",
            HeadingLevel::H5 => "h5",
            HeadingLevel::H6 => "h6",
        }
    }

    fn style(&self) -> Style {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        match self {
            HeadingLevel::H1 => bold.fg(FG_ACCENT).add_modifier(Modifier::UNDERLINED),
            HeadingLevel::H2 => bold.fg(Color::Rgb(235, 238, 245)),
            HeadingLevel::H3 => bold.fg(Color::Rgb(200, 204, 212)),
            HeadingLevel::H4 => bold.fg(Color::Rgb(165, 170, 180)),
            HeadingLevel::H5 => bold.fg(Color::Rgb(130, 136, 148)),
            HeadingLevel::H6 => bold.fg(Color::Rgb(100, 106, 118)),
        }
    }

    fn alignment(&self) -> Alignment {
        match self {
            HeadingLevel::H1 | HeadingLevel::H2 => Alignment::Center,
            _ => Alignment::Left,
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for HeadingLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "h1" => Ok(HeadingLevel::H1),
            "h2" => Ok(HeadingLevel::H2),
            "h3" => Ok(HeadingLevel::H3),
            "h4" => Ok(HeadingLevel::H4),
            "h5" => Ok(HeadingLevel::H5),
            "h6" => Ok(HeadingLevel::H6),
            other => Err(anyhow!("Unknown heading level '{}': expected h1..h6", other)),
        }
    }
}

/// Heading with configurable text and level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Title {
    pub title: String,
    pub level: HeadingLevel,
}

impl Title {
    pub fn new<T: Into<String>>(title: T, level: HeadingLevel) -> Self {
        Self {
            title: title.into(),
            level,
        }
    }

    /// Rows the heading wants. `h1` gets a blank line above and below.
    pub fn height(&self) -> u16 {
        match self.level {
            HeadingLevel::H1 => 3,
            _ => 1,
        }
    }
}

impl Widget for &Title {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let text_area = if self.level == HeadingLevel::H1 && area.height >= 3 {
            Rect {
                y: area.y + 1,
                height: 1,
                ..area
            }
        } else {
            area
        };

        let line = Line::from(Span::styled(self.title.clone(), self.level.style()));
        Paragraph::new(line)
            .alignment(self.level.alignment())
            .render(text_area, buf);
    }
}
