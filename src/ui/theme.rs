use anstream::ColorChoice;
use anstyle::{AnsiColor, Color, Style};

use crate::ui::widgets::NoticeLevel;

pub const COLOR_ENV: &str = "WORKGEN_COLOR";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Auto,
    Always,
    Never,
}

impl OutputMode {
    pub fn from_env() -> Self {
        std::env::var(COLOR_ENV)
            .map(|value| Self::parse(&value))
            .unwrap_or(OutputMode::Auto)
    }

    /// Unrecognized values fall back to `Auto`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "always" | "1" | "true" => OutputMode::Always,
            "never" | "0" | "false" => OutputMode::Never,
            _ => OutputMode::Auto,
        }
    }

    pub fn color_choice(self) -> ColorChoice {
        match self {
            OutputMode::Auto => ColorChoice::Auto,
            OutputMode::Always => ColorChoice::AlwaysAnsi,
            OutputMode::Never => ColorChoice::Never,
        }
    }
}

const fn fg(color: AnsiColor) -> Style {
    Style::new().fg_color(Some(Color::Ansi(color)))
}

/// Styles for the generator report: headings, change labels and notices.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub heading: Style,
    pub dim: Style,
    pub key: Style,
    pub value: Style,
    pub failure: Style,
    info: Style,
    success: Style,
    warning: Style,
}

impl Theme {
    pub fn notice(&self, level: NoticeLevel) -> Style {
        match level {
            NoticeLevel::Info => self.info,
            NoticeLevel::Success => self.success,
            NoticeLevel::Warning => self.warning,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            heading: fg(AnsiColor::Cyan).bold(),
            dim: fg(AnsiColor::BrightBlack),
            key: fg(AnsiColor::Blue).bold(),
            value: fg(AnsiColor::White),
            failure: fg(AnsiColor::Red).bold(),
            info: fg(AnsiColor::Cyan),
            success: fg(AnsiColor::Green).bold(),
            warning: fg(AnsiColor::Yellow).bold(),
        }
    }
}

/// `NO_COLOR` wins over everything, then the explicit mode, then the tty check.
pub fn resolve_color_enabled(mode: OutputMode, is_tty: bool) -> bool {
    std::env::var_os("NO_COLOR").is_none()
        && match mode {
            OutputMode::Always => true,
            OutputMode::Never => false,
            OutputMode::Auto => is_tty,
        }
}
