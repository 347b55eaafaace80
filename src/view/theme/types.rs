use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The two supported color schemes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeKind {
    Light,
    #[default]
    Dark,
}

impl ThemeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeKind::Light => "light",
            ThemeKind::Dark => "dark",
        }
    }

    /// The other theme
    pub fn toggled(&self) -> Self {
        match self {
            ThemeKind::Light => ThemeKind::Dark,
            ThemeKind::Dark => ThemeKind::Light,
        }
    }
}

impl fmt::Display for ThemeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(ThemeKind::Light),
            "dark" => Ok(ThemeKind::Dark),
            other => Err(format!("unknown theme '{other}' (expected 'dark' or 'light')")),
        }
    }
}

/// Every color the viewer draws with
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Theme name ("dark" or "light")
    pub name: String,
    pub kind: ThemeKind,

    // Editor pane colors
    pub editor_bg: Color,
    pub editor_fg: Color,
    pub accent: Color,
    pub line_number_fg: Color,
    pub line_number_bg: Color,
    pub fold_marker_fg: Color,
    pub separator_fg: Color,

    // Pane title and viewer toolbar
    pub title_fg: Color,
    pub title_bg: Color,
    pub toolbar_fg: Color,
    pub toolbar_bg: Color,

    // Host chrome
    pub status_bar_fg: Color,
    pub status_bar_bg: Color,
    pub help_fg: Color,
    pub help_bg: Color,
    pub help_key_fg: Color,

    // Diff colors
    pub diff_add_bg: Color,
    pub diff_remove_bg: Color,
    pub diff_modify_bg: Color,
    pub diff_add_fg: Color,
    pub diff_remove_fg: Color,
    pub diff_modify_fg: Color,

    // Syntax highlighting colors
    pub syntax_keyword: Color,
    pub syntax_string: Color,
    pub syntax_comment: Color,
    pub syntax_function: Color,
    pub syntax_type: Color,
    pub syntax_variable: Color,
    pub syntax_constant: Color,
    pub syntax_operator: Color,
}

impl Theme {
    /// Accent shared by both themes (#68a063)
    const ACCENT: Color = Color::Rgb(0x68, 0xa0, 0x63);

    pub fn from_kind(kind: ThemeKind) -> Self {
        match kind {
            ThemeKind::Dark => Self::dark(),
            ThemeKind::Light => Self::light(),
        }
    }

    /// Dark theme: #1e1e1e background, #d4d4d4 text
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            kind: ThemeKind::Dark,
            editor_bg: Color::Rgb(0x1e, 0x1e, 0x1e),
            editor_fg: Color::Rgb(0xd4, 0xd4, 0xd4),
            accent: Self::ACCENT,
            line_number_fg: Color::Rgb(133, 133, 133),
            line_number_bg: Color::Rgb(0x25, 0x25, 0x26),
            fold_marker_fg: Self::ACCENT,
            separator_fg: Color::Rgb(68, 68, 68),
            title_fg: Color::Rgb(0xd4, 0xd4, 0xd4),
            title_bg: Color::Rgb(45, 45, 45),
            toolbar_fg: Color::Rgb(0xd4, 0xd4, 0xd4),
            toolbar_bg: Color::Rgb(37, 37, 38),
            status_bar_fg: Color::Rgb(255, 255, 255),
            status_bar_bg: Self::ACCENT,
            help_fg: Color::Rgb(0xd4, 0xd4, 0xd4),
            help_bg: Color::Rgb(37, 37, 38),
            help_key_fg: Self::ACCENT,
            diff_add_bg: Color::Rgb(35, 61, 37),
            diff_remove_bg: Color::Rgb(72, 32, 32),
            diff_modify_bg: Color::Rgb(62, 58, 24),
            diff_add_fg: Color::Rgb(87, 171, 90),
            diff_remove_fg: Color::Rgb(229, 83, 75),
            diff_modify_fg: Color::Rgb(210, 153, 34),
            syntax_keyword: Color::Rgb(86, 156, 214),
            syntax_string: Color::Rgb(206, 145, 120),
            syntax_comment: Color::Rgb(106, 153, 85),
            syntax_function: Color::Rgb(220, 220, 170),
            syntax_type: Color::Rgb(78, 201, 176),
            syntax_variable: Color::Rgb(156, 220, 254),
            syntax_constant: Color::Rgb(181, 206, 168),
            syntax_operator: Color::Rgb(0xd4, 0xd4, 0xd4),
        }
    }

    /// Light theme: #ffffff background, #24292e text
    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            kind: ThemeKind::Light,
            editor_bg: Color::Rgb(0xff, 0xff, 0xff),
            editor_fg: Color::Rgb(0x24, 0x29, 0x2e),
            accent: Self::ACCENT,
            line_number_fg: Color::Rgb(149, 157, 165),
            line_number_bg: Color::Rgb(0xf6, 0xf8, 0xfa),
            fold_marker_fg: Self::ACCENT,
            separator_fg: Color::Rgb(209, 213, 218),
            title_fg: Color::Rgb(0x24, 0x29, 0x2e),
            title_bg: Color::Rgb(246, 248, 250),
            toolbar_fg: Color::Rgb(0x24, 0x29, 0x2e),
            toolbar_bg: Color::Rgb(234, 238, 242),
            status_bar_fg: Color::Rgb(255, 255, 255),
            status_bar_bg: Self::ACCENT,
            help_fg: Color::Rgb(0x24, 0x29, 0x2e),
            help_bg: Color::Rgb(246, 248, 250),
            help_key_fg: Color::Rgb(34, 134, 58),
            diff_add_bg: Color::Rgb(230, 255, 237),
            diff_remove_bg: Color::Rgb(255, 235, 233),
            diff_modify_bg: Color::Rgb(255, 248, 197),
            diff_add_fg: Color::Rgb(34, 134, 58),
            diff_remove_fg: Color::Rgb(203, 36, 49),
            diff_modify_fg: Color::Rgb(154, 103, 0),
            syntax_keyword: Color::Rgb(0, 0, 255),
            syntax_string: Color::Rgb(163, 21, 21),
            syntax_comment: Color::Rgb(0, 128, 0),
            syntax_function: Color::Rgb(121, 94, 38),
            syntax_type: Color::Rgb(38, 127, 153),
            syntax_variable: Color::Rgb(0, 16, 128),
            syntax_constant: Color::Rgb(9, 134, 88),
            syntax_operator: Color::Rgb(0x24, 0x29, 0x2e),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_palette() {
        let dark = Theme::dark();
        assert_eq!(dark.editor_bg, Color::Rgb(30, 30, 30));
        assert_eq!(dark.editor_fg, Color::Rgb(212, 212, 212));
        assert_eq!(dark.accent, Color::Rgb(104, 160, 99));

        let light = Theme::light();
        assert_eq!(light.editor_bg, Color::Rgb(255, 255, 255));
        assert_eq!(light.editor_fg, Color::Rgb(36, 41, 46));
        assert_eq!(light.accent, dark.accent);
    }

    #[test]
    fn test_theme_kind_parsing() {
        assert_eq!("dark".parse::<ThemeKind>(), Ok(ThemeKind::Dark));
        assert_eq!(" Light ".parse::<ThemeKind>(), Ok(ThemeKind::Light));
        assert!("solarized".parse::<ThemeKind>().is_err());
        assert_eq!(ThemeKind::Dark.toggled(), ThemeKind::Light);
        assert_eq!(Theme::from_kind(ThemeKind::Light).name, "light");
    }

    #[test]
    fn test_theme_kind_serde() {
        let json = serde_json::to_string(&ThemeKind::Light).unwrap();
        assert_eq!(json, "\"light\"");
        let kind: ThemeKind = serde_json::from_str("\"dark\"").unwrap();
        assert_eq!(kind, ThemeKind::Dark);
    }
}
