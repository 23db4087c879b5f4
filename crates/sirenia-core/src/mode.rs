use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Which kind of source the editor currently holds.
///
/// The string ids double as persistence keys (`<id>-session-code`), so they must stay stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorMode {
    #[default]
    #[serde(rename = "mermaid")]
    Diagram,
    #[serde(rename = "markdown")]
    Markdown,
}

impl EditorMode {
    pub const ALL: [EditorMode; 2] = [EditorMode::Diagram, EditorMode::Markdown];

    pub fn id(self) -> &'static str {
        match self {
            EditorMode::Diagram => "mermaid",
            EditorMode::Markdown => "markdown",
        }
    }

    /// Built-in document shown when nothing was persisted for this mode.
    pub fn default_document(self) -> &'static str {
        match self {
            EditorMode::Diagram => include_str!("../assets/default.mmd"),
            EditorMode::Markdown => include_str!("../assets/default.md"),
        }
    }
}

impl std::fmt::Display for EditorMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for EditorMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "mermaid" => Ok(EditorMode::Diagram),
            "markdown" => Ok(EditorMode::Markdown),
            other => Err(Error::UnknownMode {
                value: other.to_string(),
            }),
        }
    }
}

/// Diagram theme forwarded to the rendering engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Default,
    #[default]
    Neutral,
    Dark,
    Forest,
}

impl Theme {
    pub const ALL: [Theme; 4] = [Theme::Default, Theme::Neutral, Theme::Dark, Theme::Forest];

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Default => "default",
            Theme::Neutral => "neutral",
            Theme::Dark => "dark",
            Theme::Forest => "forest",
        }
    }

    pub fn is_dark(self) -> bool {
        matches!(self, Theme::Dark)
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Theme::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownTheme {
                value: s.to_string(),
            })
    }
}
