use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Editing tools.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    Select,
    Line,
    Polygon,
    Square,
}

impl Tool {
    pub fn name(&self) -> &'static str {
        match self {
            Tool::Select => "select",
            Tool::Line => "line",
            Tool::Polygon => "polygon",
            Tool::Square => "square",
        }
    }

    /// True for tools that build a shape over several clicks.
    pub fn captures_points(&self) -> bool {
        matches!(self, Tool::Line | Tool::Polygon)
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "select" => Ok(Tool::Select),
            "line" => Ok(Tool::Line),
            "polygon" => Ok(Tool::Polygon),
            "square" => Ok(Tool::Square),
            other => Err(format!(
                "unknown tool '{other}' (expected select, line, polygon or square)"
            )),
        }
    }
}
