use serde::{Deserialize, Serialize};

/// Throwing hand of the pitcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Handedness {
    Left,
    Right,
}

impl Handedness {
    /// Parse the two-valued handedness code.
    ///
    /// Accepts "LHP"/"RHP", "L"/"R" and "LEFT"/"RIGHT", case-insensitive.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "LHP" | "L" | "LEFT" => Some(Handedness::Left),
            "RHP" | "R" | "RIGHT" => Some(Handedness::Right),
            _ => None,
        }
    }

    /// Pitcher code used on the request boundary
    pub fn code(&self) -> &'static str {
        match self {
            Handedness::Left => "LHP",
            Handedness::Right => "RHP",
        }
    }

    pub fn flipped(&self) -> Self {
        match self {
            Handedness::Left => Handedness::Right,
            Handedness::Right => Handedness::Left,
        }
    }
}

impl std::fmt::Display for Handedness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.code())
    }
}
