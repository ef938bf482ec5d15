use serde::{Deserialize, Serialize};

/// Display icon for a condition category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Icon {
    Cloud,
    Rain,
    Snow,
    Thunderstorm,
    Clear,
    Mist,
}

/// Checked in order; first substring hit wins.
const RULES: &[(&str, Icon)] = &[
    ("cloud", Icon::Cloud),
    ("rain", Icon::Rain),
    ("snow", Icon::Snow),
    ("thunderstorm", Icon::Thunderstorm),
    ("clear", Icon::Clear),
    ("mist", Icon::Mist),
    ("fog", Icon::Mist),
];

impl Icon {
    /// Map a condition category to its icon. Unknown categories get [`Icon::Clear`].
    pub fn for_condition(condition: &str) -> Self {
        let condition = condition.to_lowercase();

        RULES
            .iter()
            .find(|(needle, _)| condition.contains(needle))
            .map(|(_, icon)| *icon)
            .unwrap_or(Icon::Clear)
    }

    /// Icon identifier (Font Awesome class).
    pub fn class_name(&self) -> &'static str {
        match self {
            Icon::Cloud => "fas fa-cloud",
            Icon::Rain => "fas fa-cloud-rain",
            Icon::Snow => "fas fa-snowflake",
            Icon::Thunderstorm => "fas fa-bolt",
            Icon::Clear => "fas fa-sun",
            Icon::Mist => "fas fa-smog",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Icon::Cloud => "☁",
            Icon::Rain => "🌧",
            Icon::Snow => "❄",
            Icon::Thunderstorm => "⚡",
            Icon::Clear => "☀",
            Icon::Mist => "🌫",
        }
    }
}

impl std::fmt::Display for Icon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.class_name())
    }
}
