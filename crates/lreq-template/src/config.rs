use std::fmt;
use std::str::FromStr;

use lreq_types::limits::DEFAULT_COMBINATOR_NAME;
use serde::{Deserialize, Serialize};

/// Which combinator layout a template uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutFormat {
    /// One slot per combinator.
    #[default]
    Canonical,
    /// Ten slots per combinator (legacy).
    Packed,
}

impl LayoutFormat {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Canonical => "canonical",
            Self::Packed => "packed",
        }
    }
}

impl fmt::Display for LayoutFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "canonical" => Ok(Self::Canonical),
            "packed" => Ok(Self::Packed),
            other => Err(format!(
                "unknown layout format `{other}` (expected `canonical` or `packed`)"
            )),
        }
    }
}

/// Template codec settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Layout written on export and expected on import.
    pub format: LayoutFormat,
    /// Entity name of the only device kind a template may contain.
    pub combinator_name: String,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            format: LayoutFormat::Canonical,
            combinator_name: DEFAULT_COMBINATOR_NAME.to_owned(),
        }
    }
}

impl TemplateConfig {
    #[must_use]
    pub fn with_format(mut self, format: LayoutFormat) -> Self {
        self.format = format;
        self
    }
}
