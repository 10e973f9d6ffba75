use serde::{Deserialize, Serialize};
use std::fmt;

/// A named pair of prompt and negative prompt text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    #[serde(rename = "prompt", default)]
    pub prompt_text: String,
    #[serde(rename = "negative", default)]
    pub negative_text: String,
}

impl Preset {
    pub fn new(
        name: impl Into<String>,
        prompt_text: impl Into<String>,
        negative_text: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            prompt_text: prompt_text.into(),
            negative_text: negative_text.into(),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Preset: {}", self.name)?;
        writeln!(f, "{}", "=".repeat(30))?;
        writeln!(f, "Prompt:   {}", self.prompt_text)?;
        write!(f, "Negative: {}", self.negative_text)
    }
}
