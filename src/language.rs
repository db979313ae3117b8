//! The closed set of output languages offered by the selector.

use serde::{Deserialize, Serialize};

/// A response language. The selector offers exactly these six; the variant
/// name doubles as the wording used in the prompt directive.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputLanguage {
    English,
    Spanish,
    French,
    Hindi,
    German,
    Japanese,
}

impl OutputLanguage {
    pub const ALL: [OutputLanguage; 6] = [
        OutputLanguage::English,
        OutputLanguage::Spanish,
        OutputLanguage::French,
        OutputLanguage::Hindi,
        OutputLanguage::German,
        OutputLanguage::Japanese,
    ];

    /// Name shown in the selector and spliced into the prompt directive.
    pub fn name(self) -> &'static str {
        match self {
            OutputLanguage::English => "English",
            OutputLanguage::Spanish => "Spanish",
            OutputLanguage::French => "French",
            OutputLanguage::Hindi => "Hindi",
            OutputLanguage::German => "German",
            OutputLanguage::Japanese => "Japanese",
        }
    }

}

impl Default for OutputLanguage {
    fn default() -> Self {
        OutputLanguage::English
    }
}

impl std::fmt::Display for OutputLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
