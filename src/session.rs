//! Session state and prompt assembly for the interaction cycle.
//!
//! Everything here is owned by the controller and mutated only from the UI
//! thread. The prompt is a derived value, rebuilt from the live controls on
//! every generation so edits between cycles are always picked up.

use crate::api::tts::AudioClip;
use crate::language::OutputLanguage;

/// Fixed reply used when the user generates with nothing to say.
pub const EMPTY_INPUT_PLACEHOLDER: &str = "Please provide some input.";

/// Mutable state that survives across interaction cycles within one run.
#[derive(Default)]
pub struct SessionState {
    /// Transcribed utterances in arrival order, space-separated. Grows
    /// monotonically; cleared only by the explicit transcript reset.
    pub spoken_text_buffer: String,
    /// The most recent generated text, held for display.
    pub last_response: Option<String>,
    /// The most recently synthesized clip. Overwritten whole on every
    /// successful synthesis, never appended to.
    pub last_audio: Option<AudioClip>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one transcribed utterance with a leading separator. Utterances
    /// keep arrival order; nothing is deduplicated or reordered.
    pub fn append_utterance(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        self.spoken_text_buffer.push(' ');
        self.spoken_text_buffer.push_str(text);
    }

    pub fn clear_transcript(&mut self) {
        self.spoken_text_buffer.clear();
    }
}

/// The prompt for one generation request, assembled from the live controls.
///
/// The typed text always gets the language directive appended; the spoken
/// buffer follows on its own line when non-empty. A prompt with no user
/// content at all (directive aside) is "blank" and must never reach the
/// network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledPrompt {
    text: String,
    has_user_input: bool,
}

impl AssembledPrompt {
    pub fn assemble(typed: &str, language: OutputLanguage, spoken: &str) -> Self {
        let directed = format!("{typed}.generate response in {}", language.name());
        let directed = directed.trim();
        let spoken = spoken.trim();

        let text = if spoken.is_empty() {
            directed.to_string()
        } else {
            format!("{directed}\n{spoken}").trim().to_string()
        };

        AssembledPrompt {
            text,
            has_user_input: !(typed.trim().is_empty() && spoken.is_empty()),
        }
    }

    /// True when the user neither typed nor spoke anything.
    pub fn is_blank(&self) -> bool {
        !self.has_user_input
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_only_gets_directive_and_nothing_else() {
        let prompt =
            AssembledPrompt::assemble("Describe this photo", OutputLanguage::French, "");
        assert_eq!(
            prompt.as_str(),
            "Describe this photo.generate response in French"
        );
        assert!(!prompt.is_blank());
    }

    #[test]
    fn spoken_buffer_joins_on_its_own_line() {
        let prompt = AssembledPrompt::assemble(
            "Summarize",
            OutputLanguage::English,
            " what I said earlier",
        );
        assert_eq!(
            prompt.as_str(),
            "Summarize.generate response in English\nwhat I said earlier"
        );
    }

    #[test]
    fn directive_tracks_selected_language() {
        for lang in OutputLanguage::ALL {
            let prompt = AssembledPrompt::assemble("hi", lang, "");
            assert!(prompt.as_str().ends_with(&format!(
                ".generate response in {}",
                lang.name()
            )));
        }
    }

    #[test]
    fn whitespace_only_input_is_blank() {
        let prompt = AssembledPrompt::assemble("   ", OutputLanguage::German, " \n ");
        assert!(prompt.is_blank());
    }

    #[test]
    fn spoken_text_alone_is_not_blank() {
        let prompt = AssembledPrompt::assemble("", OutputLanguage::Hindi, " hello there");
        assert!(!prompt.is_blank());
        assert!(prompt.as_str().contains("hello there"));
    }

    #[test]
    fn utterances_accumulate_in_order() {
        let mut session = SessionState::new();
        session.append_utterance("hello");
        session.append_utterance("world");

        let buffer = &session.spoken_text_buffer;
        let hello = buffer.find("hello").expect("first utterance kept");
        let world = buffer.find("world").expect("second utterance kept");
        assert!(hello < world);
    }

    #[test]
    fn empty_utterances_are_ignored() {
        let mut session = SessionState::new();
        session.append_utterance("   ");
        assert!(session.spoken_text_buffer.is_empty());
    }

    #[test]
    fn clearing_the_transcript_resets_the_buffer() {
        let mut session = SessionState::new();
        session.append_utterance("hello");
        session.clear_transcript();
        assert!(session.spoken_text_buffer.is_empty());
    }
}
