//! Session lifecycle for one deck-generation session.
//!
//! The phases are `Empty → Synthesizing → Ready`; a failed synthesis
//! falls back to wherever the session was before (a previously-displayed
//! deck survives a failed re-synthesis). A generation counter ties each
//! in-flight request to the session state it was started from, so a stale
//! response that arrives after the user kicked off a new request is
//! discarded instead of clobbering the newer one.

use crate::editor::DeckEditor;
use crate::error::Error;
use crate::types::Presentation;

/// Where a session currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Waiting for input; no deck yet.
    Empty,
    /// A synthesis request is in flight.
    Synthesizing,
    /// A deck is live and owned by the editor.
    Ready,
}

/// Opaque token identifying one synthesis request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

/// One user's deck-generation session. Single-threaded by design: the
/// only suspending operation is the synthesis network call, and its
/// result re-enters through [`Session::finish_synthesis`].
#[derive(Debug, Default)]
pub struct Session {
    editor: Option<DeckEditor>,
    synthesizing: bool,
    generation: u64,
    last_error: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SessionPhase {
        if self.synthesizing {
            SessionPhase::Synthesizing
        } else if self.editor.is_some() {
            SessionPhase::Ready
        } else {
            SessionPhase::Empty
        }
    }

    /// Start a synthesis attempt, superseding any still in flight.
    pub fn begin_synthesis(&mut self) -> RequestToken {
        self.generation += 1;
        self.synthesizing = true;
        self.last_error = None;
        RequestToken(self.generation)
    }

    /// Apply a finished synthesis.
    ///
    /// A stale token (a newer request began since it was issued) is
    /// discarded outright. On success the new deck replaces any previous
    /// one; on failure the previous deck, if any, is left untouched and
    /// the error message is kept for display.
    pub fn finish_synthesis(&mut self, token: RequestToken, result: Result<Presentation, Error>) {
        if token.0 != self.generation {
            log::debug!(
                "discarding stale synthesis result (request {} superseded by {})",
                token.0,
                self.generation
            );
            return;
        }

        self.synthesizing = false;
        match result {
            Ok(presentation) => {
                self.editor = Some(DeckEditor::new(presentation));
            }
            Err(error) => {
                log::warn!("synthesis failed: {}", error);
                self.last_error = Some(error.to_string());
            }
        }
    }

    /// The live editor, if a deck is ready.
    pub fn editor(&self) -> Option<&DeckEditor> {
        self.editor.as_ref()
    }

    /// Mutable access to the live editor for applying edit operations.
    pub fn editor_mut(&mut self) -> Option<&mut DeckEditor> {
        self.editor.as_mut()
    }

    /// Message from the most recent failed synthesis, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Drop everything and return to the input phase. The deck lives only
    /// for the session; starting over destroys it. Bumping the generation
    /// invalidates any token still in flight, so a result that arrives
    /// after the reset is discarded instead of resurrecting the session.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.editor = None;
        self.synthesizing = false;
        self.last_error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Slide, SlideBody};

    fn deck(title: &str) -> Presentation {
        let mut deck = Presentation::new(title);
        deck.add_slide(Slide::new(SlideBody::Title {
            title: Some(title.to_string()),
            subtitle: None,
        }));
        deck
    }

    #[test]
    fn test_success_path() {
        let mut session = Session::new();
        assert_eq!(session.phase(), SessionPhase::Empty);

        let token = session.begin_synthesis();
        assert_eq!(session.phase(), SessionPhase::Synthesizing);

        session.finish_synthesis(token, Ok(deck("First")));
        assert_eq!(session.phase(), SessionPhase::Ready);
        assert_eq!(session.editor().unwrap().presentation().title, "First");
    }

    #[test]
    fn test_failure_returns_to_input_phase() {
        let mut session = Session::new();
        let token = session.begin_synthesis();
        session.finish_synthesis(token, Err(Error::Format("not json".to_string())));

        assert_eq!(session.phase(), SessionPhase::Empty);
        assert!(session.last_error().unwrap().contains("not json"));
    }

    #[test]
    fn test_failed_resynthesis_keeps_previous_deck() {
        let mut session = Session::new();
        let token = session.begin_synthesis();
        session.finish_synthesis(token, Ok(deck("First")));

        let token = session.begin_synthesis();
        session.finish_synthesis(token, Err(Error::Format("bad output".to_string())));

        assert_eq!(session.phase(), SessionPhase::Ready);
        assert_eq!(session.editor().unwrap().presentation().title, "First");
        assert!(session.last_error().is_some());
    }

    #[test]
    fn test_stale_result_is_discarded() {
        let mut session = Session::new();
        let stale = session.begin_synthesis();
        let fresh = session.begin_synthesis();

        session.finish_synthesis(stale, Ok(deck("Stale")));
        assert_eq!(session.phase(), SessionPhase::Synthesizing);
        assert!(session.editor().is_none());

        session.finish_synthesis(fresh, Ok(deck("Fresh")));
        assert_eq!(session.editor().unwrap().presentation().title, "Fresh");
    }

    #[test]
    fn test_reset_discards_in_flight_result() {
        let mut session = Session::new();
        let token = session.begin_synthesis();
        session.reset();

        // The user navigated away mid-synthesis; the late arrival must
        // not resurrect the session.
        session.finish_synthesis(token, Ok(deck("Late")));
        assert_eq!(session.phase(), SessionPhase::Empty);
        assert!(session.editor().is_none());
    }

    #[test]
    fn test_reset_destroys_the_deck() {
        let mut session = Session::new();
        let token = session.begin_synthesis();
        session.finish_synthesis(token, Ok(deck("First")));

        session.reset();
        assert_eq!(session.phase(), SessionPhase::Empty);
        assert!(session.editor().is_none());
    }
}
