//! Deck synthesis: prompt construction, the generation-service
//! transport, and parsing of the model's JSON response into a
//! [`Presentation`](slidesmith_core::Presentation).

mod parse;
mod prompt;
mod provider;

pub use parse::parse_presentation_response;
pub use prompt::{build_prompt, SynthesisRequest, MAX_CONTENT_CHARS};
pub use provider::{HttpGenerator, TextGenerator};

use slidesmith_core::{Presentation, Result};

/// Ties a [`TextGenerator`] to the prompt template and response parser.
pub struct Synthesizer<G> {
    generator: G,
}

impl<G: TextGenerator> Synthesizer<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    /// Run one synthesis attempt end to end. No retries: a malformed
    /// response or upstream failure aborts the attempt and surfaces to
    /// the caller.
    pub async fn synthesize(&self, request: &SynthesisRequest) -> Result<Presentation> {
        let prompt = build_prompt(request);
        let raw = self.generator.generate(&prompt).await?;
        parse_presentation_response(&raw)
    }
}
