//! Prompt construction for deck synthesis.

/// Upper bound, in characters, on the content excerpt embedded in the
/// prompt. A cost and latency control, not a correctness requirement.
pub const MAX_CONTENT_CHARS: usize = 6000;

/// Everything the synthesizer needs to know about one generation request.
#[derive(Debug, Clone, Default)]
pub struct SynthesisRequest {
    pub title: String,
    pub description: String,
    pub content: String,
    pub url: String,
    pub notes: String,
    /// How many user images are available for `{{USER_IMAGE_N}}` tokens.
    pub image_count: usize,
}

/// Build the instruction prompt for one request.
///
/// The template asks for a single JSON object of shape
/// `{ "presentation": { "title": ..., "slides": [...] } }` and spells out
/// the slide vocabulary so the model's output deserializes directly into
/// our types.
pub fn build_prompt(request: &SynthesisRequest) -> String {
    let excerpt = truncate_chars(&request.content, MAX_CONTENT_CHARS);

    let image_instruction = if request.image_count > 0 {
        format!(
            "The user attached {} image(s). Where an image would help, set an \
             \"image\" field to the literal token {{{{USER_IMAGE_N}}}} with N \
             between 1 and {}.",
            request.image_count, request.image_count
        )
    } else {
        "The user attached no images; do not emit {{USER_IMAGE_N}} tokens.".to_string()
    };

    format!(
        r#"You are a presentation designer. Summarize the source material below into a slide deck.

Respond with exactly one JSON object, no commentary, of the shape:
{{ "presentation": {{ "title": string, "slides": [ ... ] }} }}

Each slide is an object with a "type" field, one of:
- "title": fields "title", "subtitle"
- "statement": field "text" (one bold claim)
- "two-column": fields "title", "left" (array of strings), "right" (array of strings)
- "quote": fields "text", "author"
- "big-number": fields "number", "label", "detail"
- "grid": fields "title", "items" (array of {{ "icon", "label" }})
- "split": fields "title", "left" and "right" (each {{ "title", "value", "label" }})
- "content": fields "title", "text"
- "image": fields "image", "caption"
- "end": fields "title", "cta"

Aim for 6 to 10 slides. Open with a "title" slide and close with an "end" slide.
{image_instruction}

Source title: {title}
Source description: {description}
Source URL: {url}
User notes: {notes}

Source content:
{excerpt}"#,
        image_instruction = image_instruction,
        title = request.title,
        description = request.description,
        url = request.url,
        notes = request.notes,
        excerpt = excerpt,
    )
}

/// Truncate to at most `max` characters on a character boundary.
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}
