//! Placeholder resolution: substituting `{{USER_IMAGE_<N>}}` tokens in a
//! synthesized deck with user-supplied image references.
//!
//! The synthesizer is told how many images the user attached and emits
//! numbered tokens where it wants them. Resolution runs once, after
//! parsing, and produces a new deck; the input is never mutated.

use crate::types::{GridItem, Presentation, Slide, SlideBody, Stat};
use regex::Regex;
use std::sync::LazyLock;

/// How many user images a single deck can reference.
pub const MAX_USER_IMAGES: usize = 5;

/// Matches `{{USER_IMAGE_<N>}}` where N is a decimal integer. Anything
/// else (non-numeric N, unbalanced braces) is not a placeholder.
static USER_IMAGE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{USER_IMAGE_(\d+)\}\}").unwrap());

/// Produce a copy of `presentation` with every resolvable placeholder
/// token replaced by the corresponding entry of `images`.
///
/// Token `{{USER_IMAGE_N}}` maps to `images[N - 1]`. A token whose index
/// has no matching image is left verbatim so the gap stays visible in the
/// rendered deck instead of silently blanking the field. Only the first
/// token per string is considered; in practice the whole field is the
/// token.
pub fn resolve_placeholders(presentation: &Presentation, images: &[String]) -> Presentation {
    let mut resolved = presentation.clone();
    for slide in &mut resolved.slides {
        slide.map_string_leaves(&|text| substitute_first_token(text, images));
    }
    resolved
}

/// Resolve the first placeholder token in one string, if any.
///
/// Returns `None` when the string should stay as-is: no token, malformed
/// token, or an index beyond the available images.
fn substitute_first_token(text: &str, images: &[String]) -> Option<String> {
    let caps = USER_IMAGE_TOKEN.captures(text)?;
    let n: usize = caps.get(1)?.as_str().parse().ok()?;
    let image = n.checked_sub(1).and_then(|i| images.get(i))?;
    let token = caps.get(0)?;

    let mut out = String::with_capacity(text.len() - token.len() + image.len());
    out.push_str(&text[..token.start()]);
    out.push_str(image);
    out.push_str(&text[token.end()..]);
    Some(out)
}

/// Tree-mapping visitor over every string leaf of a slide value.
///
/// The transform returns `Some(replacement)` when a leaf changes. This is
/// implemented once for the generic containers, so adding a slide variant
/// only means listing its fields, never re-describing the traversal.
trait MapStringLeaves {
    fn map_string_leaves<F>(&mut self, f: &F)
    where
        F: Fn(&str) -> Option<String>;
}

impl MapStringLeaves for String {
    fn map_string_leaves<F>(&mut self, f: &F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(replacement) = f(self) {
            *self = replacement;
        }
    }
}

impl<T: MapStringLeaves> MapStringLeaves for Option<T> {
    fn map_string_leaves<F>(&mut self, f: &F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = self {
            value.map_string_leaves(f);
        }
    }
}

impl<T: MapStringLeaves> MapStringLeaves for Vec<T> {
    fn map_string_leaves<F>(&mut self, f: &F)
    where
        F: Fn(&str) -> Option<String>,
    {
        for value in self {
            value.map_string_leaves(f);
        }
    }
}

impl MapStringLeaves for Stat {
    fn map_string_leaves<F>(&mut self, f: &F)
    where
        F: Fn(&str) -> Option<String>,
    {
        self.title.map_string_leaves(f);
        self.value.map_string_leaves(f);
        self.label.map_string_leaves(f);
    }
}

impl MapStringLeaves for GridItem {
    fn map_string_leaves<F>(&mut self, f: &F)
    where
        F: Fn(&str) -> Option<String>,
    {
        self.icon.map_string_leaves(f);
        self.label.map_string_leaves(f);
    }
}

impl MapStringLeaves for SlideBody {
    fn map_string_leaves<F>(&mut self, f: &F)
    where
        F: Fn(&str) -> Option<String>,
    {
        match self {
            SlideBody::Title { title, subtitle } => {
                title.map_string_leaves(f);
                subtitle.map_string_leaves(f);
            }
            SlideBody::Statement { text } => text.map_string_leaves(f),
            SlideBody::TwoColumn { title, left, right } => {
                title.map_string_leaves(f);
                left.map_string_leaves(f);
                right.map_string_leaves(f);
            }
            SlideBody::Quote { text, author } => {
                text.map_string_leaves(f);
                author.map_string_leaves(f);
            }
            SlideBody::BigNumber {
                number,
                label,
                detail,
            } => {
                number.map_string_leaves(f);
                label.map_string_leaves(f);
                detail.map_string_leaves(f);
            }
            SlideBody::Grid { title, items } => {
                title.map_string_leaves(f);
                items.map_string_leaves(f);
            }
            SlideBody::Split { title, left, right } => {
                title.map_string_leaves(f);
                left.map_string_leaves(f);
                right.map_string_leaves(f);
            }
            SlideBody::Content { title, text } => {
                title.map_string_leaves(f);
                text.map_string_leaves(f);
            }
            SlideBody::Image { image, caption } => {
                image.map_string_leaves(f);
                caption.map_string_leaves(f);
            }
            SlideBody::End { title, cta } => {
                title.map_string_leaves(f);
                cta.map_string_leaves(f);
            }
        }
    }
}

impl MapStringLeaves for Slide {
    fn map_string_leaves<F>(&mut self, f: &F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // Customization maps hold only numeric values; the slide's string
        // leaves all live in the body.
        self.body.map_string_leaves(f);
    }
}
