//! The deck editor: single owner of the live presentation.
//!
//! Every user action maps to exactly one editor operation, and each
//! operation leaves the deck invariants intact: slide order stays
//! positional, the tracked current index stays in range (or 0 for an
//! empty deck), and customization maps are merged, never replaced.

use crate::error::{Error, Result};
use crate::types::{GridItem, Offset, Presentation, Slide, SlideBody, Stat};

/// Replacement value for a single slide field.
///
/// Array-typed fields are replaced wholesale. The editor does not
/// distinguish "replace a scalar" from "replace an array whose one element
/// changed"; callers hand over the full new value either way, which keeps
/// the operation uniform.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
    Stat(Stat),
    Items(Vec<GridItem>),
}

/// One per-field visual override to merge into a slide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Customization {
    Position(Offset),
    FontSize(f64),
    Rotation(f64),
}

/// Owns the live [`Presentation`] and the currently-displayed slide index.
#[derive(Debug, Clone, PartialEq)]
pub struct DeckEditor {
    presentation: Presentation,
    current: usize,
}

impl DeckEditor {
    /// Take ownership of a freshly synthesized (and resolved) deck.
    pub fn new(presentation: Presentation) -> Self {
        Self {
            presentation,
            current: 0,
        }
    }

    /// Read-only view of the live deck.
    pub fn presentation(&self) -> &Presentation {
        &self.presentation
    }

    /// Give the deck back, consuming the editor.
    pub fn into_presentation(self) -> Presentation {
        self.presentation
    }

    /// Index of the currently-displayed slide. 0 for an empty deck.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Number of slides in the deck.
    pub fn slide_count(&self) -> usize {
        self.presentation.slides.len()
    }

    /// Navigate to `index`, clamped to the valid range.
    pub fn set_current_index(&mut self, index: usize) {
        self.current = index.min(self.presentation.slides.len().saturating_sub(1));
    }

    /// Replace exactly one field of the slide at `slide_index`.
    ///
    /// An out-of-range index or a field/value mismatch for the slide's
    /// variant is a driver bug, not user input; callers are expected to
    /// log the returned error and carry on.
    pub fn edit_field(&mut self, slide_index: usize, field: &str, value: FieldValue) -> Result<()> {
        let len = self.presentation.slides.len();
        let slide = self
            .presentation
            .slides
            .get_mut(slide_index)
            .ok_or(Error::Index {
                index: slide_index,
                len,
            })?;
        apply_field(&mut slide.body, field, value)
    }

    /// Insert `slide` immediately after position `after` (-1 inserts at the
    /// front) and move the current index onto the new slide.
    pub fn insert_slide(&mut self, after: isize, slide: Slide) {
        let len = self.presentation.slides.len() as isize;
        let at = after.saturating_add(1).clamp(0, len) as usize;
        self.presentation.slides.insert(at, slide);
        self.current = at;
    }

    /// Remove the slide at `index`, clamping the current index to the new
    /// last slide. An empty deck is a valid terminal state; the current
    /// index rests at 0 until something is inserted again.
    pub fn delete_slide(&mut self, index: usize) {
        if index >= self.presentation.slides.len() {
            log::warn!(
                "delete_slide: index {} out of range (deck has {} slides)",
                index,
                self.presentation.slides.len()
            );
            return;
        }

        self.presentation.slides.remove(index);

        let len = self.presentation.slides.len();
        if len == 0 {
            self.current = 0;
        } else if self.current >= len {
            self.current = len - 1;
        }
    }

    /// Merge one customization entry into the slide's matching map,
    /// leaving every other entry untouched. Independently-adjusted fields
    /// must survive an adjustment to a sibling field.
    pub fn set_customization(&mut self, slide_index: usize, field_key: &str, value: Customization) {
        let Some(slide) = self.presentation.slides.get_mut(slide_index) else {
            log::warn!(
                "set_customization: index {} out of range (deck has {} slides)",
                slide_index,
                self.presentation.slides.len()
            );
            return;
        };

        match value {
            Customization::Position(offset) => {
                slide.positions.insert(field_key.to_string(), offset);
            }
            Customization::FontSize(size) => {
                slide.font_sizes.insert(field_key.to_string(), size);
            }
            Customization::Rotation(degrees) => {
                slide.rotations.insert(field_key.to_string(), degrees);
            }
        }
    }
}

/// Whole-field replacement on one slide body.
fn apply_field(body: &mut SlideBody, field: &str, value: FieldValue) -> Result<()> {
    use FieldValue as V;
    use SlideBody as B;

    match (body, field, value) {
        (B::Title { title, .. }, "title", V::Text(v)) => *title = Some(v),
        (B::Title { subtitle, .. }, "subtitle", V::Text(v)) => *subtitle = Some(v),

        (B::Statement { text }, "text", V::Text(v)) => *text = Some(v),

        (B::TwoColumn { title, .. }, "title", V::Text(v)) => *title = Some(v),
        (B::TwoColumn { left, .. }, "left", V::List(v)) => *left = v,
        (B::TwoColumn { right, .. }, "right", V::List(v)) => *right = v,

        (B::Quote { text, .. }, "text", V::Text(v)) => *text = Some(v),
        (B::Quote { author, .. }, "author", V::Text(v)) => *author = Some(v),

        (B::BigNumber { number, .. }, "number", V::Text(v)) => *number = Some(v),
        (B::BigNumber { label, .. }, "label", V::Text(v)) => *label = Some(v),
        (B::BigNumber { detail, .. }, "detail", V::Text(v)) => *detail = Some(v),

        (B::Grid { title, .. }, "title", V::Text(v)) => *title = Some(v),
        (B::Grid { items, .. }, "items", V::Items(v)) => *items = v,

        (B::Split { title, .. }, "title", V::Text(v)) => *title = Some(v),
        (B::Split { left, .. }, "left", V::Stat(v)) => *left = Some(v),
        (B::Split { right, .. }, "right", V::Stat(v)) => *right = Some(v),

        (B::Content { title, .. }, "title", V::Text(v)) => *title = Some(v),
        (B::Content { text, .. }, "text", V::Text(v)) => *text = Some(v),

        (B::Image { image, .. }, "image", V::Text(v)) => *image = Some(v),
        (B::Image { caption, .. }, "caption", V::Text(v)) => *caption = Some(v),

        (B::End { title, .. }, "title", V::Text(v)) => *title = Some(v),
        (B::End { cta, .. }, "cta", V::Text(v)) => *cta = Some(v),

        (body, field, value) => {
            return Err(Error::Field(format!(
                "'{}' slide has no field '{}' accepting {:?}",
                body.kind(),
                field,
                value
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content_slide(title: &str) -> Slide {
        Slide::new(SlideBody::Content {
            title: Some(title.to_string()),
            text: None,
        })
    }

    fn two_slide_editor() -> DeckEditor {
        let mut deck = Presentation::new("Test");
        deck.add_slide(content_slide("A"));
        deck.add_slide(content_slide("B"));
        DeckEditor::new(deck)
    }

    fn titles(editor: &DeckEditor) -> Vec<&str> {
        editor
            .presentation()
            .slides
            .iter()
            .map(|s| match &s.body {
                SlideBody::Content { title, .. } => title.as_deref().unwrap_or(""),
                _ => "",
            })
            .collect()
    }

    #[test]
    fn test_edit_field_replaces_one_field() {
        let mut editor = two_slide_editor();
        editor
            .edit_field(1, "text", FieldValue::Text("body".to_string()))
            .unwrap();

        match &editor.presentation().slides[1].body {
            SlideBody::Content { title, text } => {
                assert_eq!(title.as_deref(), Some("B"));
                assert_eq!(text.as_deref(), Some("body"));
            }
            other => panic!("unexpected slide body: {:?}", other),
        }
    }

    #[test]
    fn test_edit_field_out_of_range_is_an_index_error() {
        let mut editor = two_slide_editor();
        let err = editor
            .edit_field(5, "title", FieldValue::Text("x".to_string()))
            .unwrap_err();
        assert!(matches!(err, Error::Index { index: 5, len: 2 }));
    }

    #[test]
    fn test_edit_field_wrong_shape_is_a_field_error() {
        let mut editor = two_slide_editor();
        let err = editor
            .edit_field(0, "title", FieldValue::List(vec![]))
            .unwrap_err();
        assert!(matches!(err, Error::Field(_)));
    }

    #[test]
    fn test_edit_field_replaces_whole_array() {
        let mut deck = Presentation::new("Test");
        deck.add_slide(Slide::new(SlideBody::TwoColumn {
            title: None,
            left: vec!["old".to_string()],
            right: vec![],
        }));
        let mut editor = DeckEditor::new(deck);

        editor
            .edit_field(
                0,
                "left",
                FieldValue::List(vec!["new".to_string(), "bullets".to_string()]),
            )
            .unwrap();

        match &editor.presentation().slides[0].body {
            SlideBody::TwoColumn { left, .. } => {
                assert_eq!(left, &["new".to_string(), "bullets".to_string()]);
            }
            other => panic!("unexpected slide body: {:?}", other),
        }
    }

    #[test]
    fn test_insert_after_zero_lands_between() {
        let mut editor = two_slide_editor();
        editor.insert_slide(0, content_slide("X"));

        assert_eq!(titles(&editor), vec!["A", "X", "B"]);
        assert_eq!(editor.current_index(), 1);
    }

    #[test]
    fn test_insert_at_front_with_minus_one() {
        let mut editor = two_slide_editor();
        editor.insert_slide(-1, content_slide("X"));

        assert_eq!(titles(&editor), vec!["X", "A", "B"]);
        assert_eq!(editor.current_index(), 0);
    }

    #[test]
    fn test_insert_after_out_of_range_appends() {
        let mut editor = two_slide_editor();
        editor.insert_slide(99, content_slide("X"));

        assert_eq!(titles(&editor), vec!["A", "B", "X"]);
        assert_eq!(editor.current_index(), 2);
    }

    #[test]
    fn test_insert_at_extreme_indices_never_panics() {
        let mut editor = two_slide_editor();
        editor.insert_slide(isize::MAX, content_slide("X"));
        assert_eq!(titles(&editor), vec!["A", "B", "X"]);

        editor.insert_slide(isize::MIN, content_slide("Y"));
        assert_eq!(titles(&editor), vec!["Y", "A", "B", "X"]);
        assert_eq!(editor.current_index(), 0);
    }

    #[test]
    fn test_delete_clamps_current_index() {
        let mut editor = two_slide_editor();
        editor.set_current_index(1);
        editor.delete_slide(1);

        assert_eq!(editor.slide_count(), 1);
        assert_eq!(editor.current_index(), 0);
    }

    #[test]
    fn test_delete_only_slide_yields_empty_deck() {
        let mut deck = Presentation::new("Test");
        deck.add_slide(content_slide("A"));
        let mut editor = DeckEditor::new(deck);

        editor.delete_slide(0);
        assert_eq!(editor.slide_count(), 0);
        assert_eq!(editor.current_index(), 0);

        // Inserting into the empty deck recovers a one-slide deck.
        editor.insert_slide(-1, content_slide("B"));
        assert_eq!(editor.slide_count(), 1);
        assert_eq!(editor.current_index(), 0);
    }

    #[test]
    fn test_delete_out_of_range_is_a_no_op() {
        let mut editor = two_slide_editor();
        editor.delete_slide(7);
        assert_eq!(editor.slide_count(), 2);
    }

    #[test]
    fn test_customizations_merge_instead_of_replacing() {
        let mut editor = two_slide_editor();
        editor.set_customization(0, "title", Customization::FontSize(48.0));
        editor.set_customization(0, "subtitle", Customization::FontSize(24.0));

        let sizes = &editor.presentation().slides[0].font_sizes;
        assert_eq!(sizes.get("title"), Some(&48.0));
        assert_eq!(sizes.get("subtitle"), Some(&24.0));
    }

    #[test]
    fn test_customization_kinds_go_to_their_own_maps() {
        let mut editor = two_slide_editor();
        editor.set_customization(
            0,
            "title",
            Customization::Position(Offset { x: 5.0, y: -3.0 }),
        );
        editor.set_customization(0, "title", Customization::Rotation(12.5));

        let slide = &editor.presentation().slides[0];
        assert_eq!(slide.positions.get("title"), Some(&Offset { x: 5.0, y: -3.0 }));
        assert_eq!(slide.rotations.get("title"), Some(&12.5));
        assert!(slide.font_sizes.is_empty());
    }

    #[test]
    fn test_customization_out_of_range_is_a_no_op() {
        let mut editor = two_slide_editor();
        editor.set_customization(9, "title", Customization::FontSize(48.0));
        assert!(editor.presentation().slides[0].font_sizes.is_empty());
        assert!(editor.presentation().slides[1].font_sizes.is_empty());
    }
}
