//! Domain types for a generated slide deck.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An entire deck: a title plus slides in presentation order.
///
/// A `Presentation` is built atomically from the synthesizer's parsed
/// output. After placeholder resolution the deck editor owns the single
/// live copy; every mutation goes through it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Presentation {
    pub title: String,

    /// Slides in presentation order. Index is positional, not an identity.
    #[serde(default)]
    pub slides: Vec<Slide>,
}

impl Presentation {
    /// Create an empty presentation with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            slides: Vec::new(),
        }
    }

    /// Append a slide to the end of the deck.
    pub fn add_slide(&mut self, slide: Slide) {
        self.slides.push(slide);
    }
}

/// One slide: its typed content plus per-field visual overrides.
///
/// The customization maps persist user-made adjustments (drag offsets,
/// font sizes, rotations) keyed by a stable field key such as `"title"`,
/// `"left_0"`, or `"grid_2"`. Keys for fields that no longer exist are
/// tolerated and simply never referenced by a renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    #[serde(flatten)]
    pub body: SlideBody,

    /// Per-field drag offsets.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub positions: HashMap<String, Offset>,

    /// Per-field font size overrides.
    #[serde(
        default,
        rename = "fontSizes",
        skip_serializing_if = "HashMap::is_empty"
    )]
    pub font_sizes: HashMap<String, f64>,

    /// Per-field rotations in degrees.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub rotations: HashMap<String, f64>,
}

impl Slide {
    /// Create a slide with no customizations.
    pub fn new(body: SlideBody) -> Self {
        Self {
            body,
            positions: HashMap::new(),
            font_sizes: HashMap::new(),
            rotations: HashMap::new(),
        }
    }

    /// The default slide produced by a plain "add slide" action.
    pub fn new_content() -> Self {
        Self::new(SlideBody::Content {
            title: Some("New Slide".to_string()),
            text: Some("Click to edit this text.".to_string()),
        })
    }

    /// The default slide produced by an "add image" action.
    pub fn new_image(reference: impl Into<String>) -> Self {
        Self::new(SlideBody::Image {
            image: Some(reference.into()),
            caption: Some("Add a caption".to_string()),
        })
    }

    /// Wire name of this slide's variant (the `type` tag).
    pub fn kind(&self) -> &'static str {
        self.body.kind()
    }
}

/// Slide content, tagged by the `type` field on the wire.
///
/// `left`/`right` homogeneity is enforced by the type system: `two-column`
/// carries string arrays, `split` carries [`Stat`] records. The variants
/// can never mix the two within one slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SlideBody {
    Title {
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        subtitle: Option<String>,
    },
    Statement {
        #[serde(skip_serializing_if = "Option::is_none")]
        text: Option<String>,
    },
    TwoColumn {
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        left: Vec<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        right: Vec<String>,
    },
    Quote {
        #[serde(skip_serializing_if = "Option::is_none")]
        text: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        author: Option<String>,
    },
    BigNumber {
        #[serde(skip_serializing_if = "Option::is_none")]
        number: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        detail: Option<String>,
    },
    Grid {
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        items: Vec<GridItem>,
    },
    Split {
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        left: Option<Stat>,
        #[serde(skip_serializing_if = "Option::is_none")]
        right: Option<Stat>,
    },
    Content {
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        text: Option<String>,
    },
    Image {
        #[serde(skip_serializing_if = "Option::is_none")]
        image: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
    },
    End {
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        cta: Option<String>,
    },
}

impl SlideBody {
    /// Wire name of this variant (the `type` tag).
    pub fn kind(&self) -> &'static str {
        match self {
            SlideBody::Title { .. } => "title",
            SlideBody::Statement { .. } => "statement",
            SlideBody::TwoColumn { .. } => "two-column",
            SlideBody::Quote { .. } => "quote",
            SlideBody::BigNumber { .. } => "big-number",
            SlideBody::Grid { .. } => "grid",
            SlideBody::Split { .. } => "split",
            SlideBody::Content { .. } => "content",
            SlideBody::Image { .. } => "image",
            SlideBody::End { .. } => "end",
        }
    }
}

/// One cell of a `grid` slide.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GridItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// One half of a `split` slide: a titled headline statistic.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Stat {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// A drag offset from a field's themed resting position.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}
