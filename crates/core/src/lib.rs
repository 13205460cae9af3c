//! Core domain types, placeholder resolution, deck editing, and the
//! session state machine for AI-synthesized slide decks.

pub mod editor;
pub mod error;
pub mod resolver;
pub mod session;
pub mod types;

pub use editor::{Customization, DeckEditor, FieldValue};
pub use error::{Error, Result};
pub use resolver::{resolve_placeholders, MAX_USER_IMAGES};
pub use session::{RequestToken, Session, SessionPhase};
pub use types::{GridItem, Offset, Presentation, Slide, SlideBody, Stat};
