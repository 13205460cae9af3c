//! Content fetching and document extraction: turning a URL or an
//! uploaded file into the text that deck synthesis works from.

pub mod document;
pub mod fetch;

pub use document::{extract_file, extract_text, DocumentFormat};
pub use fetch::{extract_page_content, fetch_page, PageContent, MAX_PAGE_CONTENT_CHARS};
