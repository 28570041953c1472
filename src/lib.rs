// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! Email Body Extraction
//!
//! Resolves the canonical HTML and plain-text bodies of a parsed
//! multipart message, choosing between raw MIME parts and a secondary
//! parser's best-effort output through a deterministic fallback order,
//! and synthesizing HTML from plain text when no trustworthy HTML
//! exists.
//!
//! # Features
//!
//! - Ordered field-source fallback with provenance metadata
//! - Depth-first body location by content type
//! - Embedded `message/rfc822` re-parsing and merging
//! - Plain-text to HTML conversion with link and handle detection
//!
//! # Example
//!
//! ```rust
//! use email_bodies::{get_bodies, parse_message};
//!
//! let raw = b"From: sender@example.com\r\n\
//!             Subject: Hello\r\n\
//!             Content-Type: text/plain\r\n\
//!             \r\n\
//!             See http://example.com";
//!
//! let (summary, tree) = parse_message(raw).unwrap();
//! let bodies = futures::executor::block_on(get_bodies(&summary, &tree)).unwrap();
//!
//! assert!(bodies.html.contains("<a href=\"http://example.com\">"));
//! assert!(bodies.text.contains("See"));
//! ```

mod bodies;
mod embedded;
mod error;
mod extract;
mod linkify;
mod tree;
mod types;

pub use bodies::{DEFAULT_HTML_FIELD_ORDER, DEFAULT_TEXT_FIELD_ORDER, get_bodies};
pub use embedded::{
    EmbeddedBodies, RFC822_CONTENT_TYPE, SplitterEvent, collect_bodies, extract_embedded,
    split_message,
};
pub use error::{ExtractError, Result};
pub use extract::{
    FoundBody, distinct_field_values, extract_body, find_body_of_type, find_first_of_type,
};
pub use linkify::to_html;
pub use tree::{build_summary, build_tree, parse_message};
pub use types::*;
