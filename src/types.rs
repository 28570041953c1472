//! Core types for body extraction

use serde::{Deserialize, Serialize};
use std::fmt;

/// One part of a parsed MIME message tree, as produced by an upstream
/// tree parser. The tree is read-only for the duration of an extraction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageNode {
    /// Content type of this part (e.g. `text/html`)
    pub content_type: Option<String>,

    /// Decoded body text, present when the upstream parser decoded the part
    pub body_text: Option<String>,

    /// Raw body text, transfer-decoded but otherwise untouched
    pub body_text_encoded: Option<String>,

    /// Encoding marker from the upstream parser; contains `broken` when
    /// the part could not be decoded properly
    pub body_encoding: Option<String>,

    /// Child parts, in message order
    pub children: Vec<MessageNode>,
}

impl MessageNode {
    /// Create an empty node of the given content type
    pub fn new(content_type: impl Into<String>) -> Self {
        Self {
            content_type: Some(content_type.into()),
            ..Self::default()
        }
    }

    /// Whether this part carries any body content, decoded or raw
    #[must_use]
    pub fn has_body(&self) -> bool {
        self.body_text.as_ref().is_some_and(|t| !t.is_empty())
            || self
                .body_text_encoded
                .as_ref()
                .is_some_and(|t| !t.is_empty())
    }
}

/// The secondary parser's best-effort view of the same message
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsedSummary {
    /// HTML body, if the parser found one
    pub html: Option<String>,

    /// Plain text rendered to HTML by the parser
    pub text_as_html: Option<String>,

    /// Plain text body, if the parser found one
    pub text: Option<String>,
}

/// Identifies which source a body lookup reads from.
///
/// The `bodytext_*` fields walk the MIME tree; the `mailparser_*` fields
/// read the secondary parser's summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyField {
    BodytextHtml,
    BodytextPlain,
    MailparserHtml,
    MailparserTextAsHtml,
    MailparserText,
}

impl BodyField {
    /// Label for this field as used in extraction metadata
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BodytextHtml => "bodytext_html",
            Self::BodytextPlain => "bodytext_plain",
            Self::MailparserHtml => "mailparser_html",
            Self::MailparserTextAsHtml => "mailparser_text_as_html",
            Self::MailparserText => "mailparser_text",
        }
    }

    /// True for fields sourced from the secondary parser's summary
    #[must_use]
    pub const fn is_parser_derived(self) -> bool {
        matches!(
            self,
            Self::MailparserHtml | Self::MailparserTextAsHtml | Self::MailparserText
        )
    }
}

impl fmt::Display for BodyField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Node attributes the distinct-value collector can gather
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeField {
    ContentType,
    BodyEncoding,
}

/// Outcome of one ordered field lookup
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// The first non-empty body found, or empty
    pub result: String,

    /// The field that produced the result; `None` when nothing matched
    #[serde(with = "source_label")]
    pub source: Option<BodyField>,

    /// Set only when the winning tree node had a non-broken encoding
    /// marker and a decoded body
    pub has_valid_encoding: bool,
}

/// Final output of body extraction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedBodies {
    /// Canonical HTML body
    pub html: String,

    /// Canonical plain-text body
    pub text: String,

    /// Provenance metadata for both bodies
    pub meta: BodyMeta,
}

/// Provenance of the extracted bodies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyMeta {
    /// The HTML body was synthesized from the text body
    pub is_html_from_text: bool,

    /// Field that produced the HTML body
    #[serde(with = "source_label")]
    pub html_source: Option<BodyField>,

    /// Encoding validity of the HTML result
    pub html_has_valid_encoding: bool,

    /// Field that produced the text body
    #[serde(with = "source_label")]
    pub text_source: Option<BodyField>,

    /// Encoding validity of the text result
    pub text_has_valid_encoding: bool,
}

/// Serializes an optional body field as its label, with `"none"` for absence
mod source_label {
    use super::BodyField;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(
        source: &Option<BodyField>,
        ser: S,
    ) -> Result<S::Ok, S::Error> {
        match source {
            Some(field) => field.serialize(ser),
            None => ser.serialize_str("none"),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Option<BodyField>, D::Error> {
        #[derive(Deserialize)]
        #[serde(rename_all = "snake_case")]
        enum Label {
            BodytextHtml,
            BodytextPlain,
            MailparserHtml,
            MailparserTextAsHtml,
            MailparserText,
            None,
        }

        Ok(match Label::deserialize(de)? {
            Label::BodytextHtml => Some(BodyField::BodytextHtml),
            Label::BodytextPlain => Some(BodyField::BodytextPlain),
            Label::MailparserHtml => Some(BodyField::MailparserHtml),
            Label::MailparserTextAsHtml => Some(BodyField::MailparserTextAsHtml),
            Label::MailparserText => Some(BodyField::MailparserText),
            Label::None => None,
        })
    }
}
