//! Orchestration: choose field orders, merge embedded content, decide
//! whether to substitute converted text for html

use crate::embedded::{RFC822_CONTENT_TYPE, extract_embedded};
use crate::error::Result;
use crate::extract::{distinct_field_values, extract_body};
use crate::linkify::to_html;
use crate::types::{BodyField, BodyMeta, ExtractedBodies, MessageNode, NodeField, ParsedSummary};
use tracing::debug;

/// Default lookup order for the HTML body
pub const DEFAULT_HTML_FIELD_ORDER: [BodyField; 3] = [
    BodyField::BodytextHtml,
    BodyField::MailparserHtml,
    BodyField::MailparserTextAsHtml,
];

/// Default lookup order for the text body
pub const DEFAULT_TEXT_FIELD_ORDER: [BodyField; 2] =
    [BodyField::BodytextPlain, BodyField::MailparserText];

// When an embedded message is present the secondary parser's result
// stays authoritative
const EMBEDDED_HTML_FIELD_ORDER: [BodyField; 2] =
    [BodyField::MailparserHtml, BodyField::MailparserTextAsHtml];
const EMBEDDED_TEXT_FIELD_ORDER: [BodyField; 2] =
    [BodyField::MailparserText, BodyField::BodytextPlain];

/// Extract the canonical html and text bodies of a message.
///
/// Runs the ordered field lookups for html and text, appends the bodies
/// of the first embedded `message/rfc822` part when one exists anywhere
/// in the tree, and substitutes text-derived HTML when the extracted
/// html is missing, parser-derived alongside a text result, or worse
/// encoded than the text.
pub async fn get_bodies(summary: &ParsedSummary, root: &MessageNode) -> Result<ExtractedBodies> {
    let has_embedded = distinct_field_values(root, NodeField::ContentType)
        .contains(RFC822_CONTENT_TYPE);

    let (html_order, text_order): (&[BodyField], &[BodyField]) = if has_embedded {
        (&EMBEDDED_HTML_FIELD_ORDER, &EMBEDDED_TEXT_FIELD_ORDER)
    } else {
        (&DEFAULT_HTML_FIELD_ORDER, &DEFAULT_TEXT_FIELD_ORDER)
    };

    debug!(has_embedded, "extracting html body");
    let mut html_info = extract_body(summary, root, html_order);
    debug!(has_embedded, "extracting text body");
    let mut text_info = extract_body(summary, root, text_order);

    if has_embedded {
        let embedded = extract_embedded(root).await?;
        html_info.result.push_str(&embedded.html);
        text_info.result.push_str(&embedded.text);
    }

    let use_text_for_html = html_info.result.is_empty()
        || (!text_info.result.is_empty()
            && html_info.source.is_some_and(BodyField::is_parser_derived))
        || (!html_info.has_valid_encoding && text_info.has_valid_encoding);

    if use_text_for_html {
        debug!("no html or an invalid html result, converting text result to html");
        html_info.result = to_html(&text_info.result);
        html_info.source = text_info.source;
    }

    Ok(ExtractedBodies {
        html: html_info.result,
        text: text_info.result,
        meta: BodyMeta {
            is_html_from_text: use_text_for_html,
            html_source: html_info.source,
            html_has_valid_encoding: html_info.has_valid_encoding,
            text_source: text_info.source,
            text_has_valid_encoding: text_info.has_valid_encoding,
        },
    })
}
