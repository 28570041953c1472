//! Tree walking and ordered field-source selection

use crate::types::{BodyField, ExtractionResult, MessageNode, NodeField, ParsedSummary};
use std::collections::BTreeSet;
use tracing::{debug, trace};

/// Body text located by a tree walk, with its encoding-validity signal
#[derive(Debug, Clone, Default)]
pub struct FoundBody {
    /// The located body, or empty when no part matched
    pub text: String,

    /// True only when the winning node carried a non-broken encoding
    /// marker and a decoded body
    pub has_valid_encoding: bool,
}

/// Depth-first search for the first part whose content type contains
/// `target` (case-insensitive) and which carries body content.
///
/// A decoded body behind a non-broken encoding marker is returned as-is
/// and flagged valid. Otherwise the raw body is returned, passed through
/// HTML-entity decoding when looking for `text/html`.
#[must_use]
pub fn find_body_of_type(node: &MessageNode, target: &str) -> FoundBody {
    let mut has_valid_encoding = false;
    let text = walk_for_body(node, target, &mut has_valid_encoding, 0);
    FoundBody {
        text,
        has_valid_encoding,
    }
}

fn walk_for_body(node: &MessageNode, target: &str, valid: &mut bool, depth: usize) -> String {
    let is_requested_type = node
        .content_type
        .as_ref()
        .is_some_and(|ct| ct.to_lowercase().contains(target));

    if is_requested_type && node.has_body() {
        trace!(depth, content_type = ?node.content_type, "found body of requested type");

        if let Some(encoding) = &node.body_encoding
            && !encoding.contains("broken")
            && let Some(text) = &node.body_text
            && !text.is_empty()
        {
            *valid = true;
            return text.clone();
        }

        let raw = node.body_text_encoded.clone().unwrap_or_default();
        return if target == "text/html" {
            htmlescape::decode_html(&raw).unwrap_or(raw)
        } else {
            raw
        };
    }

    if node.children.is_empty() {
        return String::new();
    }

    let mut childs_body_text = String::new();
    for child in &node.children {
        if !childs_body_text.is_empty() {
            break;
        }
        childs_body_text = walk_for_body(child, target, valid, depth + 1);
    }

    childs_body_text.trim().to_string()
}

/// Gather the distinct values of one node attribute across the whole tree
#[must_use]
pub fn distinct_field_values(node: &MessageNode, field: NodeField) -> BTreeSet<String> {
    let mut values = BTreeSet::new();
    collect_values(node, field, &mut values);
    values
}

fn collect_values(node: &MessageNode, field: NodeField, values: &mut BTreeSet<String>) {
    let value = match field {
        NodeField::ContentType => &node.content_type,
        NodeField::BodyEncoding => &node.body_encoding,
    };
    if let Some(value) = value {
        values.insert(value.clone());
    }
    for child in &node.children {
        collect_values(child, field, values);
    }
}

/// Pre-order search for the first node whose content type contains `target`
#[must_use]
pub fn find_first_of_type<'a>(node: &'a MessageNode, target: &str) -> Option<&'a MessageNode> {
    if node
        .content_type
        .as_ref()
        .is_some_and(|ct| ct.contains(target))
    {
        return Some(node);
    }
    node.children
        .iter()
        .find_map(|child| find_first_of_type(child, target))
}

/// Apply an ordered list of body fields against the tree and summary,
/// stopping at the first non-empty lookup.
///
/// The encoding-validity signal is sticky across the tree walks made
/// before the loop stops; summary lookups never set it.
#[must_use]
pub fn extract_body(
    summary: &ParsedSummary,
    root: &MessageNode,
    field_order: &[BodyField],
) -> ExtractionResult {
    let mut result = String::new();
    let mut source = None;
    let mut has_valid_encoding = false;

    for &field in field_order {
        if !result.is_empty() {
            break;
        }

        result = match field {
            BodyField::BodytextHtml => {
                let found = find_body_of_type(root, "text/html");
                has_valid_encoding = has_valid_encoding || found.has_valid_encoding;
                found.text
            }
            BodyField::BodytextPlain => {
                let found = find_body_of_type(root, "text/plain");
                has_valid_encoding = has_valid_encoding || found.has_valid_encoding;
                found.text
            }
            BodyField::MailparserHtml => summary.html.clone().unwrap_or_default(),
            BodyField::MailparserTextAsHtml => summary.text_as_html.clone().unwrap_or_default(),
            BodyField::MailparserText => summary.text.clone().unwrap_or_default(),
        };

        if !result.is_empty() {
            source = Some(field);
            debug!(field = %field, "body field lookup hit");
        }
    }

    ExtractionResult {
        result,
        source,
        has_valid_encoding,
    }
}
