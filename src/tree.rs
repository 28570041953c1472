//! Adapters from raw message bytes to the extraction input model

use crate::error::{ExtractError, Result};
use crate::linkify::to_html;
use crate::types::{MessageNode, ParsedSummary};
use mailparse::{MailHeaderMap, ParsedMail};

/// Parse raw message bytes into the best-effort summary and the MIME
/// part tree consumed by body extraction
pub fn parse_message(raw: &[u8]) -> Result<(ParsedSummary, MessageNode)> {
    let parsed = mailparse::parse_mail(raw).map_err(|e| ExtractError::Structure(e.to_string()))?;
    Ok((build_summary(&parsed), build_tree(&parsed)))
}

/// Build a `MessageNode` tree mirroring the parsed part structure.
///
/// Leaves carry both the decoded and the raw body; a part whose body
/// cannot be decoded gets its encoding marker suffixed with `broken`.
#[must_use]
pub fn build_tree(parsed: &ParsedMail) -> MessageNode {
    let mut node = MessageNode::new(parsed.ctype.mimetype.to_lowercase());

    if parsed.subparts.is_empty() {
        let encoding = parsed
            .headers
            .get_first_value("content-transfer-encoding")
            .unwrap_or_else(|| "7bit".to_string())
            .to_lowercase();

        node.body_text_encoded = parsed
            .get_body_raw()
            .ok()
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned());

        match parsed.get_body() {
            Ok(body) => {
                node.body_text = Some(body);
                node.body_encoding = Some(encoding);
            }
            Err(_) => {
                node.body_encoding = Some(format!("{encoding}/broken"));
            }
        }
    }

    node.children = parsed.subparts.iter().map(build_tree).collect();
    node
}

/// Best-effort summary of a parsed message: the first `text/plain` and
/// `text/html` leaves win, and `text_as_html` is rendered from the text
#[must_use]
pub fn build_summary(parsed: &ParsedMail) -> ParsedSummary {
    let mut text = String::new();
    let mut html: Option<String> = None;

    if parsed.subparts.is_empty() {
        let content_type = parsed.ctype.mimetype.to_lowercase();
        if let Ok(body) = parsed.get_body() {
            if content_type.contains("text/html") {
                html = Some(body);
            } else {
                text = body;
            }
        }
    } else {
        collect_summary(parsed, &mut text, &mut html);
    }

    let text_as_html = if text.is_empty() {
        None
    } else {
        Some(to_html(&text))
    };

    ParsedSummary {
        html,
        text_as_html,
        text: if text.is_empty() { None } else { Some(text) },
    }
}

fn collect_summary(parsed: &ParsedMail, text: &mut String, html: &mut Option<String>) {
    for part in &parsed.subparts {
        let content_type = part.ctype.mimetype.to_lowercase();

        if part.subparts.is_empty() {
            if let Ok(body) = part.get_body() {
                if content_type.contains("text/plain") && text.is_empty() {
                    *text = body;
                } else if content_type.contains("text/html") && html.is_none() {
                    *html = Some(body);
                }
            }
        } else {
            collect_summary(part, text, html);
        }
    }
}
