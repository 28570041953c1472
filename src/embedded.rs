//! Embedded `message/rfc822` extraction through a streaming re-parse

use crate::error::{ExtractError, Result};
use crate::extract::find_first_of_type;
use crate::types::MessageNode;
use futures::stream::{self, Stream};
use futures::{TryStreamExt, pin_mut};
use tracing::debug;

/// Content type marking a part whose body is a complete nested message
pub const RFC822_CONTENT_TYPE: &str = "message/rfc822";

/// Event emitted by the streaming message splitter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitterEvent {
    /// Start of a part; carries the part's raw header block
    Node { headers: String },

    /// Interstitial bytes between parts (boundary markers, preamble,
    /// epilogue)
    Data(String),

    /// Body bytes for the current part; a part may emit several of these
    Body(String),
}

/// Bodies accumulated from a nested message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmbeddedBodies {
    pub html: String,
    pub text: String,
}

/// Locate the first `message/rfc822` part of the tree and re-parse its
/// body, accumulating the html and text leaf bodies it contains.
pub async fn extract_embedded(root: &MessageNode) -> Result<EmbeddedBodies> {
    let node =
        find_first_of_type(root, RFC822_CONTENT_TYPE).ok_or(ExtractError::MissingEmbeddedPart)?;
    let raw = node.body_text.clone().unwrap_or_default();

    debug!(bytes = raw.len(), "re-parsing embedded message");
    let events = split_message(&raw);
    collect_bodies(events).await
}

/// Consume a splitter event stream, collecting `text/html;` and
/// `text/plain;` part bodies. Collection state is local to this call.
pub async fn collect_bodies<S>(events: S) -> Result<EmbeddedBodies>
where
    S: Stream<Item = Result<SplitterEvent>>,
{
    let mut collect_html = false;
    let mut collect_text = false;
    let mut bodies = EmbeddedBodies::default();

    pin_mut!(events);
    while let Some(event) = events.try_next().await? {
        match event {
            SplitterEvent::Node { headers } => {
                let content_type = content_type_token(&headers);
                collect_html = content_type == Some("text/html;");
                collect_text = content_type == Some("text/plain;");
            }
            // structure between parts, unrelated to any node body
            SplitterEvent::Data(_) => {}
            SplitterEvent::Body(chunk) => {
                if collect_html {
                    bodies.html.push_str(&chunk);
                }
                if collect_text {
                    bodies.text.push_str(&chunk);
                }
            }
        }
    }

    Ok(bodies)
}

/// The token following `Content-Type:` in a space-split header block
fn content_type_token(headers: &str) -> Option<&str> {
    let mut tokens = headers.split(' ');
    tokens.find(|token| *token == "Content-Type:")?;
    tokens.next()
}

/// Split a raw message into a terminating stream of splitter events
pub fn split_message(raw: &str) -> impl Stream<Item = Result<SplitterEvent>> + use<> {
    stream::iter(split_events(raw).into_iter().map(Ok))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Preamble,
    PartHeaders,
    PartBody,
    Epilogue,
}

fn split_events(raw: &str) -> Vec<SplitterEvent> {
    let mut events = Vec::new();

    let (headers, body) = split_header_block(raw);
    events.push(SplitterEvent::Node {
        headers: headers.to_string(),
    });

    let Some(boundary) = boundary_param(headers) else {
        if !body.is_empty() {
            events.push(SplitterEvent::Body(body.to_string()));
        }
        return events;
    };

    let open_marker = format!("--{boundary}");
    let close_marker = format!("--{boundary}--");

    let mut phase = Phase::Preamble;
    let mut buffer = String::new();

    for line in body.split_inclusive('\n') {
        let marker = line.trim_end();

        if phase != Phase::Epilogue && (marker == open_marker || marker == close_marker) {
            flush_buffer(&mut events, phase, &mut buffer);
            events.push(SplitterEvent::Data(line.to_string()));
            phase = if marker == close_marker {
                Phase::Epilogue
            } else {
                Phase::PartHeaders
            };
            continue;
        }

        if phase == Phase::PartHeaders && marker.is_empty() {
            flush_buffer(&mut events, phase, &mut buffer);
            phase = Phase::PartBody;
            continue;
        }

        buffer.push_str(line);
    }

    flush_buffer(&mut events, phase, &mut buffer);
    events
}

fn flush_buffer(events: &mut Vec<SplitterEvent>, phase: Phase, buffer: &mut String) {
    if buffer.is_empty() && phase != Phase::PartHeaders {
        return;
    }
    let content = std::mem::take(buffer);
    events.push(match phase {
        // an empty header block still marks a part start
        Phase::PartHeaders => SplitterEvent::Node { headers: content },
        Phase::PartBody => SplitterEvent::Body(content),
        Phase::Preamble | Phase::Epilogue => SplitterEvent::Data(content),
    });
}

/// Split a raw message at the first blank line into headers and body
fn split_header_block(raw: &str) -> (&str, &str) {
    if let Some(pos) = raw.find("\r\n\r\n") {
        (&raw[..pos + 2], &raw[pos + 4..])
    } else if let Some(pos) = raw.find("\n\n") {
        (&raw[..pos + 1], &raw[pos + 2..])
    } else {
        (raw, "")
    }
}

/// Extract the `boundary` parameter value from a header block
fn boundary_param(headers: &str) -> Option<String> {
    let lower = headers.to_ascii_lowercase();
    let idx = lower.find("boundary=")?;
    let rest = headers[idx + "boundary=".len()..].trim_start();

    let value = rest.strip_prefix('"').map_or_else(
        || {
            rest.split([';', ' ', '\t', '\r', '\n'])
                .next()
                .unwrap_or_default()
        },
        |quoted| quoted.split('"').next().unwrap_or_default(),
    );

    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
