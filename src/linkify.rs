//! Plain-text to HTML conversion with link detection

use regex::Regex;
use std::sync::LazyLock;

// `ftp:` is deliberately not recognized
static URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://[^\s<>\[\]{}|\\^]+").unwrap());

static FUZZY_EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").unwrap()
});

static FUZZY_LINK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)\b(?:
            www\.[a-z0-9-]+(?:\.[a-z0-9-]+)+
            |
            [a-z0-9][a-z0-9-]*(?:\.[a-z0-9-]+)*\.(?:com|org|net|edu|gov|io|co|me|info|biz|dev|app)\b
        )(?::\d{1,5})?(?:/[^\s<>]*)?",
    )
    .unwrap()
});

static FUZZY_IP_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:\d{1,3}\.){3}\d{1,3}\b(?::\d{1,5})?(?:/[^\s<>]*)?").unwrap()
});

static TRAILING_WS_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)[ \t]+$").unwrap());

static PARAGRAPH_BREAK_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\n+").unwrap());

/// Longest social handle accepted after a `@`
const MAX_HANDLE_LEN: usize = 15;

const EMPTY_PARAGRAPH: &str = "<p></p>";

/// A link found inside a single token
#[derive(Debug, Clone)]
struct LinkMatch {
    start: usize,
    end: usize,
    url: String,
}

/// Convert plain text into an HTML fragment.
///
/// Tokens are split on literal spaces and link-like substrings become
/// anchors; blank lines become paragraph breaks and remaining newlines
/// become `<br/>`. Empty input yields empty output.
#[must_use]
pub fn to_html(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let words: Vec<String> = text.split(' ').map(linkify_word).collect();

    let mut html = format!("<p>{}</p>", words.join(" "));
    html = html.replace("\r\n", "\n");
    html = TRAILING_WS_REGEX.replace_all(&html, "").into_owned();
    html = PARAGRAPH_BREAK_REGEX
        .replace_all(&html, "</p><p>")
        .into_owned();
    html = html.replace('\n', "<br/>").trim().to_string();

    // degenerate input can leave empty paragraphs at either edge
    while let Some(rest) = html.strip_prefix(EMPTY_PARAGRAPH) {
        html = rest.trim().to_string();
    }
    while let Some(rest) = html.strip_suffix(EMPTY_PARAGRAPH) {
        html = rest.trim().to_string();
    }

    html
}

fn linkify_word(word: &str) -> String {
    let matches = link_matches(word);
    if matches.is_empty() {
        return word.to_string();
    }

    let mut out = word.to_string();
    // replace backwards so earlier match offsets stay valid
    for m in matches.iter().rev() {
        let anchor = format!("<a href=\"{}\">{}</a>", m.url, &word[m.start..m.end]);
        out.replace_range(m.start..m.end, &anchor);
    }
    out.trim().to_string()
}

/// All non-overlapping link matches in a token, earliest-first
fn link_matches(token: &str) -> Vec<LinkMatch> {
    let mut matches = Vec::new();

    for m in URL_REGEX.find_iter(token) {
        matches.push(LinkMatch {
            start: m.start(),
            end: m.end(),
            url: m.as_str().to_string(),
        });
    }

    for m in FUZZY_EMAIL_REGEX.find_iter(token) {
        matches.push(LinkMatch {
            start: m.start(),
            end: m.end(),
            url: format!("mailto:{}", m.as_str()),
        });
    }

    for m in FUZZY_LINK_REGEX.find_iter(token) {
        matches.push(LinkMatch {
            start: m.start(),
            end: m.end(),
            url: format!("http://{}", m.as_str()),
        });
    }

    for m in FUZZY_IP_REGEX.find_iter(token) {
        matches.push(LinkMatch {
            start: m.start(),
            end: m.end(),
            url: format!("http://{}", m.as_str()),
        });
    }

    handle_matches(token, &mut matches);

    // earliest match wins; on a tie the longest; overlaps are dropped
    matches.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));
    let mut kept: Vec<LinkMatch> = Vec::new();
    for m in matches {
        if kept.last().is_none_or(|last| m.start >= last.end) {
            kept.push(m);
        }
    }
    kept
}

/// Social handles: `@` followed by 1-15 word characters. A run longer
/// than 15 is not a handle, and `@@name` is rejected outright.
fn handle_matches(token: &str, matches: &mut Vec<LinkMatch>) {
    let bytes = token.as_bytes();

    for (i, _) in token.match_indices('@') {
        if i > 0 {
            let prev = bytes[i - 1];
            if prev == b'@' || prev.is_ascii_alphanumeric() {
                continue;
            }
        }

        let tail = &token[i + 1..];
        let run = tail
            .bytes()
            .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
            .count();
        if run == 0 || run > MAX_HANDLE_LEN {
            continue;
        }

        matches.push(LinkMatch {
            start: i,
            end: i + 1 + run,
            url: format!("https://twitter.com/{}", &tail[..run]),
        });
    }
}
