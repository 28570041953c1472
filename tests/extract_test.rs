use email_bodies::{
    BodyField, MessageNode, NodeField, ParsedSummary, distinct_field_values, extract_body,
    find_body_of_type, find_first_of_type,
};

fn leaf(content_type: &str, body: &str, encoding: Option<&str>) -> MessageNode {
    MessageNode {
        content_type: Some(content_type.to_string()),
        body_text: Some(body.to_string()),
        body_encoding: encoding.map(str::to_string),
        ..MessageNode::default()
    }
}

fn tree(children: Vec<MessageNode>) -> MessageNode {
    MessageNode {
        content_type: Some("multipart/mixed".to_string()),
        children,
        ..MessageNode::default()
    }
}

#[test]
fn test_walker_finds_decoded_body() {
    let root = tree(vec![
        leaf("text/plain", "plain body", Some("7bit")),
        leaf("text/html", "<p>html body</p>", Some("quoted-printable")),
    ]);

    let found = find_body_of_type(&root, "text/html");

    assert_eq!(found.text, "<p>html body</p>");
    assert!(found.has_valid_encoding);
}

#[test]
fn test_walker_match_is_case_insensitive() {
    let root = tree(vec![leaf("TEXT/HTML", "<p>upper</p>", Some("7bit"))]);

    let found = find_body_of_type(&root, "text/html");

    assert_eq!(found.text, "<p>upper</p>");
}

#[test]
fn test_walker_first_child_wins() {
    let root = tree(vec![
        leaf("text/plain", "first", Some("7bit")),
        leaf("text/plain", "second", Some("7bit")),
    ]);

    let found = find_body_of_type(&root, "text/plain");

    assert_eq!(found.text, "first");
}

#[test]
fn test_walker_trims_child_results() {
    let root = tree(vec![leaf("text/plain", "\n  padded  \n", Some("7bit"))]);

    let found = find_body_of_type(&root, "text/plain");

    assert_eq!(found.text, "padded");
}

#[test]
fn test_walker_broken_encoding_falls_back_to_raw() {
    let node = MessageNode {
        content_type: Some("text/plain".to_string()),
        body_text: Some("decoded".to_string()),
        body_text_encoded: Some("raw text".to_string()),
        body_encoding: Some("quoted-printable/broken".to_string()),
        ..MessageNode::default()
    };

    let found = find_body_of_type(&node, "text/plain");

    assert_eq!(found.text, "raw text");
    assert!(!found.has_valid_encoding);
}

#[test]
fn test_walker_decodes_entities_for_html_raw_fallback() {
    let node = MessageNode {
        content_type: Some("text/html".to_string()),
        body_text_encoded: Some("&lt;b&gt;hi&lt;/b&gt;".to_string()),
        ..MessageNode::default()
    };

    let found = find_body_of_type(&node, "text/html");

    assert_eq!(found.text, "<b>hi</b>");
    assert!(!found.has_valid_encoding);
}

#[test]
fn test_walker_no_match_yields_empty() {
    let root = tree(vec![leaf("image/png", "bytes", Some("base64"))]);

    let found = find_body_of_type(&root, "text/html");

    assert_eq!(found.text, "");
    assert!(!found.has_valid_encoding);
}

#[test]
fn test_walker_encoding_flag_sticks_across_search() {
    // a whitespace-only decoded body wins its subtree, then trims to
    // nothing at the parent; the validity signal survives anyway
    let root = tree(vec![leaf("text/plain", "   ", Some("7bit"))]);

    let found = find_body_of_type(&root, "text/plain");

    assert_eq!(found.text, "");
    assert!(found.has_valid_encoding);
}

#[test]
fn test_distinct_field_values_deduplicates() {
    let root = tree(vec![
        leaf("text/plain", "a", None),
        leaf("text/plain", "b", None),
        leaf("message/rfc822", "c", None),
    ]);

    let values = distinct_field_values(&root, NodeField::ContentType);

    assert_eq!(values.len(), 3);
    assert!(values.contains("multipart/mixed"));
    assert!(values.contains("text/plain"));
    assert!(values.contains("message/rfc822"));
}

#[test]
fn test_distinct_field_values_body_encoding() {
    let root = tree(vec![
        leaf("text/plain", "a", Some("7bit")),
        leaf("text/html", "b", Some("7bit")),
    ]);

    let values = distinct_field_values(&root, NodeField::BodyEncoding);

    assert_eq!(values.len(), 1);
    assert!(values.contains("7bit"));
}

#[test]
fn test_find_first_of_type_preorder() {
    let nested = MessageNode {
        content_type: Some("multipart/mixed".to_string()),
        children: vec![leaf("message/rfc822", "inner", None)],
        ..MessageNode::default()
    };
    let root = tree(vec![nested, leaf("message/rfc822", "outer", None)]);

    let node = find_first_of_type(&root, "message/rfc822").unwrap();

    assert_eq!(node.body_text.as_deref(), Some("inner"));
}

#[test]
fn test_find_first_of_type_missing() {
    let root = tree(vec![leaf("text/plain", "a", None)]);

    assert!(find_first_of_type(&root, "message/rfc822").is_none());
}

#[test]
fn test_selector_stops_at_first_non_empty() {
    let root = tree(vec![leaf("text/html", "<p>tree html</p>", Some("7bit"))]);
    let summary = ParsedSummary {
        html: Some("<p>summary html</p>".to_string()),
        ..ParsedSummary::default()
    };

    let info = extract_body(
        &summary,
        &root,
        &[BodyField::BodytextHtml, BodyField::MailparserHtml],
    );

    assert_eq!(info.result, "<p>tree html</p>");
    assert_eq!(info.source, Some(BodyField::BodytextHtml));
    assert!(info.has_valid_encoding);
}

#[test]
fn test_selector_falls_through_to_summary() {
    let root = tree(vec![]);
    let summary = ParsedSummary {
        html: Some("<p>summary html</p>".to_string()),
        ..ParsedSummary::default()
    };

    let info = extract_body(
        &summary,
        &root,
        &[BodyField::BodytextHtml, BodyField::MailparserHtml],
    );

    assert_eq!(info.result, "<p>summary html</p>");
    assert_eq!(info.source, Some(BodyField::MailparserHtml));
    assert!(!info.has_valid_encoding);
}

#[test]
fn test_selector_source_is_none_iff_empty() {
    let root = tree(vec![]);
    let summary = ParsedSummary::default();

    let info = extract_body(
        &summary,
        &root,
        &[
            BodyField::BodytextHtml,
            BodyField::MailparserHtml,
            BodyField::MailparserTextAsHtml,
        ],
    );

    assert_eq!(info.result, "");
    assert_eq!(info.source, None);
}

#[test]
fn test_selector_keeps_validity_from_earlier_walks() {
    // the whitespace quirk again, this time through the fallback chain
    let root = tree(vec![leaf("text/plain", "   ", Some("7bit"))]);
    let summary = ParsedSummary {
        text: Some("fallback".to_string()),
        ..ParsedSummary::default()
    };

    let info = extract_body(
        &summary,
        &root,
        &[BodyField::BodytextPlain, BodyField::MailparserText],
    );

    assert_eq!(info.result, "fallback");
    assert_eq!(info.source, Some(BodyField::MailparserText));
    assert!(info.has_valid_encoding);
}

#[test]
fn test_selector_text_as_html_field() {
    let summary = ParsedSummary {
        text_as_html: Some("<p>rendered</p>".to_string()),
        ..ParsedSummary::default()
    };

    let info = extract_body(
        &summary,
        &tree(vec![]),
        &[BodyField::MailparserTextAsHtml],
    );

    assert_eq!(info.result, "<p>rendered</p>");
    assert_eq!(info.source, Some(BodyField::MailparserTextAsHtml));
}
