use email_bodies::to_html;

#[test]
fn test_empty_input() {
    assert_eq!(to_html(""), "");
}

#[test]
fn test_plain_words_wrapped_in_paragraph() {
    assert_eq!(to_html("hello world"), "<p>hello world</p>");
}

#[test]
fn test_url_becomes_anchor() {
    let html = to_html("Check http://example.com now");

    assert!(html.contains("<a href=\"http://example.com\">http://example.com</a>"));
    assert!(html.starts_with("<p>Check "));
    assert!(html.ends_with(" now</p>"));
    assert_eq!(html.matches("<p>").count(), 1);
}

#[test]
fn test_handle_becomes_profile_link() {
    let html = to_html("@jack hello");

    assert!(html.contains("<a href=\"https://twitter.com/jack\">@jack</a>"));
}

#[test]
fn test_doubled_at_is_not_a_handle() {
    let html = to_html("@@jack");

    assert!(!html.contains("<a"));
    assert_eq!(html, "<p>@@jack</p>");
}

#[test]
fn test_handle_longer_than_fifteen_chars_rejected() {
    let html = to_html("@abcdefghijklmnop");

    assert!(!html.contains("<a"));
}

#[test]
fn test_blank_line_becomes_paragraph_break() {
    assert_eq!(to_html("a\n\nb"), "<p>a</p><p>b</p>");
}

#[test]
fn test_crlf_normalized() {
    assert_eq!(to_html("a\r\n\r\nb"), "<p>a</p><p>b</p>");
}

#[test]
fn test_single_newline_becomes_line_break() {
    assert_eq!(to_html("a\nb"), "<p>a<br/>b</p>");
}

#[test]
fn test_trailing_whitespace_stripped_per_line() {
    assert_eq!(to_html("one  \ntwo"), "<p>one<br/>two</p>");
}

#[test]
fn test_edge_empty_paragraphs_stripped() {
    assert_eq!(to_html("\n\nhello\n\n"), "<p>hello</p>");
}

#[test]
fn test_fuzzy_www_link() {
    let html = to_html("visit www.example.com today");

    assert!(html.contains("<a href=\"http://www.example.com\">www.example.com</a>"));
}

#[test]
fn test_fuzzy_ip_link() {
    let html = to_html("ping 10.0.0.1 now");

    assert!(html.contains("<a href=\"http://10.0.0.1\">10.0.0.1</a>"));
}

#[test]
fn test_fuzzy_email_link() {
    let html = to_html("mail me@example.com please");

    assert!(html.contains("<a href=\"mailto:me@example.com\">me@example.com</a>"));
}

#[test]
fn test_email_not_treated_as_handle() {
    let html = to_html("mail me@example.com please");

    assert!(!html.contains("twitter.com"));
}

#[test]
fn test_ftp_scheme_not_linkified() {
    let html = to_html("get ftp://files.example.com now");

    assert!(!html.contains("href=\"ftp:"));
}

#[test]
fn test_multiple_links_in_one_token() {
    // no spaces, so both urls sit in one token
    let html = to_html("http://a.example.com,http://b.example.com");

    assert!(html.contains("<a href=\"http://a.example.com,http://b.example.com\">"));
}

#[test]
fn test_scheme_url_wins_over_fuzzy_domain() {
    let html = to_html("see https://example.com/page ok");

    assert_eq!(html.matches("<a ").count(), 1);
    assert!(html.contains("href=\"https://example.com/page\""));
}
