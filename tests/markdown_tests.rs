use plog_backend::utils::markdown::{safe_markdown_to_html, sanitize_markdown_content};

#[test]
fn renders_basic_markdown() {
    let html = safe_markdown_to_html("# Preview\n\nSome *emphasis* here.");
    assert!(html.contains("<h1>Preview</h1>"));
    assert!(html.contains("<em>emphasis</em>"));
}

#[test]
fn renders_fenced_code_blocks() {
    let html = safe_markdown_to_html("```rust\nfn main() {}\n```");
    assert!(html.contains("<code"));
}

#[test]
fn strips_inline_event_handlers() {
    let html = sanitize_markdown_content(r#"<a href="https://x.example" onclick="evil()">x</a>"#);
    assert!(!html.contains("onclick"));
}

#[test]
fn strips_script_tags_entirely() {
    let html = safe_markdown_to_html("before <script>alert('x')</script> after");
    assert!(!html.contains("script"));
    assert!(html.contains("before"));
    assert!(html.contains("after"));
}
