use ammonia::{Builder, UrlRelative};
use pulldown_cmark::{html, Options, Parser};

/// Converts Markdown content to sanitized HTML to prevent XSS attacks.
pub fn safe_markdown_to_html(markdown: &str) -> String {
    let options = Options::all();
    let parser = Parser::new_ext(markdown, options);

    let mut raw_html = String::with_capacity(markdown.len() * 2);
    html::push_html(&mut raw_html, parser);

    sanitize_markdown_content(&raw_html)
}

/// Sanitizes rendered content, stripping unsafe HTML.
pub fn sanitize_markdown_content(content: &str) -> String {
    Builder::default()
        .link_rel(Some("nofollow noopener noreferrer"))
        .url_relative(UrlRelative::PassThrough)
        .clean(content)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_headings_and_paragraphs() {
        let html = safe_markdown_to_html("# Title\n\nBody text.");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<p>Body text.</p>"));
    }

    #[test]
    fn strips_script_tags() {
        let html = safe_markdown_to_html("hello <script>alert('x')</script>");
        assert!(!html.contains("script"));
    }

    #[test]
    fn links_get_nofollow_rel() {
        let html = safe_markdown_to_html("[plog](https://plog.example)");
        assert!(html.contains("nofollow"));
    }

    #[test]
    fn relative_image_urls_pass_through() {
        let html = safe_markdown_to_html("![cat](/images/alice/avatar/x/cat.png)");
        assert!(html.contains("/images/alice/avatar/x/cat.png"));
    }
}
