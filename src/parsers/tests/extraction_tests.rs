use crate::parsers::extract;

#[cfg(test)]
mod title_tests {
    use super::*;

    #[test]
    fn test_og_title_beats_heading() {
        let html = r#"<html><head><meta property="og:title" content="T1"></head>
            <body><h1>T2</h1></body></html>"#;
        assert_eq!(extract(html).title.as_deref(), Some("T1"));
    }

    #[test]
    fn test_og_title_beats_document_title() {
        let html = r#"<html><head><title>Portal</title>
            <meta property="og:title" content="  Kendelse om moms  "></head></html>"#;
        assert_eq!(extract(html).title.as_deref(), Some("Kendelse om moms"));
    }

    #[test]
    fn test_document_title_when_no_og_title() {
        let html = "<html><head><title>\n  Afgørelse i sag 12 \n</title></head><body><h1>Other</h1></body></html>";
        assert_eq!(extract(html).title.as_deref(), Some("Afgørelse i sag 12"));
    }

    #[test]
    fn test_empty_og_title_falls_through() {
        let html = r#"<html><head><meta property="og:title" content="   "></head>
            <body><h1>Heading</h1></body></html>"#;
        assert_eq!(extract(html).title.as_deref(), Some("Heading"));
    }

    #[test]
    fn test_first_heading_is_used() {
        let html = "<body><h1>First <small>part</small></h1><h1>Second</h1></body>";
        assert_eq!(extract(html).title.as_deref(), Some("First part"));
    }

    #[test]
    fn test_no_title_at_all() {
        let html = "<body><p>Only text</p></body>";
        assert_eq!(extract(html).title, None);
    }
}

#[cfg(test)]
mod body_tests {
    use super::*;

    #[test]
    fn test_article_wins_over_main() {
        let html = "<body><main><p>Main text</p><article><p>Article text</p></article></main></body>";
        assert_eq!(extract(html).body, "Article text");
    }

    #[test]
    fn test_main_when_no_article() {
        let html = r#"<body><nav>Menu</nav><main><h2>Sag</h2><p>Afgørelse</p></main></body>"#;
        assert_eq!(extract(html).body, "Sag\nAfgørelse");
    }

    #[test]
    fn test_content_div_when_no_article_or_main() {
        let html = r#"<body>
            <div class="header">Top</div>
            <div class="page-Content wide"><p>Body one</p><p>Body two</p></div>
            <div class="entry">Later</div>
        </body>"#;
        assert_eq!(extract(html).body, "Body one\nBody two");
    }

    #[test]
    fn test_whole_document_as_last_resort() {
        let html = "<html><head><title>T</title></head><body><p>A</p><span>B</span></body></html>";
        assert_eq!(extract(html).body, "T\nA\nB");
    }

    #[test]
    fn test_empty_article_still_wins() {
        let html = "<body><article>   </article><main><p>Not used</p></main></body>";
        assert_eq!(extract(html).body, "");
    }

    #[test]
    fn test_scripts_are_not_body_text() {
        let html = "<body><article><p>Text</p><script>track();</script></article></body>";
        assert_eq!(extract(html).body, "Text");
    }
}
