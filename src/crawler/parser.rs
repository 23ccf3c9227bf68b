//! HTML parser for extracting anchor targets
//!
//! Only the raw `href` values are produced here. Resolution against the page
//! URL, scheme filtering and `mailto:` skipping happen in the link normalizer.

use scraper::{Html, Selector};

/// Returns the raw `href` of every `<a href>` element, in document order
///
/// Malformed HTML never fails: html5ever recovers, and a document without
/// anchors simply yields an empty list.
///
/// # Example
///
/// ```
/// use contact_harvest::crawler::extract_anchor_hrefs;
///
/// let html = r#"<a href="/about">About</a><a name="top">Top</a>"#;
/// assert_eq!(extract_anchor_hrefs(html), vec!["/about".to_string()]);
/// ```
pub fn extract_anchor_hrefs(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    let Ok(a_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&a_selector)
        .filter_map(|element| element.value().attr("href"))
        .map(|href| href.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_in_document_order() {
        let html = r#"
            <html>
            <body>
                <a href="/page1">Link 1</a>
                <a href="https://other.com/page2">Link 2</a>
                <a href="page3#frag">Link 3</a>
            </body>
            </html>
        "#;
        assert_eq!(
            extract_anchor_hrefs(html),
            vec!["/page1", "https://other.com/page2", "page3#frag"]
        );
    }

    #[test]
    fn test_keeps_pseudo_links_for_the_normalizer() {
        let html = r#"<a href="mailto:a@example.com">Mail</a><a href="javascript:void(0)">JS</a>"#;
        assert_eq!(
            extract_anchor_hrefs(html),
            vec!["mailto:a@example.com", "javascript:void(0)"]
        );
    }

    #[test]
    fn test_skips_anchors_without_href() {
        let html = r#"<a name="top">Top</a><a>Empty</a><link rel="canonical" href="/c">"#;
        assert!(extract_anchor_hrefs(html).is_empty());
    }

    #[test]
    fn test_malformed_html() {
        let html = r#"<div><a href="/ok">unclosed <p><a href='/second'>"#;
        assert_eq!(extract_anchor_hrefs(html), vec!["/ok", "/second"]);
    }

    #[test]
    fn test_empty_document() {
        assert!(extract_anchor_hrefs("").is_empty());
    }
}
