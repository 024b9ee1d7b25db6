use scraper::{Html, Selector};
use url::Url;

/// Link-extraction collaborator: pulls every navigable `a[href]` out
/// of `html`, resolved to an absolute URL against `base_url`.
/// Non-navigable schemes and fragment-only references are skipped.
pub fn extract_links(base_url: &str, html: &str) -> Vec<String> {
    let Ok(base) = Url::parse(base_url) else {
        return Vec::new();
    };
    let document = Html::parse_document(html);
    let selector = Selector::parse("a[href]").unwrap();

    let mut links = Vec::new();
    for element in document.select(&selector) {
        if let Some(href) = element.value().attr("href")
            && let Some(absolute) = resolve(&base, href)
        {
            links.push(absolute);
        }
    }
    links
}

fn resolve(base: &Url, href: &str) -> Option<String> {
    let lowered = href.to_ascii_lowercase();
    if href.is_empty()
        || href.starts_with('#')
        || lowered.starts_with("javascript:")
        || lowered.starts_with("mailto:")
        || lowered.starts_with("tel:")
    {
        return None;
    }

    let mut resolved = base.join(href).ok()?;
    resolved.set_fragment(None);
    Some(resolved.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_relative_links_against_the_page() {
        let html = r#"<html><body><a href="/docs">Docs</a></body></html>"#;
        let links = extract_links("https://example.com/page", html);
        assert_eq!(links, vec!["https://example.com/docs"]);
    }

    #[test]
    fn keeps_absolute_links_untouched() {
        let html = r#"<a href="https://other.example/x">x</a>"#;
        let links = extract_links("https://example.com/", html);
        assert_eq!(links, vec!["https://other.example/x"]);
    }

    #[test]
    fn skips_script_mailto_tel_and_fragments() {
        let html = r##"
            <a href="javascript:void(0)">js</a>
            <a href="MAILTO:x@example.com">mail</a>
            <a href="tel:+123">call</a>
            <a href="#top">top</a>
            <a href="/kept">kept</a>
        "##;
        let links = extract_links("https://example.com/", html);
        assert_eq!(links, vec!["https://example.com/kept"]);
    }

    #[test]
    fn strips_fragments_from_resolved_links() {
        let html = r#"<a href="/page#section">p</a>"#;
        let links = extract_links("https://example.com/", html);
        assert_eq!(links, vec!["https://example.com/page"]);
    }

    #[test]
    fn duplicate_anchors_are_reported_once_each() {
        let html = r#"<a href="/x">1</a><a href="/x">2</a>"#;
        let links = extract_links("https://example.com/", html);
        assert_eq!(links.len(), 2);
    }

    #[test]
    fn bad_base_url_yields_no_links() {
        assert!(extract_links("not a url", r#"<a href="/x">x</a>"#).is_empty());
    }
}
