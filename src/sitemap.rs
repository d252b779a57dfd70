//! Depth-first traversal of a sitemap index tree.

use crate::error::SyncError;
use crate::fetch::Fetch;
use crate::filter::DecisionFilter;
use std::collections::VecDeque;

/// An entry waiting on the traversal stack
#[derive(Debug)]
enum Entry {
    /// A sitemap document still to be fetched
    Sitemap(String),
    /// A decision candidate ready to be yielded
    Page(String),
}

/// What a parsed sitemap document turned out to be
#[derive(Debug, PartialEq)]
pub enum SitemapDocument {
    /// `<sitemapindex>`: child sitemap locations
    Index(Vec<String>),
    /// `<urlset>`: page locations
    UrlSet(Vec<String>),
}

/// Parse one sitemap document, matching local tag names only.
///
/// Namespace URIs (or their absence) never matter. Empty `<loc>` entries are
/// dropped.
pub fn parse_sitemap(url: &str, xml: &str) -> Result<SitemapDocument, SyncError> {
    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..Default::default()
    };
    let doc = roxmltree::Document::parse_with_options(xml, options).map_err(|source| {
        SyncError::SitemapParse {
            url: url.to_string(),
            source,
        }
    })?;

    let root = doc.root_element();
    let locations = || {
        root.descendants()
            .filter(|n| n.is_element() && n.tag_name().name() == "loc")
            .filter_map(|n| n.text())
            .map(str::trim)
            .filter(|loc| !loc.is_empty())
            .map(str::to_string)
            .collect::<Vec<_>>()
    };

    match root.tag_name().name() {
        "sitemapindex" => Ok(SitemapDocument::Index(locations())),
        "urlset" => Ok(SitemapDocument::UrlSet(locations())),
        other => Err(SyncError::SitemapFormat {
            url: url.to_string(),
            tag: other.to_string(),
        }),
    }
}

/// Lazy stream of decision-candidate URLs below a sitemap.
///
/// Documents are fetched on demand. A child sitemap is yielded in full before
/// its next sibling is fetched, and entries keep their document order. The
/// first error is yielded once and ends the walk.
pub struct SitemapWalker<'a, F: Fetch + ?Sized> {
    fetcher: &'a F,
    filter: DecisionFilter,
    stack: Vec<VecDeque<Entry>>,
    documents: usize,
}

impl<'a, F: Fetch + ?Sized> SitemapWalker<'a, F> {
    /// Walk from `sitemap_url` with the default decision filter
    pub fn new(fetcher: &'a F, sitemap_url: impl Into<String>) -> Self {
        Self::with_filter(fetcher, sitemap_url, DecisionFilter::default())
    }

    pub fn with_filter(
        fetcher: &'a F,
        sitemap_url: impl Into<String>,
        filter: DecisionFilter,
    ) -> Self {
        Self {
            fetcher,
            filter,
            stack: vec![VecDeque::from([Entry::Sitemap(sitemap_url.into())])],
            documents: 0,
        }
    }

    /// Number of sitemap documents fetched so far
    pub fn documents_fetched(&self) -> usize {
        self.documents
    }

    /// Fetch and parse one sitemap, pushing its entries as a new frame
    fn descend(&mut self, url: String) -> Result<(), SyncError> {
        ::log::info!("Downloading sitemap {}", url);
        self.documents += 1;

        let response = self
            .fetcher
            .get(&url)
            .and_then(|r| r.error_for_status())
            .map_err(|source| SyncError::SitemapFetch {
                url: url.clone(),
                source,
            })?;

        let frame: VecDeque<Entry> = match parse_sitemap(&url, &response.body)? {
            SitemapDocument::Index(children) => {
                ::log::debug!("Sitemap index {} lists {} sitemaps", url, children.len());
                children.into_iter().map(Entry::Sitemap).collect()
            }
            SitemapDocument::UrlSet(locs) => {
                let total = locs.len();
                let pages: VecDeque<Entry> = locs
                    .into_iter()
                    .filter(|loc| self.filter.is_decision(loc))
                    .map(Entry::Page)
                    .collect();
                ::log::debug!(
                    "Sitemap {} lists {} URLs, {} look like decisions",
                    url,
                    total,
                    pages.len()
                );
                pages
            }
        };

        self.stack.push(frame);
        Ok(())
    }
}

impl<F: Fetch + ?Sized> Iterator for SitemapWalker<'_, F> {
    type Item = Result<String, SyncError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = self.stack.last_mut()?;
            let Some(entry) = frame.pop_front() else {
                self.stack.pop();
                continue;
            };

            match entry {
                Entry::Page(url) => return Some(Ok(url)),
                Entry::Sitemap(url) => {
                    if let Err(e) = self.descend(url) {
                        self.stack.clear();
                        return Some(Err(e));
                    }
                }
            }
        }
    }
}

impl<F: Fetch + ?Sized> std::iter::FusedIterator for SitemapWalker<'_, F> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::MockFetcher;

    const INDEX: &str = "https://example.dk/sitemap.xml";
    const LEAF_A: &str = "https://example.dk/sitemap-a.xml";
    const LEAF_B: &str = "https://example.dk/sitemap-b.xml";

    fn index_xml(children: &[&str]) -> String {
        let locs: String = children
            .iter()
            .map(|c| format!("<sitemap><loc>{}</loc></sitemap>", c))
            .collect();
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">{}</sitemapindex>"#,
            locs
        )
    }

    fn urlset_xml(urls: &[&str]) -> String {
        let locs: String = urls
            .iter()
            .map(|u| format!("<url><loc>{}</loc></url>", u))
            .collect();
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">{}</urlset>"#,
            locs
        )
    }

    fn walk(mock: &MockFetcher, url: &str) -> Result<Vec<String>, SyncError> {
        SitemapWalker::new(mock, url).collect()
    }

    #[test]
    fn two_level_index_concatenates_leaves_in_order() {
        let mock = MockFetcher::new()
            .with_page(INDEX, index_xml(&[LEAF_A, LEAF_B]))
            .with_page(
                LEAF_A,
                urlset_xml(&[
                    "https://example.dk/naevn/a/afgoerelse/1",
                    "https://example.dk/om-os",
                    "https://example.dk/naevn/a/afgoerelse/2",
                ]),
            )
            .with_page(
                LEAF_B,
                urlset_xml(&[
                    "https://example.dk/nyhed/3",
                    "https://example.dk/kontakt",
                ]),
            );

        let urls = walk(&mock, INDEX).unwrap();
        assert_eq!(
            urls,
            vec![
                "https://example.dk/naevn/a/afgoerelse/1",
                "https://example.dk/naevn/a/afgoerelse/2",
                "https://example.dk/nyhed/3",
            ]
        );
        assert_eq!(mock.requests(), vec![INDEX, LEAF_A, LEAF_B]);
    }

    #[test]
    fn walk_is_lazy() {
        let mock = MockFetcher::new()
            .with_page(INDEX, index_xml(&[LEAF_A, LEAF_B]))
            .with_page(LEAF_A, urlset_xml(&["https://example.dk/afgoerelse/1"]))
            .with_page(LEAF_B, urlset_xml(&["https://example.dk/afgoerelse/2"]));

        let mut walker = SitemapWalker::new(&mock, INDEX);
        assert_eq!(
            walker.next().unwrap().unwrap(),
            "https://example.dk/afgoerelse/1"
        );
        // The second leaf has not been requested yet
        assert_eq!(mock.requests(), vec![INDEX, LEAF_A]);
        assert_eq!(walker.documents_fetched(), 2);
    }

    #[test]
    fn nested_indexes_are_depth_first() {
        let nested = "https://example.dk/sitemap-nested.xml";
        let mock = MockFetcher::new()
            .with_page(INDEX, index_xml(&[nested, LEAF_B]))
            .with_page(nested, index_xml(&[LEAF_A]))
            .with_page(LEAF_A, urlset_xml(&["https://example.dk/afgoerelse/a"]))
            .with_page(LEAF_B, urlset_xml(&["https://example.dk/afgoerelse/b"]));

        let urls = walk(&mock, INDEX).unwrap();
        assert_eq!(
            urls,
            vec![
                "https://example.dk/afgoerelse/a",
                "https://example.dk/afgoerelse/b"
            ]
        );
    }

    #[test]
    fn leaf_sitemap_can_be_the_entry_point() {
        let mock = MockFetcher::new().with_page(
            LEAF_A,
            urlset_xml(&["https://example.dk/afgoerelse/1"]),
        );
        assert_eq!(walk(&mock, LEAF_A).unwrap().len(), 1);
    }

    #[test]
    fn namespaces_are_ignored() {
        let prefixed = r#"<sm:urlset xmlns:sm="urn:whatever">
            <sm:url><sm:loc> https://example.dk/afgoerelse/1 </sm:loc></sm:url>
            <sm:url><sm:loc></sm:loc></sm:url>
        </sm:urlset>"#;
        let bare = "<urlset><url><loc>https://example.dk/afgoerelse/2</loc></url></urlset>";

        assert_eq!(
            parse_sitemap(LEAF_A, prefixed).unwrap(),
            SitemapDocument::UrlSet(vec!["https://example.dk/afgoerelse/1".into()])
        );
        assert_eq!(
            parse_sitemap(LEAF_B, bare).unwrap(),
            SitemapDocument::UrlSet(vec!["https://example.dk/afgoerelse/2".into()])
        );
    }

    #[test]
    fn http_failure_is_sitemap_fetch_error() {
        let mock = MockFetcher::new().with_response(INDEX, 500, "oops");
        match walk(&mock, INDEX) {
            Err(SyncError::SitemapFetch { url, source }) => {
                assert_eq!(url, INDEX);
                assert!(source.to_string().contains("500"));
            }
            other => panic!("expected SitemapFetch, got {:?}", other),
        }
    }

    #[test]
    fn unreachable_child_aborts_walk() {
        let mock = MockFetcher::new()
            .with_page(INDEX, index_xml(&[LEAF_A, LEAF_B]))
            .with_unreachable(LEAF_A, "timed out")
            .with_page(LEAF_B, urlset_xml(&["https://example.dk/afgoerelse/2"]));

        let mut walker = SitemapWalker::new(&mock, INDEX);
        assert!(matches!(
            walker.next(),
            Some(Err(SyncError::SitemapFetch { .. }))
        ));
        // Fused after the error; the sibling is never fetched
        assert!(walker.next().is_none());
        assert_eq!(mock.requests_for(LEAF_B), 0);
    }

    #[test]
    fn unknown_root_is_format_error() {
        let mock = MockFetcher::new().with_page(INDEX, "<rss><channel/></rss>");
        match walk(&mock, INDEX) {
            Err(SyncError::SitemapFormat { tag, .. }) => assert_eq!(tag, "rss"),
            other => panic!("expected SitemapFormat, got {:?}", other),
        }
    }

    #[test]
    fn malformed_xml_is_fatal() {
        let mock = MockFetcher::new()
            .with_page(INDEX, index_xml(&[LEAF_A, LEAF_B]))
            .with_page(LEAF_A, urlset_xml(&["https://example.dk/afgoerelse/1"]))
            .with_page(LEAF_B, "<urlset><url><loc>broken</url>");

        assert!(matches!(
            walk(&mock, INDEX),
            Err(SyncError::SitemapParse { .. })
        ));
    }

    #[test]
    fn doctype_declaration_is_accepted() {
        let xml = "<?xml version=\"1.0\"?>\n<!DOCTYPE urlset>\n<urlset><url><loc>https://example.dk/afgoerelse/1</loc></url></urlset>";
        assert_eq!(
            parse_sitemap(INDEX, xml).unwrap(),
            SitemapDocument::UrlSet(vec!["https://example.dk/afgoerelse/1".to_string()])
        );
    }
}
