use crate::parsers::text::{block_text, inline_text};
use crate::parsers::{Strategy, first_match};
use crate::results::{ExtractedPage, PublishedAt};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap()
}

static OG_TITLE: LazyLock<Selector> = LazyLock::new(|| selector(r#"meta[property="og:title"]"#));
static TITLE: LazyLock<Selector> = LazyLock::new(|| selector("title"));
static H1: LazyLock<Selector> = LazyLock::new(|| selector("h1"));
static TIME: LazyLock<Selector> = LazyLock::new(|| selector("time"));
static ARTICLE: LazyLock<Selector> = LazyLock::new(|| selector("article"));
static MAIN: LazyLock<Selector> = LazyLock::new(|| selector("main"));
static DIV: LazyLock<Selector> = LazyLock::new(|| selector("div"));

static CONTENT_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(content|article|entry)").unwrap());

/// Title sources, most specific first
pub static TITLE_STRATEGIES: [Strategy<String>; 3] = [
    Strategy::new("og:title", og_title),
    Strategy::new("title", document_title),
    Strategy::new("h1", first_heading),
];

/// Body containers, narrowest first. A container that exists wins even when
/// it holds no text.
pub static BODY_STRATEGIES: [Strategy<String>; 4] = [
    Strategy::new("article", article),
    Strategy::new("main", main_element),
    Strategy::new("content div", content_div),
    Strategy::new("document", whole_document),
];

/// A timestamp layout accepted on decision pages
#[derive(Debug, Clone, Copy)]
pub enum TimestampFormat {
    /// RFC 3339, e.g. `2023-05-01T10:00:00Z`
    Rfc3339,
    /// Date and time with a numeric offset
    Offset(&'static str),
    /// Date and time without offset
    Naive(&'static str),
    /// Date only, read as midnight
    Date(&'static str),
}

impl TimestampFormat {
    pub fn parse(&self, input: &str) -> Option<PublishedAt> {
        match *self {
            TimestampFormat::Rfc3339 => DateTime::parse_from_rfc3339(input)
                .ok()
                .map(PublishedAt::Offset),
            TimestampFormat::Offset(fmt) => DateTime::parse_from_str(input, fmt)
                .ok()
                .map(PublishedAt::Offset),
            TimestampFormat::Naive(fmt) => NaiveDateTime::parse_from_str(input, fmt)
                .ok()
                .map(PublishedAt::Naive),
            TimestampFormat::Date(fmt) => NaiveDate::parse_from_str(input, fmt)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(PublishedAt::Naive),
        }
    }
}

/// Layouts tried on a `<time datetime="...">` attribute, in order
pub const DATETIME_ATTRIBUTE_FORMATS: [TimestampFormat; 4] = [
    TimestampFormat::Rfc3339,
    TimestampFormat::Offset("%Y-%m-%dT%H:%M:%S%z"),
    TimestampFormat::Naive("%Y-%m-%dT%H:%M:%S"),
    TimestampFormat::Date("%Y-%m-%d"),
];

/// Danish date layouts tried on the visible `<time>` text, in order
pub const DATE_TEXT_FORMATS: [TimestampFormat; 3] = [
    TimestampFormat::Date("%d.%m.%Y"),
    TimestampFormat::Date("%d-%m-%Y"),
    TimestampFormat::Date("%Y-%m-%d"),
];

fn parse_with(formats: &[TimestampFormat], input: &str) -> Option<PublishedAt> {
    formats.iter().find_map(|f| f.parse(input))
}

/// Extract title, publication time and body text from a decision page
pub fn extract(html: &str) -> ExtractedPage {
    let doc = Html::parse_document(html);

    let page = ExtractedPage {
        title: first_match(&doc, &TITLE_STRATEGIES),
        published: extract_published(&doc),
        body: first_match(&doc, &BODY_STRATEGIES).unwrap_or_default(),
    };

    ::log::debug!(
        "Extracted page: title={:?}, published={:?}, body {} chars",
        page.title,
        page.published,
        page.body.chars().count()
    );
    page
}

/// Publication time from the first `<time>` element.
///
/// The machine-readable `datetime` attribute is preferred; the visible text
/// is only consulted when the attribute is missing or unparsable.
pub fn extract_published(doc: &Html) -> Option<PublishedAt> {
    let time = doc.select(&TIME).next()?;

    let from_attribute = time
        .value()
        .attr("datetime")
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| parse_with(&DATETIME_ATTRIBUTE_FORMATS, v));

    from_attribute.or_else(|| {
        let text = inline_text(time);
        if text.is_empty() {
            None
        } else {
            parse_with(&DATE_TEXT_FORMATS, &text)
        }
    })
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}

fn og_title(doc: &Html) -> Option<String> {
    let meta = doc.select(&OG_TITLE).next()?;
    non_empty(meta.value().attr("content")?.trim().to_string())
}

fn document_title(doc: &Html) -> Option<String> {
    doc.select(&TITLE).next().map(inline_text).and_then(non_empty)
}

fn first_heading(doc: &Html) -> Option<String> {
    doc.select(&H1).next().map(inline_text).and_then(non_empty)
}

fn first_block(doc: &Html, selector: &Selector) -> Option<String> {
    doc.select(selector).next().map(block_text)
}

fn article(doc: &Html) -> Option<String> {
    first_block(doc, &ARTICLE)
}

fn main_element(doc: &Html) -> Option<String> {
    first_block(doc, &MAIN)
}

fn whole_document(doc: &Html) -> Option<String> {
    Some(block_text(doc.root_element()))
}

fn content_div(doc: &Html) -> Option<String> {
    doc.select(&DIV)
        .find(|div| has_content_class(*div))
        .map(block_text)
}

fn has_content_class(div: ElementRef<'_>) -> bool {
    div.value()
        .attr("class")
        .is_some_and(|class| CONTENT_CLASS.is_match(class))
}
