use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::posting::{absolutize_link, id_from_urn, Posting};

/// Result of parsing one search results page.
#[derive(Debug, Default)]
pub struct ParsedPage {
    /// Number of `<li>` entries on the page, recognized or not.
    pub entries: usize,
    pub postings: Vec<Posting>,
}

/// Pulls cards out of search pages and descriptions out of detail pages.
pub struct Extractor {
    origin: String,
    entry: Selector,
    base_card: Selector,
    title: Selector,
    company: Selector,
    link: Selector,
    list_date: Selector,
    list_date_new: Selector,
    div: Selector,
    whitespace_regex: Regex,
}

fn selector(css: &'static str) -> Selector {
    Selector::parse(css).expect("static selector must parse")
}

impl Extractor {
    pub fn new(origin: &str) -> Self {
        Extractor {
            origin: origin.to_string(),
            entry: selector("li"),
            base_card: selector("div.base-card"),
            title: selector("h3.base-search-card__title"),
            company: selector("h4.base-search-card__subtitle"),
            link: selector("a.base-card__full-link"),
            list_date: selector("time.job-search-card__listdate"),
            list_date_new: selector("time.job-search-card__listdate--new"),
            div: selector("div"),
            whitespace_regex: Regex::new(r"\s+").expect("static regex must compile"),
        }
    }

    pub fn parse_search_page(&self, html: &str) -> ParsedPage {
        let document = Html::parse_document(html);
        let mut page = ParsedPage::default();

        for entry in document.select(&self.entry) {
            page.entries += 1;
            if let Some(posting) = self.parse_card(entry) {
                page.postings.push(posting);
            }
        }
        page
    }

    /// `None` when the entry has no `div.base-card`; missing fields are left empty.
    fn parse_card(&self, entry: ElementRef) -> Option<Posting> {
        let base_card = entry.select(&self.base_card).next()?;

        let id = base_card
            .value()
            .attr("data-entity-urn")
            .and_then(id_from_urn);

        let title = entry.select(&self.title).next().map(|e| self.trimmed_text(e));
        let company = entry.select(&self.company).next().map(|e| self.trimmed_text(e));

        let link = entry
            .select(&self.link)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(|href| absolutize_link(href.trim(), &self.origin));

        let posted_date = entry
            .select(&self.list_date)
            .next()
            .or_else(|| entry.select(&self.list_date_new).next())
            .map(|time| match time.value().attr("datetime") {
                Some(dt) => dt.trim().to_string(),
                None => self.trimmed_text(time),
            });

        Some(Posting { id, title, company, link, posted_date })
    }

    /// Visible text of the posting description, or `None` if no container is found.
    pub fn extract_description(&self, html: &str) -> Option<String> {
        let document = Html::parse_document(html);

        let container = document
            .select(&self.div)
            .find(|div| {
                div.value().classes().any(|c| c == "description")
                    && div.text().any(|t| !t.is_empty())
            })
            .or_else(|| {
                document
                    .select(&self.div)
                    .find(|div| div.value().classes().any(|c| c.contains("description")))
            })?;

        Some(self.visible_text(container))
    }

    fn trimmed_text(&self, element: ElementRef) -> String {
        element.text().collect::<String>().trim().to_string()
    }

    /// Text nodes trimmed, empty ones dropped, joined by single spaces.
    fn visible_text(&self, element: ElementRef) -> String {
        let joined = element
            .text()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        self.whitespace_regex.replace_all(&joined, " ").into_owned()
    }
}
