use std::fmt;
use log::{debug, error, info, warn};

use crate::config::ScraperConfig;
use crate::delay_manager::Delay;
use crate::error::FetchError;
use crate::extractor::Extractor;
use crate::filter::KeywordFilter;
use crate::http_client::{FetchResponse, HttpFetcher};
use crate::posting::Posting;

const SEARCH_PATH: &str = "/jobs-guest/jobs/api/seeMoreJobPostings/search";
const DETAIL_PATH: &str = "/jobs-guest/jobs/api/jobPosting";

/// Why the page loop stopped.
#[derive(Debug)]
pub enum Termination {
    /// A page came back with no entries.
    Exhausted { pages: u32 },
    /// The search request itself failed.
    Transport { offset: u32, error: FetchError },
    /// The search endpoint answered with a status other than 200 or 429.
    HttpStatus { offset: u32, status: u16 },
    /// The next offset does not fit in a `u32`.
    OffsetOverflow { offset: u32 },
}

impl Termination {
    pub fn is_clean(&self) -> bool {
        matches!(self, Termination::Exhausted { .. })
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::Exhausted { pages } => write!(f, "no more results after {} page(s)", pages),
            Termination::Transport { offset, error } => {
                write!(f, "error fetching jobs page {}: {}", offset, error)
            }
            Termination::HttpStatus { offset, status } => {
                write!(f, "jobs page {} returned status code {}", offset, status)
            }
            Termination::OffsetOverflow { offset } => {
                write!(f, "no offset after jobs page {} fits in u32", offset)
            }
        }
    }
}

/// What the detail fetch produced for one posting.
#[derive(Debug, PartialEq, Eq)]
pub enum DetailOutcome {
    /// Possibly empty; empty descriptions pass the filter.
    Description(String),
    /// Transport failure or repeated rate limiting; the posting is dropped.
    Skip,
}

#[derive(Debug)]
pub struct ScrapeReport {
    /// Accepted postings in discovery order.
    pub postings: Vec<Posting>,
    pub termination: Termination,
    pub cards_parsed: usize,
    pub rejected: usize,
    pub skipped: usize,
}

pub struct Scraper<F, D> {
    fetcher: F,
    delay: D,
    extractor: Extractor,
    filter: KeywordFilter,
    config: ScraperConfig,
}

impl<F: HttpFetcher, D: Delay> Scraper<F, D> {
    pub fn new(config: ScraperConfig, fetcher: F, delay: D) -> Self {
        Scraper {
            extractor: Extractor::new(&config.origin),
            filter: KeywordFilter::new(&config.blocklist),
            fetcher,
            delay,
            config,
        }
    }

    pub fn search_url(&self, offset: u32) -> String {
        format!(
            "{}{}?keywords={}&location={}&geoId={}&start={}",
            self.config.origin,
            SEARCH_PATH,
            urlencoding::encode(&self.config.keyword),
            urlencoding::encode(&self.config.location),
            urlencoding::encode(&self.config.geo_id),
            offset
        )
    }

    pub fn detail_url(&self, job_id: &str) -> String {
        format!("{}{}/{}", self.config.origin, DETAIL_PATH, urlencoding::encode(job_id))
    }

    /// Walks result pages until one is empty or a page request fails.
    pub fn run(&self) -> ScrapeReport {
        let mut postings = Vec::new();
        let mut cards_parsed = 0;
        let mut rejected = 0;
        let mut skipped = 0;
        let mut offset = 0;
        let mut pages = 0;

        let termination = loop {
            let resp = match self.fetch_page(offset) {
                Ok(resp) => resp,
                Err(termination) => break termination,
            };

            let page = self.extractor.parse_search_page(&resp.body);
            if page.entries == 0 {
                info!("No results at offset {}. End of listings.", offset);
                break Termination::Exhausted { pages };
            }
            pages += 1;
            info!(
                "Page at offset {}: {} entries, {} job cards",
                offset,
                page.entries,
                page.postings.len()
            );

            for posting in page.postings {
                cards_parsed += 1;

                let description = match &posting.id {
                    Some(id) => match self.fetch_description(id) {
                        DetailOutcome::Description(text) => text,
                        DetailOutcome::Skip => {
                            skipped += 1;
                            continue;
                        }
                    },
                    None => String::new(),
                };

                if let Some(term) = self.filter.matched_term(&description) {
                    debug!("Rejected {:?} ({:?}): description mentions '{}'", posting.title, posting.id, term);
                    rejected += 1;
                    continue;
                }
                postings.push(posting);
            }

            offset = match offset.checked_add(self.config.page_size) {
                Some(next) => next,
                None => break Termination::OffsetOverflow { offset },
            };
        };

        if termination.is_clean() {
            info!("Scrape finished: {}", termination);
        } else {
            error!("Scrape stopped early: {}", termination);
        }
        info!(
            "{} cards parsed, {} accepted, {} rejected by blocklist, {} skipped",
            cards_parsed,
            postings.len(),
            rejected,
            skipped
        );

        ScrapeReport { postings, termination, cards_parsed, rejected, skipped }
    }

    /// Fetches one search page, waiting out rate limits for as long as they last.
    fn fetch_page(&self, offset: u32) -> Result<FetchResponse, Termination> {
        let url = self.search_url(offset);
        loop {
            info!("Fetching jobs page {}", offset);
            let resp = self.fetcher.get(&url).map_err(|error| {
                error!("Error fetching jobs page {}: {}", offset, error);
                Termination::Transport { offset, error }
            })?;

            if resp.is_rate_limited() {
                warn!("Rate limit reached on jobs page {}.", offset);
                self.delay.wait(self.config.rate_limit_pause_secs, "page rate limit");
                continue;
            }
            if !resp.is_ok() {
                error!("Failed to retrieve jobs page {} (status code {}). Stopping.", offset, resp.status);
                return Err(Termination::HttpStatus { offset, status: resp.status });
            }
            return Ok(resp);
        }
    }

    /// Fetches a posting's detail page and extracts its description.
    pub fn fetch_description(&self, job_id: &str) -> DetailOutcome {
        let url = self.detail_url(job_id);

        let mut resp = match self.fetcher.get(&url) {
            Ok(resp) => resp,
            Err(e) => {
                warn!("Error fetching details for job {}: {}", job_id, e);
                return DetailOutcome::Skip;
            }
        };

        if resp.is_rate_limited() {
            warn!("Rate limit hit on job ID {}.", job_id);
            self.delay.wait(self.config.rate_limit_pause_secs, "detail rate limit");
            resp = match self.fetcher.get(&url) {
                Ok(resp) => resp,
                Err(e) => {
                    warn!("Retry failed for job {}: {}. Skipping.", job_id, e);
                    return DetailOutcome::Skip;
                }
            };
            if resp.is_rate_limited() {
                warn!("Still rate limited on job ID {}. Skipping.", job_id);
                return DetailOutcome::Skip;
            }
        }

        if !resp.is_ok() {
            debug!("Details for job {} returned status {}; no description", job_id, resp.status);
            return DetailOutcome::Description(String::new());
        }

        DetailOutcome::Description(self.extractor.extract_description(&resp.body).unwrap_or_default())
    }
}
