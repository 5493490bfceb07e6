use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;

use intern_scraper_lib::{output, Delay, FetchError, FetchResponse, HttpFetcher, Scraper, ScraperConfig};

#[derive(Default)]
struct FakeSite {
    script: RefCell<VecDeque<(String, u16, String)>>,
    requests: RefCell<Vec<String>>,
}

impl FakeSite {
    /// Queues a response, checking that the request path contains `expect`.
    fn then(self, expect: &str, status: u16, body: &str) -> Self {
        self.script
            .borrow_mut()
            .push_back((expect.to_string(), status, body.to_string()));
        self
    }
}

impl HttpFetcher for FakeSite {
    fn get(&self, url: &str) -> Result<FetchResponse, FetchError> {
        self.requests.borrow_mut().push(url.to_string());
        let (expect, status, body) = self
            .script
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected request to {}", url));
        assert!(url.contains(&expect), "expected {} in {}", expect, url);
        Ok(FetchResponse { status, body })
    }
}

struct NoDelay;

impl Delay for NoDelay {
    fn wait(&self, _secs: u64, _reason: &str) {}
}

const SEARCH_PAGE: &str = r#"
<li>
  <div class="base-card relative" data-entity-urn="urn:li:jobPosting:1001">
    <a class="base-card__full-link" href="/jobs/view/software-intern-1001"></a>
    <h3 class="base-search-card__title">Software Intern</h3>
    <h4 class="base-search-card__subtitle"><a>Acme</a></h4>
    <time class="job-search-card__listdate" datetime="2024-05-01">1 week ago</time>
  </div>
</li>
<li>
  <div class="base-card relative" data-entity-urn="urn:li:jobPosting:1002">
    <a class="base-card__full-link" href="https://www.linkedin.com/jobs/view/data-intern-1002"></a>
    <h3 class="base-search-card__title">Data Intern</h3>
    <time class="job-search-card__listdate--new">2 days ago</time>
  </div>
</li>
<li>
  <div class="base-card relative" data-entity-urn="urn:li:jobPosting:1003">
    <a class="base-card__full-link" href="/jobs/view/defense-intern-1003"></a>
    <h3 class="base-search-card__title">Defense Intern</h3>
    <h4 class="base-search-card__subtitle">Contractor Co</h4>
  </div>
</li>
"#;

fn detail(text: &str) -> String {
    format!(
        r#"<section><div class="show-more-less-html__markup description">{}</div></section>"#,
        text
    )
}

#[test]
fn three_cards_one_filtered_writes_two_rows() {
    let site = FakeSite::default()
        .then("start=0", 200, SEARCH_PAGE)
        .then("jobPosting/1001", 200, &detail("<p>Learn Rust with our platform team.</p>"))
        .then("jobPosting/1002", 200, &detail("<p>Work on ETL pipelines.</p>"))
        .then("jobPosting/1003", 200, &detail("<p>This role requires visa sponsorship eligibility.</p>"))
        .then("start=25", 200, "");

    let report = Scraper::new(ScraperConfig::default(), &site, NoDelay).run();

    assert!(report.termination.is_clean());
    assert_eq!(report.cards_parsed, 3);
    assert_eq!(report.rejected, 1);
    assert_eq!(report.postings.len(), 2);
    assert_eq!(report.postings[1].company, None);

    let path = std::env::temp_dir().join(format!("intern_jobs_{}.csv", uuid::Uuid::new_v4()));
    output::save_postings(&path, &report.postings).unwrap();
    let csv = fs::read_to_string(&path).unwrap();
    fs::remove_file(&path).ok();

    assert_eq!(
        csv,
        "Job Title,Company,Job Link,Posting Date\n\
         Software Intern,Acme,https://www.linkedin.com/jobs/view/software-intern-1001,2024-05-01\n\
         Data Intern,,https://www.linkedin.com/jobs/view/data-intern-1002,2 days ago\n"
    );
}

#[test]
fn rate_limited_detail_twice_drops_only_that_posting() {
    let page = r#"
        <li><div class="base-card" data-entity-urn="urn:li:jobPosting:1"><h3 class="base-search-card__title">A</h3></div></li>
        <li><div class="base-card" data-entity-urn="urn:li:jobPosting:2"><h3 class="base-search-card__title">B</h3></div></li>"#;
    let site = FakeSite::default()
        .then("start=0", 429, "")
        .then("start=0", 200, page)
        .then("jobPosting/1", 429, "")
        .then("jobPosting/1", 429, "")
        .then("jobPosting/2", 200, &detail("Open to all students"))
        .then("start=25", 200, "<html><body></body></html>");

    let report = Scraper::new(ScraperConfig::default(), &site, NoDelay).run();

    let titles: Vec<_> = report.postings.iter().filter_map(|p| p.title.as_deref()).collect();
    assert_eq!(titles, vec!["B"]);
    assert_eq!(report.skipped, 1);
    assert_eq!(site.requests.borrow().len(), 6);
}

#[test]
fn existing_output_file_is_overwritten() {
    let path = std::env::temp_dir().join(format!("intern_jobs_{}.csv", uuid::Uuid::new_v4()));
    fs::write(&path, "stale,data\nfrom,last run\n").unwrap();

    output::save_postings(&path, &[]).unwrap();
    let csv = fs::read_to_string(&path).unwrap();
    fs::remove_file(&path).ok();

    assert_eq!(csv, "Job Title,Company,Job Link,Posting Date\n");
}
