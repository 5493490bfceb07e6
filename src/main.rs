use intern_scraper_lib::{config, logger, output};
use intern_scraper_lib::{ReqwestFetcher, ScraperConfig, Scraper, ThreadDelay};

use std::process::ExitCode;
use log::{info, error};

const EXIT_WRITE_FAILED: u8 = 1;
const EXIT_STOPPED_EARLY: u8 = 2;

fn main() -> ExitCode {
    logger::init();
    info!("Starting intern job scraper...");

    let config = ScraperConfig::load(config::CONFIG_FILE);
    info!(
        "Searching '{}' in '{}' (geoId {})",
        config.keyword, config.location, config.geo_id
    );

    let fetcher = match ReqwestFetcher::new(&config) {
        Ok(f) => f,
        Err(e) => {
            error!("{}", e);
            return ExitCode::from(EXIT_STOPPED_EARLY);
        }
    };

    let output_file = config.output_file.clone();
    let scraper = Scraper::new(config, fetcher, ThreadDelay);
    let report = scraper.run();

    // Results are written whatever the reason the loop stopped.
    if let Err(e) = output::save_postings(&output_file, &report.postings) {
        error!("Error saving CSV {}: {}", output_file, e);
        return ExitCode::from(EXIT_WRITE_FAILED);
    }

    if report.termination.is_clean() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_STOPPED_EARLY)
    }
}
