use std::fs::File;
use std::io::Write;
use std::path::Path;
use log::info;

use crate::error::OutputError;
use crate::posting::{Posting, PostingRow};

pub const HEADERS: [&str; 4] = ["Job Title", "Company", "Job Link", "Posting Date"];

/// Writes the header row followed by one row per posting, in order.
pub fn write_postings<W: Write>(writer: W, postings: &[Posting]) -> Result<(), OutputError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    // explicit header so an empty run still produces one
    csv_writer.write_record(HEADERS)?;
    for posting in postings {
        csv_writer.serialize(PostingRow::from(posting))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Creates (or truncates) `path` and writes all postings to it.
pub fn save_postings<P: AsRef<Path>>(path: P, postings: &[Posting]) -> Result<(), OutputError> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_postings(file, postings)?;
    info!("Saved {} job postings to {}", postings.len(), path.display());
    Ok(())
}
