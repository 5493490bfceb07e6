use serde::Serialize;

/// One job listing as read from a search results card.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Posting {
    pub id: Option<String>,
    pub title: Option<String>,
    pub company: Option<String>,
    pub link: Option<String>,
    pub posted_date: Option<String>,
}

/// Output row. Absent fields are written as empty cells.
#[derive(Debug, Serialize)]
pub struct PostingRow<'a> {
    #[serde(rename = "Job Title")]
    pub title: &'a str,
    #[serde(rename = "Company")]
    pub company: &'a str,
    #[serde(rename = "Job Link")]
    pub link: &'a str,
    #[serde(rename = "Posting Date")]
    pub posted_date: &'a str,
}

impl<'a> From<&'a Posting> for PostingRow<'a> {
    fn from(p: &'a Posting) -> Self {
        PostingRow {
            title: p.title.as_deref().unwrap_or_default(),
            company: p.company.as_deref().unwrap_or_default(),
            link: p.link.as_deref().unwrap_or_default(),
            posted_date: p.posted_date.as_deref().unwrap_or_default(),
        }
    }
}

/// `urn:li:jobPosting:3812345678` -> `3812345678`
pub fn id_from_urn(urn: &str) -> Option<String> {
    urn.rsplit(':')
        .next()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Prefixes site-relative links with `origin`; anything else is returned as is.
pub fn absolutize_link(link: &str, origin: &str) -> String {
    if link.starts_with('/') {
        format!("{}{}", origin, link)
    } else {
        link.to_string()
    }
}
