/// Case-insensitive substring blocklist over posting descriptions.
pub struct KeywordFilter {
    terms: Vec<String>,
}

impl KeywordFilter {
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        KeywordFilter {
            terms: terms
                .into_iter()
                .map(|t| t.as_ref().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
        }
    }

    /// First blocklist term found in `description`. An empty description never matches.
    pub fn matched_term(&self, description: &str) -> Option<&str> {
        if description.is_empty() {
            return None;
        }
        let lower = description.to_lowercase();
        self.terms
            .iter()
            .find(|term| lower.contains(term.as_str()))
            .map(String::as_str)
    }

    pub fn rejects(&self, description: &str) -> bool {
        self.matched_term(description).is_some()
    }
}
