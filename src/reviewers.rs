use regex::Regex;

/// Finds the email addresses of reviewers mentioned in a pull request description.
#[derive(Clone, Debug)]
pub struct ReviewerExtractor {
    pattern: Regex,
}

impl ReviewerExtractor {
    /// Creates an extractor matching addresses of the given organization domain
    /// (e.g. `tokopedia.com`).
    pub fn new(domain: &str) -> anyhow::Result<Self> {
        let pattern = Regex::new(&format!("[a-zA-Z0-9._-]+@{}", regex::escape(domain)))?;
        Ok(Self { pattern })
    }

    /// Returns all reviewer addresses in order of appearance. Repeated mentions are kept.
    pub fn extract(&self, body: &str) -> Vec<String> {
        self.pattern
            .find_iter(body)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}
