use std::sync::OnceLock;

use scraper::{Html, Selector};

fn paragraph_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| Selector::parse("p").expect("Invalid paragraph selector"))
}

/// Extracts the branch name from the release notes of a build.
///
/// The branch is expected to be the text of the first paragraph of the (HTML) notes.
/// The parser is error tolerant, so notes without any paragraph simply produce an
/// empty branch name.
pub fn extract_branch(notes: &str) -> String {
    let document = Html::parse_fragment(notes);
    document
        .select(paragraph_selector())
        .next()
        .map(|paragraph| paragraph.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}
