use crate::error::SpiderError;
use scraper::{ElementRef, Html, Selector};

/// One fetched listing page: the originating URL plus the parsed HTML tree.
/// Spiders only ever read from it; nothing is mutated after construction.
pub struct Page {
    pub url: String,
    document: Html,
}

impl Page {
    pub fn new(url: impl Into<String>, html: &str) -> Self {
        Self {
            url: url.into(),
            document: Html::parse_document(html),
        }
    }

    pub fn select(&self, css: &str) -> Result<Vec<ElementRef<'_>>, SpiderError> {
        let selector = Selector::parse(css)
            .map_err(|e| SpiderError::Parse(format!("invalid selector {css:?}: {e}")))?;

        Ok(self.document.select(&selector).collect())
    }

    /// Inner text of the first `<script>` tag containing `marker`, for pages
    /// that embed their data as a JSON blob in inline javascript.
    pub fn script_containing(&self, marker: &str) -> Result<String, SpiderError> {
        self.select("script")?
            .iter()
            .map(|script| script.text().collect::<String>())
            .find(|text| text.contains(marker))
            .ok_or_else(|| {
                SpiderError::Parse(format!(
                    "no script containing {marker:?} on {}",
                    self.url
                ))
            })
    }
}
