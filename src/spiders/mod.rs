use crate::config::model::ScrapeContext;
use crate::error::SpiderError;
use crate::meeting::model::Meeting;
use crate::page::Page;

pub mod det_eight_mile_woodward;
pub mod det_land_bank;

use det_eight_mile_woodward::DetEightMileWoodwardSpider;
use det_land_bank::DetLandBankSpider;

/// One per-agency extractor. Spiders hold no state; each call works on a
/// single fetched page and returns every meeting it could normalize.
pub trait Spider {
    fn name(&self) -> &'static str;
    fn agency(&self) -> &'static str;
    fn timezone(&self) -> &'static str {
        "America/Detroit"
    }
    fn start_urls(&self) -> Vec<String>;

    /// Extract meetings from one fetched listing page, in source order.
    fn parse(&self, page: &Page, ctx: &ScrapeContext) -> Result<Vec<Meeting>, SpiderError>;

    /// Prior-period listing pages to feed back through `parse`. Discovery is
    /// bounded by what the current page links to; archive mode filters
    /// entries at extraction time, never the discovery itself.
    fn follow(&self, _page: &Page) -> Result<Vec<String>, SpiderError> {
        Ok(Vec::new())
    }
}

pub fn all() -> Vec<Box<dyn Spider>> {
    vec![
        Box::new(DetEightMileWoodwardSpider),
        Box::new(DetLandBankSpider),
    ]
}

pub fn by_name(name: &str) -> Option<Box<dyn Spider>> {
    all().into_iter().find(|spider| spider.name() == name)
}
