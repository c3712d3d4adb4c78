use crate::error::SpiderError;
use crate::page::Page;
use lazy_static::lazy_static;
use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::policies::ExponentialBackoff;
use reqwest_retry::RetryTransientMiddleware;
use tracing::info;

const MAX_RETRIES: u32 = 5;

lazy_static! {
    static ref REST_CLIENT: ClientWithMiddleware = ClientBuilder::new(Client::new())
        .with(RetryTransientMiddleware::new_with_policy(
            ExponentialBackoff::builder().build_with_max_retries(MAX_RETRIES)
        ))
        .build();
}

/// Fetch one listing page. Transient failures are retried by the middleware;
/// anything surviving the retries is surfaced to the caller.
#[tracing::instrument]
pub async fn fetch_page(url: &str) -> Result<Page, SpiderError> {
    info!("Fetching listing page");

    let body = REST_CLIENT
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    Ok(Page::new(url, &body))
}
