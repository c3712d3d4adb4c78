use detscrapers::config::env_loader::load_config;
use detscrapers::config::model::ScrapeContext;
use detscrapers::error::SpiderError;
use detscrapers::fetch::fetch_page;
use detscrapers::spiders::{self, Spider};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = load_config();
    let ctx = ScrapeContext::new(&config);

    let selected: Vec<Box<dyn Spider>> = match std::env::args().nth(1) {
        Some(name) => vec![spiders::by_name(&name)
            .unwrap_or_else(|| panic!("Unknown spider '{}'", name))],
        None => spiders::all(),
    };

    for spider in selected {
        if let Err(err) = run_spider(spider.as_ref(), &ctx).await {
            error!("Spider {} failed: {}", spider.name(), err);
        }
    }
}

async fn run_spider(spider: &dyn Spider, ctx: &ScrapeContext) -> Result<(), SpiderError> {
    info!(
        "Running spider {} for {} ({})",
        spider.name(),
        spider.agency(),
        spider.timezone()
    );

    for url in spider.start_urls() {
        let page = fetch_page(&url).await?;
        let mut meetings = spider.parse(&page, ctx)?;

        for prev_url in spider.follow(&page)? {
            let prev_page = fetch_page(&prev_url).await?;
            meetings.extend(spider.parse(&prev_page, ctx)?);
        }

        info!("Spider {} emitted {} meetings", spider.name(), meetings.len());

        for meeting in &meetings {
            let line = serde_json::to_string(meeting).expect("meeting serializes to JSON");
            println!("{line}");
        }
    }

    Ok(())
}
