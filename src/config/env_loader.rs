use crate::config::model::Config;
use std::env;

const ARCHIVE_VAR: &str = "CITY_SCRAPERS_ARCHIVE";

pub fn load_config() -> Config {
    Config {
        archive_mode: load_bool_config(ARCHIVE_VAR, false),
    }
}

fn load_bool_config(name: &str, default: bool) -> bool {
    env::var(name)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .unwrap_or_else(|_| {
            panic!(
                "Invalid config '{}'. Expected either 'true' or 'false'",
                name
            )
        })
}
