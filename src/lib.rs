pub mod config;
pub mod error;
pub mod fetch;
pub mod meeting;
pub mod page;
pub mod spiders;
