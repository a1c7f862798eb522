pub mod config;
pub mod defaults;
pub mod project;
pub mod report;
pub mod scoring;
pub mod series;
