pub mod cache;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exec;
pub mod formatter;
pub mod git;
pub mod model;
pub mod output;
pub mod project;
pub mod pypi;
pub mod report;
pub mod runner;
pub mod stats;
pub mod util;
