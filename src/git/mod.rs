mod repo;

pub use repo::{parse_numstat, GitRepo};
