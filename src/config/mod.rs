//! User configuration (`~/.sec.toml`) and path resolution.

pub mod settings;

pub use settings::{expand_path, Settings};
