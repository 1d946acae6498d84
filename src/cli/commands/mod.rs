//! One module per subcommand, each exposing `execute`.

pub mod change_pin;
pub mod completions;
pub mod delete;
pub mod export;
pub mod get;
pub mod import_cmd;
pub mod list;
pub mod remove_pin;
pub mod set;
pub mod set_pin;
pub mod version;
