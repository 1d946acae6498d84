pub mod cli;
pub mod config;
pub mod crypto;
pub mod errors;
pub mod pin;
pub mod vault;

mod private_file;
