pub mod cliopt;
pub mod config;
pub mod error;
pub mod input;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod plugin;
