pub mod commands;
pub mod render;
pub mod setup;

pub use commands::run;
