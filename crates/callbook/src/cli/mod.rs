pub mod client;
pub mod commands;
pub mod display;
