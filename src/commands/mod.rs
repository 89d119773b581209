pub mod add;
pub mod completions;
pub mod config;
pub mod current;
pub mod list;
pub mod remove;
pub mod rename;
pub mod switch;
