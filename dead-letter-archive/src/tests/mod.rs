pub mod classify;
pub mod common;
pub mod config;
pub mod key;
