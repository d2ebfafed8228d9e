//! smtp-hub CLI library

pub mod commands;

pub use commands::{Command, MessageArgs};
