//! CLI commands

pub mod check;
pub mod list;
pub mod new;
pub mod search;
pub mod show;
