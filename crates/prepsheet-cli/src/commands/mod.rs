//! Command handlers

pub mod board;
pub mod config;
pub mod progress;
pub mod question;
pub mod reset;
pub mod status;
pub mod subtopic;
pub mod theme;
pub mod topic;
pub mod transfer;
