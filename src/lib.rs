//! Rock-paper-scissors bracket tournament server.
//!
//! Matches advance on a fixed wall-clock round schedule; all match and
//! tournament state is derived on read from the write-once move log.

pub mod cache;
pub mod config;
pub mod db;
pub mod game;
pub mod http;
pub mod metrics;
