//! Core evalbox library (config, storage, persisted state, request client).

pub mod api;
pub mod config;
pub mod eval;
mod fsutil;
pub mod logging;
pub mod state;
pub mod storage;
