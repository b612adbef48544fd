//! UniRAG - a terminal client for the UniRAG chat service
//!
//! This library exposes modules for use in integration tests.

pub mod adapters;
pub mod app;
pub mod chat_service;
pub mod cli;
pub mod clipboard;
pub mod error;
pub mod markdown;
pub mod models;
pub mod session;
pub mod startup;
pub mod terminal;
pub mod thread_store;
pub mod traits;
pub mod ui;
pub mod widgets;
