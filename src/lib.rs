// src/lib.rs

//! Book Catalog Library
//!
//! Scrapes books.toscrape.com into a CSV catalog and serves it through a
//! read-only query API.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod server;
pub mod services;
pub mod storage;
pub mod utils;
