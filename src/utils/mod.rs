//! Utility modules for pwa-devtools
//!
//! - `error`: the library error type
//! - `files`: moving files and directories
//! - `http`: request rewriting and headers for the dev server
//! - `images`: icon rasterisation and PNG output
//! - `logger`: tracing subscriber setup

pub mod error;
pub mod files;
pub mod http;
#[cfg(feature = "png")]
pub mod images;
pub mod logger;
