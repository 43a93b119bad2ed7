//! Unofficial client for [Eetlijst.nl](https://www.eetlijst.nl/), a dinner
//! planning site for student houses.
//!
//! The site has no API. This crate logs in, scrapes the main page for the
//! dinner table, and submits the same forms the web interface does.
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![deny(unused_crate_dependencies)]

mod cache;
mod client;
pub mod clock;
mod config;
mod error;
pub mod fetch;
pub mod parse;
mod status;

pub use client::{Builder, Eetlijst};
pub use config::Config;
pub use error::{Error, Result};
pub use status::{steps, Status, StatusRow};

// used by the binaries
use clap as _;
use pretty_env_logger as _;
use serde_json as _;
use tokio as _;
