//! Botdash - Bot Dashboard Proxy
//!
//! A lightweight dashboard backend that forwards browser requests to the bot
//! control API and relays its live video stream.
//!
//! ## Features
//!
//! - Generic GET/POST forwarding with a uniform 502 error envelope
//! - Unbuffered streaming relay of the multipart video endpoint
//! - Bounded-timeout upstream health probing
//! - Config file with legacy key aliases and environment overrides

pub mod api;
pub mod config;
pub mod error;
pub mod proxy;

pub use config::Settings;
pub use error::{BotdashError, Result};
