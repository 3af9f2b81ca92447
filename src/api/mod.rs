//! Dashboard HTTP server
//!
//! Route table, shared state, and the axum serve loop.

pub mod handlers;
pub mod routes;
pub mod server;

pub use server::DashboardServer;
