// Composition root: configuration, request extraction, routing and the
// background tasks. The binary entry point lives next to it in main.rs.

pub mod config;
pub mod extract;
pub mod graphql;
pub mod http;
pub mod state;
pub mod workers;
