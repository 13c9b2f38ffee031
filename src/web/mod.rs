//! Single-client HTTP control surface.
//!
//! Not a general HTTP server: one connection at a time, three fixed
//! routes, `Connection: close` on every response.

pub mod page;
pub mod parser;
pub mod routes;
pub mod server;

pub use routes::Route;
pub use server::HttpControlServer;
