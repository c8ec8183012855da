pub mod routes;
pub mod server;

pub use server::{HttpServerState, RelayHttpServer};
