pub mod cli;
pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod model;
pub mod provider;

pub use config::RelayConfig;
pub use error::{RelayError, Result};
pub use http::{HttpServerState, RelayHttpServer};
pub use model::{MessageEnvelope, Protocol};
pub use provider::{FcmProvider, MockProvider, PushProvider};
