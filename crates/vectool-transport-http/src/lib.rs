//! HTTP/JSON transport adapter for vectool.
//! Exposes the tool catalog over `GET /tools/list` and `POST /tools/call`.

pub mod cors;
mod error;
pub mod router;
pub mod server;

pub use cors::cors_layer;
pub use error::HttpTransportError;
pub use router::{build_router, AppState};
pub use server::HttpServer;
