//! HTTP server for Strand.
//!
//! Exposes the string store over a small JSON API:
//!
//! | Method   | Path                                   | Purpose                   |
//! |----------|----------------------------------------|---------------------------|
//! | `POST`   | `/strings`                             | store a string            |
//! | `GET`    | `/strings/:value`                      | fetch one string          |
//! | `DELETE` | `/strings/:value`                      | remove one string         |
//! | `GET`    | `/strings`                             | structured filtering      |
//! | `GET`    | `/strings/filter-by-natural-language`  | free-text filtering       |
//! | `GET`    | `/health`, `/info`                     | liveness and version      |

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ApiError, ServerError, ServerResult};
pub use server::StrandServer;
pub use state::AppState;
