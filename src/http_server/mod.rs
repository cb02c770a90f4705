//! # formcodec HTTP Server Module
//!
//! Hosts a directory of schemas as HTML forms.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/metrics` - Form counters
//! - `GET /forms` - Names of the hosted forms
//! - `GET /forms/:name` - Rendered form page
//! - `POST /forms/:name` - Submission, urlencoded or multipart

pub mod config;
pub mod errors;
pub mod form_routes;
pub mod observability_routes;
pub mod server;
pub mod state;

pub use config::HttpServerConfig;
pub use errors::{HttpError, HttpResult};
pub use server::HttpServer;
pub use state::{FormsState, HostedForm};
