//! Policy Registry API Server
//!
//! REST endpoints over the JSON file stores. Every response body is the
//! envelope `{message, status, data}`; errors carry `status: "error"` and
//! `data: null`.
//!
//! ## Endpoints
//!
//! ### Health
//! - GET /health - Liveness and policy count
//! - GET /ready - Data directories reachable
//!
//! ### Policy Dashboard
//! - GET /api/policy-dashboard - Search policies (filters, page, size, sortBy, direction)
//! - POST /api/policy-dashboard - Add a policy (always created as Pending)
//! - GET /api/policy-dashboard/options - Dropdown options
//!
//! ### My Application Policies
//! - GET /api/my-app-policies - List policies (page, size, sortBy, direction)
//! - GET /api/my-app-policies/:id - Policy details
//! - PUT /api/my-app-policies/:id/expiration - Change the expiration date

pub mod config;
pub mod dto;
pub mod error;
pub mod metrics;
pub mod routes;
pub mod server;
pub mod state;

pub use config::*;
pub use dto::*;
pub use error::*;
pub use routes::*;
pub use server::*;
pub use state::*;
