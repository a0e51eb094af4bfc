//! POS Server - point-of-sale backend for small shops
//!
//! Single-binary HTTP server over an embedded SurrealDB store:
//!
//! - **Catalog** (`api::items`): priced items with soft delete
//! - **Sales** (`sales`): basket validation, price snapshots, atomic writes
//! - **Reports** (`reports`): daily/monthly aggregates and top-item ranking
//! - **Auth** (`auth`): JWT sessions over Argon2 password hashes
//! - **Images** (`api::images`): base64 blob storage for item pictures
//!
//! # Module structure
//!
//! ```text
//! pos-server/src/
//! ├── core/          # config, state, server, background tasks
//! ├── auth/          # JWT issuing/validation, auth middleware
//! ├── api/           # HTTP routes and handlers
//! ├── sales/         # transaction workflow
//! ├── reports/       # reporting engine
//! ├── ratelimit/     # login throttling
//! ├── db/            # models, repositories, seeding
//! └── utils/         # errors, logging, time
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod ratelimit;
pub mod reports;
pub mod sales;
pub mod utils;

pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use reports::ReportEngine;
pub use sales::SalesWorkflow;
pub use utils::logger::init_logger;
pub use utils::{AppError, AppResponse, AppResult};

/// Load `.env` and set up logging. Called once at startup.
pub fn setup_environment() {
    dotenv::dotenv().ok();
    init_logger();
}
