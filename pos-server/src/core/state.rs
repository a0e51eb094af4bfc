use std::sync::Arc;

use surrealdb::engine::local::Db;
use surrealdb::Surreal;

use crate::auth::JwtService;
use crate::core::tasks::{BackgroundTasks, TaskKind};
use crate::core::Config;
use crate::db::{seed, DbService};
use crate::ratelimit::{LoginRateLimiter, RateLimitConfig};
use crate::utils::AppResult;

/// Shared server state
///
/// One instance is cloned into every handler via axum's `State` extractor;
/// all fields are cheap to clone (`Surreal` and `Arc` are handles).
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    /// Embedded database handle
    pub db: Surreal<Db>,
    pub jwt_service: Arc<JwtService>,
    /// Login rate limiter, keyed by client IP
    pub login_limiter: Arc<LoginRateLimiter>,
}

impl ServerState {
    /// Open the database and wire up the services
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        let db_service = DbService::connect(&config.data_dir).await?;

        Ok(Self {
            config: config.clone(),
            db: db_service.db,
            jwt_service: Arc::new(JwtService::with_config(config.jwt.clone())),
            login_limiter: LoginRateLimiter::new(RateLimitConfig::default()),
        })
    }

    /// In-memory state for tests
    pub async fn for_tests() -> AppResult<Self> {
        let db_service = DbService::connect_memory().await?;
        let config = Config::from_env();

        Ok(Self {
            config: config.clone(),
            db: db_service.db,
            jwt_service: Arc::new(JwtService::with_config(config.jwt.clone())),
            login_limiter: LoginRateLimiter::new(RateLimitConfig::default()),
        })
    }

    /// Register the server's background tasks. Called once before serving.
    pub fn start_background_tasks(&self, tasks: &mut BackgroundTasks) {
        let db = DbService {
            db: self.db.clone(),
        };
        let email = self.config.admin_email.clone();
        let password = self.config.admin_password.clone();
        tasks.spawn("admin_seed", TaskKind::Warmup, async move {
            if let Err(e) = seed::seed_admin(&db, &email, &password).await {
                tracing::error!(error = %e, "Admin seeding failed");
            }
        });

        let limiter = self.login_limiter.clone();
        let token = tasks.shutdown_token();
        tasks.spawn(
            "ratelimit_sweeper",
            TaskKind::Periodic,
            limiter.run_sweeper(token),
        );
    }

    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }
}
