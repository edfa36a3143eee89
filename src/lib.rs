mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, middlewares, repositories, routes};
pub use infrastructure::{auth, db, storage, utils};

use auth::jwt::JwtService;
use errors::AppError;
use repositories::sqlx_repo::{SqlxImageRepo, SqlxPostRepo, SqlxUserRepo};
use settings::AppConfig;
use storage::s3::S3Signer;
use use_cases::{auth::AuthHandler, posts::PostHandler, uploads::UploadAuthorizer};

pub type AppAuthHandler = AuthHandler<SqlxUserRepo, JwtService>;
pub type AppPostHandler = PostHandler<SqlxPostRepo>;
pub type AppUploadAuthorizer = UploadAuthorizer<SqlxImageRepo, S3Signer>;

pub struct AppState {
    pub auth_handler: AppAuthHandler,
    pub post_handler: AppPostHandler,
    pub upload_handler: AppUploadAuthorizer,
}

impl AppState {
    pub async fn new(config: &AppConfig, pool: sqlx::PgPool) -> Result<Self, AppError> {
        let jwt_service = JwtService::new(config);
        let signer = S3Signer::from_config(&config.storage, config.is_production()).await?;

        let auth_handler = AuthHandler::new(SqlxUserRepo::new(pool.clone()), jwt_service);
        let post_handler = PostHandler::new(SqlxPostRepo::new(pool.clone()));
        let upload_handler =
            UploadAuthorizer::new(SqlxImageRepo::new(pool), signer, &config.storage);

        Ok(AppState {
            auth_handler,
            post_handler,
            upload_handler,
        })
    }
}
