//! Application state wiring the session controller to infra.
//!
//! The controller is generic over its repository, provider, and auth traits;
//! AppState pins it to the concrete SQLite, Gemini, and local-file
//! implementations and resolves the signed-in user at startup.

use std::path::PathBuf;
use std::sync::Arc;

use secrecy::SecretString;

use threadly_core::auth::AuthClient;
use threadly_core::session::controller::{SessionConfig, SessionController};
use threadly_infra::auth::LocalAuth;
use threadly_infra::config::load_global_config;
use threadly_infra::filesystem::resolve_data_dir;
use threadly_infra::llm::gemini::config::GeminiConfig;
use threadly_infra::llm::gemini::GeminiProvider;
use threadly_infra::sqlite::chat::SqliteChatRepository;
use threadly_infra::sqlite::pool::DatabasePool;
use threadly_types::config::GlobalConfig;
use threadly_types::user::UserId;

/// Environment variable holding the Gemini API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Concrete controller type pinned to the infra implementations.
pub type ConcreteController = SessionController<SqliteChatRepository, GeminiProvider, LocalAuth>;

/// Shared application state for all CLI commands.
#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<ConcreteController>,
    pub user: UserId,
    pub config: GlobalConfig,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Initialize the application state: connect to DB, wire the controller.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();

        // Ensure data directory exists
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_global_config(&data_dir).await;

        // Initialize database
        let db_url = format!(
            "sqlite://{}?mode=rwc",
            data_dir.join("threadly.db").display()
        );
        let db_pool = DatabasePool::new(&db_url).await?;
        let repo = SqliteChatRepository::new(db_pool);

        // Gemini provider from environment
        let api_key = std::env::var(API_KEY_ENV).map_err(|_| {
            anyhow::anyhow!("{API_KEY_ENV} is not set. Export your Gemini API key and try again.")
        })?;
        let gemini_config = GeminiConfig::new(SecretString::from(api_key))
            .with_base_url(config.gemini_base_url.clone());
        let provider = GeminiProvider::new(gemini_config);

        // Resolve the signed-in user, minting an id on first run
        let auth = Arc::new(LocalAuth::new(&data_dir));
        let user = auth.current_user().await?;

        let session_config = SessionConfig {
            default_model: config.default_model,
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        };
        let controller = SessionController::new(
            Arc::new(repo),
            Arc::new(provider),
            auth,
            session_config,
        );

        Ok(Self {
            controller: Arc::new(controller),
            user,
            config,
            data_dir,
        })
    }
}
