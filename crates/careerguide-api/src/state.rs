//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by both CLI and RPC API.
//! Services are generic over repository traits, but AppState pins them to the
//! concrete infra implementations.

use std::path::PathBuf;
use std::sync::Arc;

use careerguide_core::chat::message::MessageService;
use careerguide_core::chat::session::SessionService;
use careerguide_core::identity::IdentityResolver;
use careerguide_core::llm::reply::ReplyGenerator;
use careerguide_core::llm::title::TitleGenerator;
use careerguide_core::user::service::UserService;
use careerguide_infra::filesystem::ensure_data_dir;
use careerguide_infra::identity::ConfiguredIdentityResolver;
use careerguide_infra::llm::build_chain;
use careerguide_infra::sqlite::chat::SqliteChatRepository;
use careerguide_infra::sqlite::pool::{DatabasePool, default_database_url};
use careerguide_infra::sqlite::user::SqliteUserRepository;
use careerguide_types::config::AppConfig;

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcreteSessionService = SessionService<SqliteChatRepository>;
pub type ConcreteMessageService = MessageService<SqliteChatRepository>;
pub type ConcreteUserService = UserService<SqliteUserRepository>;

/// Shared application state holding all services.
#[derive(Clone)]
pub struct AppState {
    pub session_service: Arc<ConcreteSessionService>,
    pub message_service: Arc<ConcreteMessageService>,
    pub user_service: Arc<ConcreteUserService>,
    pub identity: Arc<dyn IdentityResolver>,
    pub db_pool: DatabasePool,
}

/// Database URL from config, else `{data_dir}/careerguide.db`.
pub fn database_url(config: &AppConfig, data_dir: &std::path::Path) -> String {
    config
        .database
        .url
        .clone()
        .unwrap_or_else(|| default_database_url(data_dir))
}

impl AppState {
    /// Initialize the application state: connect to DB, build provider
    /// chains, wire services.
    pub async fn init(config: &AppConfig, data_dir: PathBuf) -> anyhow::Result<Self> {
        ensure_data_dir(&data_dir).await?;

        let db_pool = DatabasePool::new(&database_url(config, &data_dir)).await?;

        let reply_chain = build_chain(&config.reply.candidates);
        let title_chain = build_chain(&config.title.candidates);
        if reply_chain.is_empty() {
            tracing::warn!("No reply candidates have API keys; replies will use fallback text");
        }
        tracing::info!(
            reply = ?reply_chain.labels(),
            title = ?title_chain.labels(),
            "Completion candidates configured"
        );

        let replies = ReplyGenerator::new(reply_chain, config.reply.params());
        let titles = TitleGenerator::new(title_chain, config.title.params());
        let identity = Arc::new(ConfiguredIdentityResolver::from_config(&config.auth));

        Ok(Self::from_parts(db_pool, replies, titles, identity))
    }

    /// Wire services around an open pool and prebuilt generators.
    pub fn from_parts(
        db_pool: DatabasePool,
        replies: ReplyGenerator,
        titles: TitleGenerator,
        identity: Arc<dyn IdentityResolver>,
    ) -> Self {
        let chat_repo = Arc::new(SqliteChatRepository::new(db_pool.clone()));
        let replies = Arc::new(replies);
        let titles = Arc::new(titles);

        let session_service = SessionService::new(chat_repo.clone(), titles.clone());
        let message_service = MessageService::new(chat_repo, replies, titles);
        let user_service = UserService::new(SqliteUserRepository::new(db_pool.clone()));

        Self {
            session_service: Arc::new(session_service),
            message_service: Arc::new(message_service),
            user_service: Arc::new(user_service),
            identity,
            db_pool,
        }
    }
}
