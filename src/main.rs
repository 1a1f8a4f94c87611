use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use squawk::{
    chat::{CountingFilter, PhraseFilter},
    counting::{CountingRepository, InMemoryCountingRepository, PostgresCountingRepository},
    phrase::{InMemoryPhraseRepository, PhraseRepository, PostgresPhraseRepository},
    storage::schema,
    AppState, Config, CountingService, Dispatcher, HttpGuessEvaluator, InMemoryDisplayResolver,
    PhraseService,
};

type Repositories = (Arc<dyn CountingRepository>, Arc<dyn PhraseRepository>);

async fn repositories(config: &Config) -> Result<Repositories, Box<dyn std::error::Error>> {
    match &config.database_url {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(database_url)
                .await?;
            schema::ensure_schema(&pool).await?;
            info!("Using PostgreSQL storage");
            let counting: Arc<dyn CountingRepository> =
                Arc::new(PostgresCountingRepository::new(pool.clone()));
            let phrase: Arc<dyn PhraseRepository> = Arc::new(PostgresPhraseRepository::new(pool));
            Ok((counting, phrase))
        }
        None => {
            warn!("DATABASE_URL not set, state will not survive a restart");
            let counting: Arc<dyn CountingRepository> = Arc::new(InMemoryCountingRepository::new());
            let phrase: Arc<dyn PhraseRepository> = Arc::new(InMemoryPhraseRepository::new());
            Ok((counting, phrase))
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "squawk=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::parse();
    info!(
        evaluator = %config.evaluator,
        allow_repeats = config.allow_repeats,
        "Starting squawk"
    );

    let (counting_repository, phrase_repository) = repositories(&config).await?;
    let registry = Arc::new(config.channel_registry());
    let names = Arc::new(InMemoryDisplayResolver::new());

    let counting = Arc::new(CountingService::new(
        counting_repository,
        config.counting_rules(),
    ));
    let phrase = Arc::new(PhraseService::new(
        phrase_repository,
        config.phrase_matcher()?,
    ));
    let evaluator = Arc::new(HttpGuessEvaluator::new(
        &config.evaluator,
        config.evaluator_timeout(),
    )?);

    let dispatcher = Dispatcher::new()
        .with_filter(Arc::new(CountingFilter::new(
            counting.clone(),
            evaluator,
            names.clone(),
            registry.clone(),
        )))
        .with_filter(Arc::new(PhraseFilter::new(
            phrase.clone(),
            names.clone(),
            registry.clone(),
        )));
    info!(
        filters = dispatcher.filter_count(),
        tenants = registry.tenant_count(),
        "Dispatcher ready"
    );

    let app = squawk::app_router(AppState::new(
        counting,
        phrase,
        Arc::new(dispatcher),
        names,
    ));

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    info!("Server running on http://{}", config.bind);
    axum::serve(listener, app).await?;

    Ok(())
}
