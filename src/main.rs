use std::{future::IntoFuture, process, sync::Arc};

use linggan::{
    application::{
        admin::sensitive_words::AdminSensitiveWordService,
        content::{
            creators::CreatorService, messages::MessageService, notes::NoteService,
            posts::PostService, resources::ResourceService, spirit_posts::SpiritPostService,
        },
        error::AppError,
        moderation::ModerationGuard,
        repos::{
            CreatorsWriteRepo, MessagesWriteRepo, NotesWriteRepo, PostsWriteRepo,
            ResourcesWriteRepo, SensitiveWordsRepo, SensitiveWordsWriteRepo, SpiritPostsRepo,
            SpiritPostsWriteRepo,
        },
    },
    cache::{CacheConfig, SensitiveWordCache, SystemClock},
    config,
    infra::{
        db::PostgresRepositories,
        error::InfraError,
        http::{self, ApiState},
        telemetry,
    },
};
use tokio::sync::watch;
use tracing::{Dispatch, Level, dispatcher, error, info, warn};
use tracing_subscriber::fmt as tracing_fmt;

const CLI_ACTOR: &str = "cli";

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    match command {
        config::Command::Serve(_) => run_serve(settings).await,
        config::Command::Words(args) => run_words(settings, args.command).await,
    }
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let repositories = init_repositories(&settings).await?;
    let state = build_api_state(repositories, &settings);

    if state.admin_token.is_none() {
        warn!(
            target = "linggan::serve",
            "no admin token configured; admin routes will reject every request"
        );
    }

    let outcome = state.cache.refresh_cache().await;
    info!(
        target = "linggan::serve",
        outcome = ?outcome,
        "Sensitive-word cache warmed"
    );

    serve_http(&settings, state).await
}

async fn run_words(
    settings: config::Settings,
    command: config::WordsCommand,
) -> Result<(), AppError> {
    let repositories = init_repositories(&settings).await?;
    let words = word_service(&repositories, &settings);

    match command {
        config::WordsCommand::List => {
            for record in words.list_words().await {
                println!("{}\t{}", record.id, record.word);
            }
        }
        config::WordsCommand::Add { word } => {
            let record = words.add_word(CLI_ACTOR, &word).await?;
            println!("{}\t{}", record.id, record.word);
        }
        config::WordsCommand::Remove { id } => {
            let removed = words.remove_word(CLI_ACTOR, id).await?;
            println!("removed {}", removed.id);
        }
    }

    Ok(())
}

async fn init_repositories(
    settings: &config::Settings,
) -> Result<Arc<PostgresRepositories>, AppError> {
    let database_url = settings
        .database
        .url
        .as_ref()
        .ok_or_else(|| InfraError::configuration("database url is not configured"))?;

    let pool = PostgresRepositories::connect(database_url, settings.database.max_connections.get())
        .await
        .map_err(InfraError::Connect)?;

    PostgresRepositories::run_migrations(&pool)
        .await
        .map_err(InfraError::from)?;

    Ok(Arc::new(PostgresRepositories::new(pool)))
}

fn build_cache(
    repositories: &Arc<PostgresRepositories>,
    settings: &config::Settings,
) -> Arc<SensitiveWordCache> {
    let words_repo: Arc<dyn SensitiveWordsRepo> = repositories.clone();
    Arc::new(SensitiveWordCache::new(
        &CacheConfig::from(&settings.moderation),
        words_repo,
        Arc::new(SystemClock),
    ))
}

fn word_service(
    repositories: &Arc<PostgresRepositories>,
    settings: &config::Settings,
) -> AdminSensitiveWordService {
    let words_repo: Arc<dyn SensitiveWordsRepo> = repositories.clone();
    let words_write_repo: Arc<dyn SensitiveWordsWriteRepo> = repositories.clone();
    AdminSensitiveWordService::new(
        words_repo,
        words_write_repo,
        build_cache(repositories, settings),
    )
}

fn build_api_state(repositories: Arc<PostgresRepositories>, settings: &config::Settings) -> ApiState {
    let words_repo: Arc<dyn SensitiveWordsRepo> = repositories.clone();
    let words_write_repo: Arc<dyn SensitiveWordsWriteRepo> = repositories.clone();
    let posts_write_repo: Arc<dyn PostsWriteRepo> = repositories.clone();
    let notes_write_repo: Arc<dyn NotesWriteRepo> = repositories.clone();
    let spirit_posts_repo: Arc<dyn SpiritPostsRepo> = repositories.clone();
    let spirit_posts_write_repo: Arc<dyn SpiritPostsWriteRepo> = repositories.clone();
    let resources_write_repo: Arc<dyn ResourcesWriteRepo> = repositories.clone();
    let creators_write_repo: Arc<dyn CreatorsWriteRepo> = repositories.clone();
    let messages_write_repo: Arc<dyn MessagesWriteRepo> = repositories.clone();

    // One cache per process, shared by the admin service and every guard.
    let cache = build_cache(&repositories, settings);
    let guard = ModerationGuard::new(cache.clone());

    ApiState {
        sensitive_words: Arc::new(AdminSensitiveWordService::new(
            words_repo,
            words_write_repo,
            cache.clone(),
        )),
        cache,
        posts: Arc::new(PostService::new(posts_write_repo, guard.clone())),
        notes: Arc::new(NoteService::new(notes_write_repo, guard.clone())),
        spirit_posts: Arc::new(SpiritPostService::new(
            spirit_posts_repo,
            spirit_posts_write_repo,
            guard.clone(),
        )),
        resources: Arc::new(ResourceService::new(resources_write_repo, guard.clone())),
        creators: Arc::new(CreatorService::new(creators_write_repo, guard.clone())),
        messages: Arc::new(MessageService::new(messages_write_repo, guard)),
        admin_token: settings.admin.token.as_deref().map(Arc::<str>::from),
        db: Some(repositories),
    }
}

async fn serve_http(settings: &config::Settings, state: ApiState) -> Result<(), AppError> {
    let router = http::build_router(state);

    let listener = tokio::net::TcpListener::bind(settings.server.addr)
        .await
        .map_err(|err| InfraError::bind(settings.server.addr, err))?;
    info!(
        target = "linggan::serve",
        addr = %settings.server.addr,
        "HTTP server listening"
    );

    let (stop_tx, mut stop_rx) = watch::channel(false);
    let server = axum::serve(listener, router.into_make_service()).with_graceful_shutdown(
        async move {
            let _ = stop_rx.changed().await;
        },
    );
    let mut server = tokio::spawn(server.into_future());

    tokio::select! {
        joined = &mut server => return server_result(joined),
        _ = shutdown_signal() => {}
    }

    info!(
        target = "linggan::serve",
        grace_seconds = settings.server.graceful_shutdown.as_secs(),
        "Shutdown requested; draining connections"
    );
    let _ = stop_tx.send(true);

    match tokio::time::timeout(settings.server.graceful_shutdown, &mut server).await {
        Ok(joined) => server_result(joined),
        Err(_) => {
            warn!(
                target = "linggan::serve",
                "Graceful shutdown timed out; aborting open connections"
            );
            server.abort();
            Ok(())
        }
    }
}

fn server_result(
    joined: Result<std::io::Result<()>, tokio::task::JoinError>,
) -> Result<(), AppError> {
    match joined {
        Ok(result) => result.map_err(|err| AppError::unexpected(format!("server error: {err}"))),
        Err(err) => Err(AppError::unexpected(format!("server task failed: {err}"))),
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(
            target = "linggan::serve",
            error = %err,
            "Failed to listen for shutdown signal"
        );
        std::future::pending::<()>().await;
    }
}
