//! `serve` command: open the store, seed it, and run the HTTP server.

use camino::Utf8Path;
use drafter_core::{Catalog, CatalogStore, QuestionSet, SeedOutcome, builtin_seed, load_seed};
use drafter_scorer::{Recommender, WeightedTraitScorer};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::{
    CliError,
    config::{ServeArgs, ServeConfig},
    proposal::ProposalRecorder,
    routes::{AppState, router},
};

pub(crate) async fn run_serve(args: ServeArgs) -> Result<(), CliError> {
    let config = args.into_config()?;
    info!(
        listen = %config.listen,
        database = %config.database,
        write_mode = ?config.write_mode,
        "configuration loaded"
    );
    let state = build_state(&config)?;

    let listener = TcpListener::bind(config.listen)
        .await
        .map_err(|source| CliError::Bind {
            addr: config.listen,
            source,
        })?;
    info!(listen_addr = %config.listen, "serving HTTP");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(CliError::Serve)?;
    info!("server shut down");
    Ok(())
}

/// Resolve questions, open and seed the store, and assemble handler state.
pub(crate) fn build_state(config: &ServeConfig) -> Result<AppState, CliError> {
    let questions = load_questions(config.questions.as_deref())?;
    info!(questions = questions.len(), "question set ready");

    let store = config.database.open()?;
    seed_store(store.as_ref(), config.seed.as_deref())?;

    let recommender = Recommender::new(
        WeightedTraitScorer::new(questions),
        config.default_icon.clone(),
    );
    Ok(AppState::new(
        store,
        recommender,
        config.write_mode,
        ProposalRecorder::new(config.proposals_dir.clone()),
    ))
}

pub(crate) fn load_questions(path: Option<&Utf8Path>) -> Result<QuestionSet, CliError> {
    let Some(path) = path else {
        return Ok(QuestionSet::default());
    };
    let contents = drafter_fs::read_to_string_if_exists(path)
        .and_then(|contents| {
            contents.ok_or_else(|| std::io::Error::from(std::io::ErrorKind::NotFound))
        })
        .map_err(|source| CliError::ReadQuestions {
            path: path.to_path_buf(),
            source,
        })?;
    QuestionSet::from_json_str(&contents).map_err(|source| CliError::InvalidQuestions {
        path: path.to_path_buf(),
        source,
    })
}

/// Seed an empty store from `seed_path`, or from the built-in table when unset.
pub(crate) fn seed_store(
    store: &dyn CatalogStore,
    seed_path: Option<&Utf8Path>,
) -> Result<Option<SeedOutcome>, CliError> {
    let Some(seed) = resolve_seed(seed_path)? else {
        return Ok(None);
    };
    let outcome = store.seed_if_empty(&seed).map_err(CliError::SeedStore)?;
    match outcome {
        SeedOutcome::Seeded { records } => info!(records, "seeded empty catalog store"),
        SeedOutcome::AlreadyPopulated { records } => {
            info!(records, "catalog store already populated; seed skipped");
        }
        SeedOutcome::EmptySeed => warn!("seed document holds no champions"),
    }
    Ok(Some(outcome))
}

fn resolve_seed(seed_path: Option<&Utf8Path>) -> Result<Option<Catalog>, CliError> {
    match seed_path {
        None => Ok(Some(builtin_seed()?)),
        Some(path) => {
            let seed = load_seed(path)?;
            if seed.is_none() {
                warn!(path = %path, "seed document not found; skipping seeding");
            }
            Ok(seed)
        }
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
