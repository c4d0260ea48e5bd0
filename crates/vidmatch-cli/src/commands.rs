use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::{bail, Context};
use serde::Serialize;

use vidmatch_api::YouTubeClient;
use vidmatch_core::config::AppConfig;
use vidmatch_core::matcher;
use vidmatch_core::models::{NewRecord, RecordPatch};
use vidmatch_core::orchestrator;
use vidmatch_core::storage::RecordStore;

use crate::cli::{Args, Command};

/// Shared state for one invocation.
struct Session {
    config: AppConfig,
    store: RecordStore,
    api_key: Option<String>,
}

impl Session {
    /// Client carrying the process-wide default key, scoped to this
    /// invocation's `--api-key` override.
    fn client(&self) -> YouTubeClient {
        YouTubeClient::new(self.config.default_api_key()).with_override(self.api_key.clone())
    }
}

pub async fn run(args: Args) -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load config")?;
    let db_path = args.db.clone().unwrap_or_else(|| config.database_path());
    tracing::debug!(path = %db_path.display(), "Using database");

    let session = Session {
        store: RecordStore::open(db_path),
        api_key: args.api_key,
        config,
    };

    match args.command {
        Command::List => print_json(&session.store.list()?),

        Command::Analyze {
            ids,
            apply,
            min_score,
        } => {
            let filter: HashSet<String> = ids.into_iter().collect();
            let client = session.client();
            let report = orchestrator::reconcile(
                &session.store,
                &client,
                Some(&filter),
                apply.then_some(min_score),
            )
            .await?;
            print_json(&report)
        }

        Command::Resolve { reference } => {
            let result = matcher::resolve(&session.client(), &reference).await?;
            print_json(&result)
        }

        Command::Search {
            query,
            exercise,
            limit,
        } => {
            let limit = limit.unwrap_or(session.config.youtube.search_limit);
            let results =
                matcher::discover(&session.client(), &query, exercise.as_deref(), limit).await?;
            print_json(&results)
        }

        Command::Attach {
            record_id,
            reference,
        } => {
            // Fail on an unknown record before spending API quota.
            session.store.get(&record_id)?;
            let result = matcher::resolve(&session.client(), &reference).await?;
            let record = orchestrator::attach_video(&session.store, &record_id, &result)?;
            print_json(&record)
        }

        Command::Create {
            name,
            category,
            material,
            instructions,
        } => {
            let record = session.store.create(NewRecord {
                exercise_name: name,
                category,
                material_name: material,
                instructions,
            })?;
            print_json(&record)
        }

        Command::Update {
            id,
            name,
            category,
            material,
            instructions,
            video_url,
            thumbnail,
        } => {
            let patch = RecordPatch {
                exercise_name: name,
                category,
                material_name: material,
                instructions,
                video_reference: video_url,
                thumbnail,
            };
            if patch.is_empty() {
                bail!("this update request does nothing");
            }
            let record = session.store.update(&id, patch)?;
            print_json(&record)
        }

        Command::Delete { id } => {
            session.store.delete(&id)?;
            tracing::info!(id = %id, "Deleted");
            Ok(())
        }

        Command::Config {
            set_api_key,
            search_limit,
            database,
        } => {
            let mut config = session.config;
            let changed = set_api_key.is_some() || search_limit.is_some() || database.is_some();

            if let Some(key) = set_api_key {
                let key = key.trim().to_string();
                config.youtube.api_key = (!key.is_empty()).then_some(key);
            }
            if let Some(limit) = search_limit {
                config.youtube.search_limit = limit;
            }
            if let Some(path) = database {
                config.database.path = Some(path);
            }

            if changed {
                config.save().context("failed to save config")?;
                tracing::info!(path = %AppConfig::config_path().display(), "Config saved");
            }
            print_json(&ConfigSummary::from(&config))
        }
    }
}

/// Printable view of the configuration; the key itself is never echoed.
#[derive(Serialize)]
struct ConfigSummary {
    config_path: PathBuf,
    api_key_set: bool,
    search_limit: u32,
    database_path: PathBuf,
}

impl From<&AppConfig> for ConfigSummary {
    fn from(config: &AppConfig) -> Self {
        Self {
            config_path: AppConfig::config_path(),
            api_key_set: config.default_api_key().is_some(),
            search_limit: config.youtube.search_limit,
            database_path: config.database_path(),
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
