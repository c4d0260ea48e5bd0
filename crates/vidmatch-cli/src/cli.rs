use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "vidmatch", version, about = "Match workout exercises to YouTube demo videos")]
pub struct Args {
    /// Exercise database (JSON array). Defaults to the configured path.
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// YouTube API key for this invocation; overrides YOUTUBE_API_KEY and the config file.
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print every record
    List,

    /// Score each record's video title against its exercise name
    Analyze {
        /// Restrict to these record ids (repeatable)
        #[arg(long = "id")]
        ids: Vec<String>,

        /// Write canonical links and thumbnails back for good-enough matches
        #[arg(long)]
        apply: bool,

        /// Minimum score (0-100) for --apply
        #[arg(long, default_value_t = 80, value_parser = clap::value_parser!(u8).range(0..=100))]
        min_score: u8,
    },

    /// Look up the video behind a URL or id
    Resolve { reference: String },

    /// Search for candidate videos
    Search {
        query: String,

        /// Exercise name to score the results against
        #[arg(long)]
        exercise: Option<String>,

        /// Maximum number of results, 1-50 (defaults to the configured limit)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=50))]
        limit: Option<u32>,
    },

    /// Resolve a video and store it on a record
    Attach { record_id: String, reference: String },

    /// Add a record
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        material: Option<String>,
        #[arg(long)]
        instructions: Option<String>,
    },

    /// Change fields of a record
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        material: Option<String>,
        #[arg(long)]
        instructions: Option<String>,
        #[arg(long)]
        video_url: Option<String>,
        #[arg(long)]
        thumbnail: Option<String>,
    },

    /// Remove a record
    Delete { id: String },

    /// Show the configuration, or change and save it
    Config {
        /// Default YouTube API key to store (an empty value clears it)
        #[arg(long)]
        set_api_key: Option<String>,

        /// Default number of search results, 1-50
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=50))]
        search_limit: Option<u32>,

        /// Exercise database location
        #[arg(long)]
        database: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_analyze() {
        let args = Args::parse_from([
            "vidmatch", "--db", "db.json", "analyze", "--id", "a", "--id", "b", "--apply",
        ]);
        assert_eq!(args.db, Some(PathBuf::from("db.json")));
        match args.command {
            Command::Analyze { ids, apply, min_score } => {
                assert_eq!(ids, vec!["a", "b"]);
                assert!(apply);
                assert_eq!(min_score, 80);
            }
            other => panic!("Expected Analyze, got {other:?}"),
        }
    }

    #[test]
    fn test_global_api_key_after_subcommand() {
        let args = Args::parse_from(["vidmatch", "resolve", "abcdefghijk", "--api-key", "k"]);
        assert_eq!(args.api_key.as_deref(), Some("k"));
        assert!(matches!(args.command, Command::Resolve { .. }));
    }

    #[test]
    fn test_min_score_range() {
        assert!(Args::try_parse_from(["vidmatch", "analyze", "--min-score", "101"]).is_err());
    }

    #[test]
    fn test_search_limit_range() {
        assert!(Args::try_parse_from(["vidmatch", "search", "plank", "--limit", "100"]).is_err());
        assert!(Args::try_parse_from(["vidmatch", "search", "plank", "--limit", "0"]).is_err());
        let args = Args::parse_from(["vidmatch", "search", "plank", "--limit", "50"]);
        assert!(matches!(args.command, Command::Search { limit: Some(50), .. }));
    }

    #[test]
    fn test_parse_config() {
        let args = Args::parse_from(["vidmatch", "config", "--search-limit", "10"]);
        match args.command {
            Command::Config {
                set_api_key,
                search_limit,
                database,
            } => {
                assert_eq!(set_api_key, None);
                assert_eq!(search_limit, Some(10));
                assert_eq!(database, None);
            }
            other => panic!("Expected Config, got {other:?}"),
        }
        assert!(Args::try_parse_from(["vidmatch", "config", "--search-limit", "51"]).is_err());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
