mod config;
mod render;

use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use config::Config;
use ranker_core::{
    AppState, Catalog, CollectionStore, SortBy, ViewConfig, bs,
    ranker_state::{Draft, RecordId},
};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[derive(Parser)]
#[command(author, version, about = "Search albums on Spotify, rate them, and keep a ranked collection", long_about = None)]
struct Args {
    /// Config file to read
    #[arg(long, default_value = Config::FILENAME)]
    config: PathBuf,

    /// Collection file to use instead of the one named in the config
    #[arg(long)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search the catalog for albums
    Search {
        /// Album or artist to search for
        #[arg(required = true)]
        query: Vec<String>,

        /// Maximum number of results
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Rate an album and add it to the collection
    Add(AddArgs),
    /// Remove an album from the collection
    Remove {
        /// The album's id, as shown by `list`
        id: String,
    },
    /// Show the collection
    List {
        /// Sort order: rating-desc, rating-asc, artist or added
        #[arg(long)]
        sort: Option<SortBy>,

        /// Only show albums whose genre contains this
        #[arg(long)]
        genre: Option<String>,
    },
    /// Show collection statistics
    Stats,
    /// Write a default config file
    Init,
}

#[derive(clap::Args)]
struct AddArgs {
    /// Fill in the album from this Spotify album id
    #[arg(long)]
    spotify_id: Option<String>,

    /// Album title (required without --spotify-id)
    #[arg(long)]
    title: Option<String>,

    /// Artist (required without --spotify-id)
    #[arg(long)]
    artist: Option<String>,

    #[arg(long)]
    year: Option<String>,

    #[arg(long)]
    genre: Option<String>,

    /// Rating from 0.5 to 5.0 in steps of 0.5
    #[arg(long, default_value_t = 4.0)]
    rating: f64,

    /// What you love about it
    #[arg(long, default_value = "")]
    notes: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so that command output stays pipeable.
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(
                    "warn,ranker=info,ranker_core=info,ranker_spotify=info",
                )
            }),
        )
        .init();

    run(Args::parse(), |key| std::env::var(key).ok()).await
}

/// Run one command. `env` looks up environment variables.
async fn run(args: Args, env: impl Fn(&str) -> Option<String>) -> anyhow::Result<()> {
    if let Command::Init = args.command {
        return Config::init(&args.config);
    }

    let mut config = Config::load(&args.config)?;
    config.apply_overrides(env);

    match args.command {
        // Handled before the config is loaded.
        Command::Init => {}
        Command::Search { query, limit } => {
            let mut state = open_state(args.data, &config)?;
            let catalog = catalog(&config)?;
            let query = query.join(" ");
            let limit = limit.unwrap_or(config.view.search_limit);

            let results = state.search(&catalog, &query, limit).await;
            for (index, candidate) in results.iter().enumerate() {
                println!("{}", render::candidate_line(index, candidate));
            }
            if results.is_empty() {
                println!("No results found.");
            }
            if let Some(error) = &state.error {
                eprintln!("{}", render::error(error));
            }
        }
        Command::Add(add) => {
            let mut state = open_state(args.data, &config)?;
            let draft = match &add.spotify_id {
                Some(spotify_id) => {
                    let catalog = catalog(&config)?;
                    if state.select(&catalog, spotify_id).await.is_none() {
                        let reason = state
                            .error
                            .as_ref()
                            .map(render::error)
                            .unwrap_or_else(|| format!("Album {spotify_id} not found"));
                        anyhow::bail!(reason);
                    }
                    state.draft()
                }
                None => Draft::manual(
                    add.title.clone().unwrap_or_default(),
                    add.artist.clone().unwrap_or_default(),
                ),
            };
            let draft = apply_add_overrides(draft, add);

            match state.submit(draft) {
                Ok(record) => println!("Added {}! ({})", record.title, record.id),
                Err(_) => {
                    let reason = state.error.as_ref().map(render::error).unwrap_or_default();
                    anyhow::bail!(reason);
                }
            }
        }
        Command::Remove { id } => {
            let mut state = open_state(args.data, &config)?;
            match state.remove(&RecordId(id.clone()))? {
                Some(record) => println!("Removed {} by {}", record.title, record.artist),
                None => println!("No album with id {id}"),
            }
        }
        Command::List { sort, genre } => {
            let mut state = open_state(args.data, &config)?;
            state.view = ViewConfig {
                sort_by: sort.unwrap_or(config.view.sort_by),
                genre_filter: genre,
            };

            if let Some(bar) = render::stats_bar(&state.stats()) {
                println!("{bar}\n");
            }
            println!("{}\n", render::list_header(&state.view));
            let albums = state.visible_albums();
            if albums.is_empty() {
                println!("No albums yet. Search for one and add it!");
            }
            for album in albums {
                println!("{}\n", render::album_card(album));
            }
        }
        Command::Stats => {
            let state = open_state(args.data, &config)?;
            match render::stats_bar(&state.stats()) {
                Some(bar) => println!("{bar}"),
                None => println!("No albums rated yet."),
            }
        }
    }

    Ok(())
}

/// Load the collection once for this session.
fn open_state(data: Option<PathBuf>, config: &Config) -> anyhow::Result<AppState> {
    let data_file = data.unwrap_or_else(|| config.storage.data_file.clone());
    let collection = CollectionStore::open(&data_file)
        .with_context(|| format!("Failed to open collection {}", data_file.display()))?;

    let mut state = AppState::new(collection);
    state.view.sort_by = config.view.sort_by;
    Ok(state)
}

fn catalog(config: &Config) -> anyhow::Result<Catalog<bs::Client>> {
    let client = bs::Client::new(
        config.spotify.client_id.clone(),
        config.spotify.client_secret.clone(),
        config.spotify.timeout(),
    )
    .context("Failed to create Spotify client")?;
    Ok(Catalog::new(client, config.spotify.timeout()))
}

/// Flags given on the command line win over whatever the catalog said.
fn apply_add_overrides(mut draft: Draft, add: AddArgs) -> Draft {
    if let Some(title) = add.title {
        draft = draft.with_title(title);
    }
    if let Some(artist) = add.artist {
        draft = draft.with_artist(artist);
    }
    if let Some(year) = add.year {
        draft = draft.with_year(year);
    }
    if let Some(genre) = add.genre {
        draft = draft.with_genre(genre);
    }
    draft.with_rating(add.rating).with_notes(add.notes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(config: &std::path::Path, command: &[&str]) -> Args {
        let config = config.to_str().unwrap();
        Args::try_parse_from(["ranker", "--config", config].iter().chain(command)).unwrap()
    }

    #[tokio::test]
    async fn test_init_writes_placeholder_credentials() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(Config::FILENAME);

        run(args(&path, &["init"]), |key| Some(format!("{key}-from-env")))
            .await
            .unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(!written.contains("from-env"));
        assert!(written.contains("client_secret = \"YOUR_CLIENT_SECRET\""));
        assert_eq!(Config::load(&path).unwrap(), Config::default());

        assert!(run(args(&path, &["init"]), |_| None).await.is_err());
    }

    #[tokio::test]
    async fn test_add_then_remove_manual_album() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join(Config::FILENAME);
        let data = dir.path().join("albums.json");
        let data_arg = data.to_str().unwrap();

        run(
            args(
                &config,
                &["--data", data_arg, "add", "--title", "Kid A", "--artist", "Radiohead"],
            ),
            |_| None,
        )
        .await
        .unwrap();
        let records = CollectionStore::load(&data).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].rating.stars(), 4.0);

        let id = records[0].id.to_string();
        run(args(&config, &["--data", data_arg, "remove", id.as_str()]), |_| None)
            .await
            .unwrap();
        assert!(CollectionStore::load(&data).unwrap().is_empty());
    }
}
