/// Tracklist - command-line client for a tracks server
use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tracklist_client::{ClientConfig, TracksClient};
use tracklist_core::{AudioUpload, QueryParams, SortField, SortOrder, Track, TrackDraft, TrackId};
use tracklist_sync::{page_window, FetchOutcome, PageButton, TracksController, UpdateOutcome};

mod browse;

#[derive(Parser)]
#[command(name = "tracklist")]
#[command(about = "Browse and edit the tracks on a Tracklist server", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "TRACKLIST_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List one page of tracks
    List {
        #[command(flatten)]
        query: QueryArgs,
        /// Print the raw page as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a track
    Create {
        #[command(flatten)]
        draft: DraftArgs,
    },
    /// Replace a track's metadata
    Update {
        /// Track ID
        id: String,
        #[command(flatten)]
        draft: DraftArgs,
    },
    /// Delete a track
    Delete {
        /// Track ID
        id: String,
    },
    /// Delete several tracks at once
    BulkDelete {
        /// Track IDs
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Attach an audio file (.mp3 or .wav) to a track
    Upload {
        /// Track ID
        id: String,
        /// Audio file path
        path: PathBuf,
    },
    /// Remove the audio file of a track
    DeleteFile {
        /// Track ID
        id: String,
    },
    /// List the known genres
    Genres,
    /// List every artist in the collection
    Artists,
    /// Interactive list with live search, paging and bulk selection
    Browse,
}

#[derive(Args)]
struct QueryArgs {
    /// Page number (1-based)
    #[arg(short, long, default_value_t = 1)]
    page: u32,
    /// Search text
    #[arg(short, long, default_value = "")]
    search: String,
    /// Sort field: title, artist, album or createdAt
    #[arg(long, default_value = "title")]
    sort: SortField,
    /// Sort order: asc or desc
    #[arg(long, default_value = "asc")]
    order: SortOrder,
    /// Only tracks with this genre
    #[arg(long)]
    genre: Option<String>,
    /// Only tracks by this artist
    #[arg(long)]
    artist: Option<String>,
}

impl From<QueryArgs> for QueryParams {
    fn from(args: QueryArgs) -> Self {
        Self {
            page: args.page.max(1),
            search: args.search,
            sort: args.sort,
            order: args.order,
            genre: args.genre.filter(|g| !g.is_empty()),
            artist: args.artist.filter(|a| !a.is_empty()),
        }
    }
}

#[derive(Args)]
struct DraftArgs {
    #[arg(short, long)]
    title: String,
    #[arg(short, long)]
    artist: String,
    #[arg(long)]
    album: Option<String>,
    /// Genre (repeat for several)
    #[arg(short, long = "genre", required = true)]
    genres: Vec<String>,
    /// Cover image URL
    #[arg(long)]
    cover: Option<String>,
}

impl From<DraftArgs> for TrackDraft {
    fn from(args: DraftArgs) -> Self {
        Self {
            title: args.title,
            artist: args.artist,
            album: args.album,
            genres: args.genres,
            cover_image: args.cover,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "tracklist=info,tracklist_sync=info,tracklist_client=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = ClientConfig::load_from(cli.config.as_deref())
        .context("Failed to load configuration")?;
    tracing::debug!("Server: {}", config.server.base_url);

    let client = TracksClient::new(&config.server)?;
    let controller = TracksController::new(client)
        .with_page_limit(config.library.page_limit)
        .with_artist_scan_limit(config.library.artist_scan_limit)
        .with_max_upload_bytes(config.upload.max_bytes);

    match cli.command {
        Commands::List { query, json } => {
            list(&controller, query.into(), json).await?;
        }
        Commands::Create { draft } => {
            load_genres(&controller).await;
            let track = controller.create(&draft.into()).await?;
            println!("Created {}", describe(&track));
        }
        Commands::Update { id, draft } => {
            load_genres(&controller).await;
            match controller.update(&TrackId::new(id), &draft.into()).await? {
                UpdateOutcome::Replaced(track) | UpdateOutcome::NotLoaded(track) => {
                    println!("Updated {}", describe(&track));
                }
            }
        }
        Commands::Delete { id } => {
            controller.delete(&TrackId::new(id.as_str())).await?;
            println!("Deleted {}", id);
        }
        Commands::BulkDelete { ids } => {
            let ids: Vec<TrackId> = ids.into_iter().map(TrackId::new).collect();
            let summary = controller.bulk_delete(&ids).await?;
            println!("Deleted {} track(s)", summary.succeeded.len());
            if !summary.is_complete() {
                let failed: Vec<String> = summary.failed.iter().map(ToString::to_string).collect();
                anyhow::bail!("Failed to delete: {}", failed.join(", "));
            }
        }
        Commands::Upload { id, path } => {
            let upload = read_upload(&path).await?;
            let track = controller.upload_audio(&TrackId::new(id), &upload).await?;
            match controller.api().audio_url(&track) {
                Some(url) => println!("Uploaded {} -> {}", describe(&track), url),
                None => println!("Uploaded {}", describe(&track)),
            }
        }
        Commands::DeleteFile { id } => {
            let track = controller.delete_audio(&TrackId::new(id)).await?;
            println!("Removed audio from {}", describe(&track));
        }
        Commands::Genres => {
            for genre in controller.refresh_genres().await? {
                println!("{}", genre);
            }
        }
        Commands::Artists => {
            for artist in controller.refresh_artists().await? {
                println!("{}", artist);
            }
        }
        Commands::Browse => {
            load_genres(&controller).await;
            browse::run(&controller, &config).await?;
        }
    }

    Ok(())
}

async fn list(
    controller: &TracksController<TracksClient>,
    query: QueryParams,
    json: bool,
) -> anyhow::Result<()> {
    if let FetchOutcome::Failed(err) = controller.fetch_page(query).await {
        return Err(err.into());
    }

    let store = controller.snapshot().await;
    if json {
        let page = serde_json::json!({
            "data": store.tracks(),
            "meta": store.meta(),
        });
        println!("{}", serde_json::to_string_pretty(&page)?);
    } else {
        for track in store.tracks() {
            println!("{}", describe(track));
        }
        print_footer(store.meta().page, store.meta().total_pages, store.meta().total);
    }
    Ok(())
}

/// Genre validation is skipped (not failed) when the catalog is unavailable
async fn load_genres(controller: &TracksController<TracksClient>) {
    if let Err(err) = controller.refresh_genres().await {
        tracing::warn!("Genre list unavailable, skipping genre check: {}", err);
    }
}

async fn read_upload(path: &Path) -> anyhow::Result<AudioUpload> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .context("Audio path has no file name")?;
    Ok(AudioUpload::new(file_name, bytes))
}

pub(crate) fn describe(track: &Track) -> String {
    let mut line = format!("[{}] {} - {}", track.id, track.artist, track.title);
    if let Some(album) = track.album.as_deref().filter(|a| !a.is_empty()) {
        line.push_str(&format!(" ({})", album));
    }
    if !track.genres.is_empty() {
        line.push_str(&format!(" {{{}}}", track.genres.join(", ")));
    }
    if track.has_audio() {
        line.push_str(" ♪");
    }
    line
}

pub(crate) fn print_footer(page: u32, total_pages: u32, total: u64) {
    let buttons: Vec<String> = page_window(page, total_pages)
        .into_iter()
        .map(|button| match button {
            PageButton::Page(p) if p == page => format!("[{}]", p),
            PageButton::Page(p) => p.to_string(),
            PageButton::Ellipsis => "…".to_string(),
        })
        .collect();

    if buttons.is_empty() {
        println!("{} track(s)", total);
    } else {
        println!("{} track(s)  {}", total, buttons.join(" "));
    }
}
