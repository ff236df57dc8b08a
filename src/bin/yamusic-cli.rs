use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{fmt, EnvFilter};
use yamusic::{ClientConfig, ItemId, LeaseSuffix, Track, YandexMusic};

#[derive(Parser)]
#[command(name = "yamusic-cli")]
#[command(about = "CLI for yamusic - Yandex Music search and downloads", long_about = None)]
struct Cli {
    /// Proxy URL for all requests (can also be set via YANDEX_MUSIC_PROXY env var)
    #[arg(long, env = "YANDEX_MUSIC_PROXY", default_value = "")]
    proxy: String,

    /// Download-info path suffix expected by the storage backend (/2 or /2.mp3)
    #[arg(long, default_value = "/2")]
    lease_suffix: LeaseSuffix,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Output directory for downloads
    #[arg(short, long, default_value = "downloads")]
    output: PathBuf,

    /// Do not embed metadata tags in downloaded files
    #[arg(long)]
    no_tags: bool,

    /// Interface language for search results
    #[arg(long, default_value = "en")]
    lang: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for content
    Search {
        /// Search query
        query: String,

        /// Type of content to search
        #[arg(short, long, value_enum, default_value_t = SearchType::All)]
        r#type: SearchType,

        /// Limit results per section
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },
    /// Show track metadata
    Track {
        /// Track ID
        track_id: ItemId,

        /// Album ID (looked up when omitted)
        #[arg(short, long)]
        album: Option<ItemId>,
    },
    /// Print the signed download URL of a track
    Url {
        /// Track ID
        track_id: ItemId,

        /// Album ID (looked up when omitted)
        #[arg(short, long)]
        album: Option<ItemId>,
    },
    /// Download a track
    Download {
        /// Track ID
        track_id: ItemId,

        /// Album ID (looked up when omitted)
        #[arg(short, long)]
        album: Option<ItemId>,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum SearchType {
    All,
    Tracks,
    Albums,
    Artists,
    Playlists,
}

impl From<SearchType> for yamusic::SearchType {
    fn from(t: SearchType) -> Self {
        match t {
            SearchType::All => yamusic::SearchType::All,
            SearchType::Tracks => yamusic::SearchType::Tracks,
            SearchType::Albums => yamusic::SearchType::Albums,
            SearchType::Artists => yamusic::SearchType::Artists,
            SearchType::Playlists => yamusic::SearchType::Playlists,
        }
    }
}

fn print_track(i: usize, track: &Track) {
    println!(
        "{}. {} - {} [{}] (ID: {})",
        i + 1,
        track.artists_string(", "),
        track.title,
        track.duration_formatted(),
        track.id
    );
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(env_filter).with_target(false).init();

    let cli = Cli::parse();

    let mut config = ClientConfig::new()
        .with_proxy(cli.proxy.as_str())
        .with_lease_suffix(cli.lease_suffix.clone());
    if let Some(secs) = cli.timeout {
        config = config.with_timeout(Duration::from_secs(secs));
    }

    let mut ym = YandexMusic::with_config(config)?;
    ym.set_output_dir(&cli.output);
    ym.set_embed_tags(!cli.no_tags);

    match &cli.command {
        Commands::Search {
            query,
            r#type,
            limit,
        } => {
            println!("Searching for '{}'...", query);
            let result = ym.search(query, (*r#type).into(), &cli.lang).await?;

            if !result.tracks.items.is_empty() {
                println!("Tracks ({} total):", result.tracks.total);
                for (i, track) in result.tracks.items.iter().take(*limit).enumerate() {
                    print_track(i, track);
                }
            }
            if !result.albums.items.is_empty() {
                println!("Albums ({} total):", result.albums.total);
                for (i, album) in result.albums.items.iter().take(*limit).enumerate() {
                    println!(
                        "{}. {} - {} (ID: {})",
                        i + 1,
                        album.artists_string(", "),
                        album.title,
                        album.id
                    );
                }
            }
            if !result.artists.items.is_empty() {
                println!("Artists ({} total):", result.artists.total);
                for (i, artist) in result.artists.items.iter().take(*limit).enumerate() {
                    println!("{}. {} (ID: {})", i + 1, artist.name, artist.id);
                }
            }
        }
        Commands::Track { track_id, album } => {
            let page = ym.get_track(*album, *track_id).await?;
            let track = &page.track;
            println!("Title:    {}", track.title);
            println!("Artists:  {}", track.artists_string(", "));
            if let Some(album) = track.album() {
                println!("Album:    {} (ID: {})", album.title, album.id);
            }
            println!("Duration: {}", track.duration_formatted());
            println!("Storage:  {}", track.storage_dir);
            if let Some(lyrics) = page.lyric.first().filter(|l| l.has_rights) {
                println!();
                println!("{}", lyrics.full_lyrics);
            }
        }
        Commands::Url { track_id, album } => {
            let page = ym.get_track(*album, *track_id).await?;
            println!("{}", ym.track_download_url(&page.track).await?);
        }
        Commands::Download { track_id, album } => {
            let page = ym.get_track(*album, *track_id).await?;
            println!(
                "Downloading {} - {}...",
                page.track.artists_string(", "),
                page.track.title
            );
            let result = ym.download_track(&page.track).await?;
            println!("✅ Downloaded: {}", result.title);
            println!("   Path: {}", result.path.display());
            println!("   Size: {} bytes", result.size);
        }
    }

    Ok(())
}
