use std::path::PathBuf;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use sporex::{cli, config, error, types::GenreSource};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the web application
    Serve(ServeOptions),

    /// Inspect a playlist and its tracks
    Playlist(PlaylistOptions),

    /// Find the playlist of a genre
    Genre(GenreOptions),

    /// List known genres
    Genres(GenresOptions),

    /// Show an artist
    Artist(ArtistOptions),

    /// Replace the genre list with an Every Noise export
    Seed(SeedOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ServeOptions {
    /// Address to bind, overrides SERVER_ADDRESS
    #[clap(long)]
    pub addr: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistOptions {
    /// Playlist link, URI or id
    pub playlist: String,

    /// Open the playlist in the browser
    #[clap(long)]
    pub open: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct GenreOptions {
    /// Genre title, e.g. "cowpunk"
    pub title: String,

    /// Playlist curator: spotify or thesoundsofspotify
    #[clap(long, default_value = "spotify")]
    pub source: GenreSource,
}

#[derive(Parser, Debug, Clone)]
pub struct GenresOptions {
    /// Only show genres whose title contains this text
    #[clap(long)]
    pub search: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct ArtistOptions {
    /// Spotify artist id
    pub artist_id: String,

    /// Also show the artist's top tracks
    #[clap(long)]
    pub top_tracks: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct SeedOptions {
    /// JSON file with genre entries
    pub file: PathBuf,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sporex=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .init();
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve(opt) => cli::serve(opt.addr).await,
        Command::Playlist(opt) => cli::playlist(&opt.playlist, opt.open).await,
        Command::Genre(opt) => cli::genre(&opt.title, opt.source).await,
        Command::Genres(opt) => cli::genres(opt.search).await,
        Command::Artist(opt) => cli::artist(&opt.artist_id, opt.top_tracks).await,
        Command::Seed(opt) => cli::seed(&opt.file).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
