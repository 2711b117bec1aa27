use std::sync::Arc;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use tokio::sync::Mutex;
use tunevibe::{
    analysis::FeatureKey,
    cli::{self, BubbleAxes},
    config, error,
    types::PkceToken,
};

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
    /// Log in with your Spotify account
    Auth,

    /// Analyze the mood of a playlist
    Analyze(AnalyzeOptions),

    /// List your own Spotify playlists (requires `auth`)
    Playlists,

    /// Manage locally saved playlists
    Saved(SavedOptions),

    /// Recommend tracks matching a playlist's mood
    Recommend(RecommendOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct AnalyzeOptions {
    /// Playlist URL, URI or id
    pub playlist: String,

    /// Print the full analysis as JSON
    #[clap(long)]
    pub json: bool,

    /// Add bubble chart points: x feature, y feature, size feature
    #[clap(long, num_args = 3, value_names = ["X", "Y", "SIZE"])]
    pub bubble: Option<Vec<FeatureKey>>,
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Manage locally saved playlists")]
pub struct SavedOptions {
    #[command(subcommand)]
    pub command: Option<SavedSubcommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum SavedSubcommand {
    /// List saved playlists (default)
    List,

    /// Save a playlist by URL, URI or id
    Add { playlist: String },

    /// Remove a saved playlist by URL, URI or id
    Remove { playlist: String },
}

#[derive(Parser, Debug, Clone)]
pub struct RecommendOptions {
    /// Playlist URL, URI or id
    pub playlist: String,

    /// Number of tracks to recommend (1-100)
    #[clap(long, default_value_t = 10)]
    pub limit: u32,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth => {
            let oauth_result: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
            cli::auth(Arc::clone(&oauth_result)).await;
        }
        Command::Analyze(opt) => {
            let bubble = opt.bubble.and_then(|keys| match keys.as_slice() {
                [x, y, size] => Some(BubbleAxes {
                    x: *x,
                    y: *y,
                    size: *size,
                }),
                _ => None,
            });
            cli::analyze(opt.playlist, opt.json, bubble).await
        }
        Command::Playlists => cli::playlists().await,
        Command::Saved(opt) => match opt.command {
            Some(SavedSubcommand::Add { playlist }) => cli::save(playlist).await,
            Some(SavedSubcommand::Remove { playlist }) => cli::remove_saved(playlist).await,
            Some(SavedSubcommand::List) | None => cli::list_saved().await,
        },
        Command::Recommend(opt) => cli::recommend(opt.playlist, opt.limit).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
