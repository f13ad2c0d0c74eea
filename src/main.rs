use std::{
    io::{self, IsTerminal},
    path::PathBuf,
};

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use spotify_resolver::{
    Res,
    cli::{
        self, Console, Context,
        albums::AlbumsOptions,
        artists::ArtistsOptions,
        browse::BrowseOptions,
        resolve::ResolveOptions,
    },
    clipboard::SystemClipboard,
    config::{self, Config},
    error, gum::Gum, logging, warning,
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
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    /// Path to config file (default: ~/.config/spotify-resolver/config.json)
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[clap(short, long, global = true)]
    verbose: bool,

    /// Print URLs instead of copying them to the clipboard
    #[clap(long, global = true)]
    no_clipboard: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Resolve a band and album to its Spotify link
    #[command(after_help = "Examples:
  spotify-resolver resolve --band \"Metallica\" --album \"Master of Puppets\"
  spotify-resolver resolve --query \"artist:Metallica album:Master of Puppets\"
  echo \"Metallica - Master of Puppets\" | spotify-resolver resolve")]
    Resolve(ResolveArgs),

    /// Search albums and pick one (or all) to copy
    Albums(AlbumsArgs),

    /// Search artists, then pick one of their albums
    Artists(ArtistsArgs),

    /// Artist search with the gum terminal UI
    Browse(BrowseArgs),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ResolveArgs {
    /// Band/artist name
    #[clap(short, long)]
    band: Option<String>,

    /// Album name
    #[clap(short, long)]
    album: Option<String>,

    /// Full search query (e.g. "artist:Metallica album:Master of Puppets")
    #[clap(short, long)]
    query: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct AlbumsArgs {
    /// Search query (prompted for when omitted)
    query: Vec<String>,

    /// Number of results to show
    #[clap(long, default_value_t = 20)]
    limit: u32,

    /// Just list results, don't prompt for selection
    #[clap(long)]
    list_only: bool,

    /// Leave out the entry that copies every URL
    #[clap(long)]
    no_all: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ArtistsArgs {
    /// Artist to search for (prompted for when omitted)
    query: Vec<String>,

    /// Number of artists to show
    #[clap(long, default_value_t = 20)]
    limit: u32,

    /// Leave out the entry that copies every album URL
    #[clap(long)]
    no_all: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct BrowseArgs {
    /// Artist to search for (prompted for when omitted)
    query: Vec<String>,

    /// Number of artists to show
    #[clap(long, default_value_t = 20)]
    limit: u32,

    /// Use numbered menus even if gum is installed
    #[clap(long)]
    plain: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Command::Completions(opt) = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut io::stdout());
        return;
    }

    tokio::spawn(async {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!();
            warning!("Interrupted by user");
            log::warn!("Interrupted by user");
            std::process::exit(130);
        }
    });

    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment. Err: {}", e);
    }
    let config = Config::load(cli.config.as_deref()).await;
    logging::init(cli.verbose, &config.log_level);
    log::info!("{} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(cli, &config).await {
        log::error!("{}", e);
        error!("{}", e);
    }
}

async fn run(cli: Cli, config: &Config) -> Res<()> {
    let clipboard = SystemClipboard::detect();
    let ctx = Context {
        config,
        clipboard: &clipboard,
        no_clipboard: cli.no_clipboard,
    };

    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let mut console = Console::new(stdin.lock(), io::stdout(), interactive);

    match cli.command {
        Command::Resolve(args) => {
            let opts = ResolveOptions {
                band: args.band,
                album: args.album,
                query: args.query,
            };
            cli::resolve::resolve(&ctx, &mut console, opts).await.map(|_| ())
        }
        Command::Albums(args) => {
            let opts = AlbumsOptions {
                query: cli::query_from_words(&args.query),
                limit: args.limit,
                list_only: args.list_only,
                allow_all: !args.no_all,
            };
            cli::albums::albums(&ctx, &mut console, opts).await
        }
        Command::Artists(args) => {
            let opts = ArtistsOptions {
                query: cli::query_from_words(&args.query),
                limit: args.limit,
                allow_all: !args.no_all,
            };
            cli::artists::artists(&ctx, &mut console, opts).await
        }
        Command::Browse(args) => {
            let opts = BrowseOptions {
                query: cli::query_from_words(&args.query),
                limit: args.limit,
                plain: args.plain,
            };
            cli::browse::browse(&ctx, &mut console, &Gum::default(), opts).await
        }
        Command::Completions(_) => Ok(()),
    }
}
