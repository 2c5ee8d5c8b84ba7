//! Pixshelf CLI application entry point
//!
//! Each invocation runs one command against the core library: browse a
//! directory, mutate entries, work the clipboard session, or drive the
//! auto-tagger and its stores.
//!
//! # Usage
//!
//! ```bash
//! # List the current directory, images classified
//! pixshelf ls -i
//!
//! # Cut two files here, paste them elsewhere later
//! pixshelf cut a.png b.png
//! pixshelf paste ~/Pictures/Albums
//!
//! # Run the tagger, then pin tags on an image it got wrong
//! pixshelf tagger run
//! pixshelf tagger manual dog.jpg -t pet dog
//!
//! # Quiet mode (only output results)
//! pixshelf -q ls
//! ```
//!
//! # Configuration
//!
//! On first run, pixshelf will prompt for initial setup. Configuration is
//! stored in the user's config directory (`~/.config/pixshelf/config.toml` on
//! Linux). Logging goes to stderr and is filtered by `PIXSHELF_LOG`.

use clap::CommandFactory;
use clap_complete::Shell;
use pixshelf::{
    ShelfError,
    cli::{Cli, Commands, TaggerCommands},
    commands::{self, Context, browse::ListOptions},
    config::ShelfConfig,
    ui::{DialoguerInput, StdoutWriter},
};
use std::io;
use tracing_subscriber::EnvFilter;

type Result<T> = std::result::Result<T, ShelfError>;

fn init_logging(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env("PIXSHELF_LOG").unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

async fn dispatch(ctx: &Context<'_>, command: Commands) -> Result<()> {
    match command {
        Commands::Ls {
            path,
            filter,
            images,
            json,
        } => {
            let options = ListOptions {
                filter: filter.as_deref(),
                images,
                json,
            };
            commands::browse::ls(ctx, path.as_deref(), &options).await
        }
        Commands::Bookmarks { name } => commands::browse::bookmarks(ctx, name.as_deref()).await,
        Commands::Up { path, bookmark } => {
            commands::browse::up(ctx, path.as_deref(), bookmark.as_deref())
        }
        Commands::Open { path } => commands::browse::open(ctx, &path).await,
        Commands::Rename { path, new_name } => commands::mutate::rename(ctx, &path, &new_name).await,
        Commands::Rm { paths } => commands::mutate::rm(ctx, &paths).await,
        Commands::Mkdir { name, dir } => commands::mutate::mkdir(ctx, &name, dir.as_deref()).await,
        Commands::Touch { name, dir } => commands::mutate::touch(ctx, &name, dir.as_deref()).await,
        Commands::Cut { paths } => commands::clipboard::cut(ctx, &paths),
        Commands::Copy { paths } => commands::clipboard::copy(ctx, &paths),
        Commands::Paste { dest } => commands::clipboard::paste(ctx, dest.as_deref()).await,
        Commands::Clipboard { clear } => commands::clipboard::show(ctx, clear),
        Commands::Tagger { command } => match command {
            TaggerCommands::Run { images, output } => {
                commands::tagger::run(ctx, images, output).await
            }
            TaggerCommands::Exclude { images } => commands::tagger::exclude(ctx, &images).await,
            TaggerCommands::Manual { image, tags } => {
                commands::tagger::manual(ctx, &image, &tags).await
            }
            TaggerCommands::Show { image } => commands::tagger::show(ctx, image.as_deref()),
            TaggerCommands::Vocab { query, all } => {
                commands::tagger::vocab(ctx, query.as_deref(), all)
            }
        },
        Commands::Config { command } => {
            let mut edited = ctx.config.clone();
            let config_path = ShelfConfig::config_path()?;
            commands::config::execute(&mut edited, &config_path, &command, ctx.output, ctx.quiet)
        }
        Commands::Completions { shell } => {
            print_completions(shell);
            Ok(())
        }
    }
}

fn print_completions(shell: Shell) {
    clap_complete::generate(shell, &mut Cli::command(), "pixshelf", &mut io::stdout());
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();
    init_logging(cli.verbose);

    // Completions must work before first-run setup has ever happened.
    if let Commands::Completions { shell } = cli.command {
        print_completions(shell);
        return Ok(());
    }

    let config = ShelfConfig::load_or_setup()?;
    let quiet = cli.quiet || config.quiet;
    let output = StdoutWriter;
    let input = DialoguerInput::new();
    let ctx = Context {
        config: &config,
        output: &output,
        input: &input,
        clipboard_file: commands::clipboard::session_path()?,
        quiet,
        assume_yes: cli.yes,
    };
    dispatch(&ctx, cli.command).await
}
