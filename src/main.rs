use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "pageloom")]
#[command(
    version,
    about = "Recover AI-generated web projects and extract static page previews"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long)]
    verbose: bool,

    #[arg(long, short)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Recover a project descriptor from raw model output
    Recover {
        #[arg(help = "Raw model output file, or - for stdin")]
        input: PathBuf,
        #[arg(long, short, help = "Write descriptor JSON here instead of stdout")]
        output: Option<PathBuf>,
    },

    /// Recover a project and write its static preview pages
    Pages {
        #[arg(help = "Raw model output file, or - for stdin")]
        input: PathBuf,
        #[arg(long, short, default_value = "pages", help = "Output directory")]
        output: PathBuf,
    },
}

/// Set up panic handler for graceful error reporting
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("\n\x1b[1;31m━━━ PANIC ━━━\x1b[0m");
        eprintln!("\x1b[31mpageloom encountered an unexpected error:\x1b[0m");
        eprintln!("  {}", message);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "\x1b[90mLocation: {}:{}:{}\x1b[0m",
                location.file(),
                location.line(),
                location.column()
            );
        }

        eprintln!("\n\x1b[33mPlease report this issue at:\x1b[0m");
        eprintln!("  https://github.com/junyeong-ai/pageloom/issues");
        eprintln!();

        default_hook(panic_info);
    }));
}

fn main() -> ExitCode {
    setup_panic_handler();

    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError:\x1b[0m {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Recover { input, output } => {
            pageloom::cli::commands::recover::run(&input, output.as_deref())?;
        }
        Commands::Pages { input, output } => {
            pageloom::cli::commands::pages::run(&input, &output)?;
        }
    }

    Ok(())
}
