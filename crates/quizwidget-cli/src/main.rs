//! quizwidget CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{Parser, Subcommand};

use quizwidget_core::model::Locale;
use quizwidget_render::Format;

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "quizwidget", version, about = "Bilingual multiple-choice quiz widget")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the topics of a bank
    Topics {
        /// Bank file or directory (defaults to the configured or built-in bank)
        #[arg(long)]
        bank: Option<PathBuf>,

        /// Locale for titles: en, ar
        #[arg(long)]
        locale: Option<Locale>,
    },

    /// Validate bank TOML files
    Validate {
        /// Path to bank file or directory
        #[arg(long)]
        bank: PathBuf,
    },

    /// Take a quiz interactively
    Play {
        /// Topic to load on start
        #[arg(long)]
        topic: Option<String>,

        /// Locale: en, ar
        #[arg(long)]
        locale: Option<Locale>,

        /// Bank file or directory
        #[arg(long)]
        bank: Option<PathBuf>,
    },

    /// Grade a set of answers without interaction
    Grade {
        /// Topic id
        #[arg(long)]
        topic: String,

        /// Comma-separated option numbers from 1, `_` for unanswered (e.g. "2,_,1")
        #[arg(long)]
        answers: String,

        /// Locale: en, ar
        #[arg(long)]
        locale: Option<Locale>,

        /// Output format: text, html, json
        #[arg(long, default_value = "text")]
        format: Format,

        /// Write the rendered quiz here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,

        /// Save the grade report JSON to this path
        #[arg(long)]
        report: Option<PathBuf>,

        /// Save the grade report JSON under the configured output directory
        #[arg(long)]
        save: bool,

        /// Bank file or directory
        #[arg(long)]
        bank: Option<PathBuf>,
    },

    /// Compare two grade reports
    Compare {
        /// Baseline report JSON
        #[arg(long)]
        baseline: PathBuf,

        /// Current report JSON
        #[arg(long)]
        current: PathBuf,

        /// Exit code 1 if any question went from correct to incorrect
        #[arg(long)]
        fail_on_regression: bool,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Create starter config and example bank
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("quizwidget=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let load_config = || config::load_config_from(cli.config.as_deref());

    match cli.command {
        Commands::Topics { bank, locale } => {
            let config = load_config()?;
            let bank = commands::load_bank(bank.as_deref().or(config.bank.as_deref()))?;
            commands::topics::execute(bank, locale.unwrap_or(config.default_locale))
        }
        Commands::Validate { bank } => commands::validate::execute(bank),
        Commands::Play {
            topic,
            locale,
            bank,
        } => {
            let config = load_config()?;
            let bank = commands::load_bank(bank.as_deref().or(config.bank.as_deref()))?;
            commands::play::execute(bank, topic, locale.unwrap_or(config.default_locale)).await
        }
        Commands::Grade {
            topic,
            answers,
            locale,
            format,
            output,
            report,
            save,
            bank,
        } => {
            let config = load_config()?;
            let bank = commands::load_bank(bank.as_deref().or(config.bank.as_deref()))?;
            commands::grade::execute(
                bank,
                commands::grade::GradeArgs {
                    topic,
                    answers,
                    locale: locale.unwrap_or(config.default_locale),
                    format,
                    output,
                    report,
                    save,
                    output_dir: config.output_dir,
                },
            )
        }
        Commands::Compare {
            baseline,
            current,
            fail_on_regression,
            format,
        } => commands::compare::execute(baseline, current, fail_on_regression, format),
        Commands::Init => commands::init::execute(),
    }
}
