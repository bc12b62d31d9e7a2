use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use nacplan::Result;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nacplan")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "NAC deployment planning assistant", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a nacplan workspace in the current directory
    Init,

    /// Create a project through the planning wizard
    New {
        /// Non-interactive: read form fields from a YAML file
        #[arg(long)]
        answers: Option<PathBuf>,

        /// Skip the final confirmation
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Run environment discovery for an existing project
    Discover {
        /// Project slug
        slug: String,

        /// Non-interactive: read form fields from a YAML file
        #[arg(long)]
        answers: Option<PathBuf>,

        /// Skip the final confirmation
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List projects
    List {
        /// Output in JSON format
        #[arg(short, long)]
        json: bool,
    },

    /// Show a project's details and completion score
    Status {
        /// Project slug
        slug: String,

        /// Output in JSON format
        #[arg(short, long)]
        json: bool,
    },

    /// Generate AI content for a project
    Generate {
        /// Project slug
        slug: String,

        /// Generate recommendations instead of the executive summary
        #[arg(short, long)]
        recommendations: bool,
    },

    /// Export the plan document
    Export {
        /// Project slug
        slug: String,

        /// Output path (default: <workspace>/exports/<slug>-plan.md)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init => {
            nacplan::cli::init::run().await?;
        }

        Commands::New { answers, yes } => {
            nacplan::cli::new::run(answers.as_deref(), yes).await?;
        }

        Commands::Discover { slug, answers, yes } => {
            nacplan::cli::discover::run(&slug, answers.as_deref(), yes).await?;
        }

        Commands::List { json } => {
            nacplan::cli::list::run(json).await?;
        }

        Commands::Status { slug, json } => {
            nacplan::cli::status::run(&slug, json).await?;
        }

        Commands::Generate { slug, recommendations } => {
            nacplan::cli::generate::run(&slug, recommendations).await?;
        }

        Commands::Export { slug, output } => {
            nacplan::cli::export::run(&slug, output.as_deref()).await?;
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "nacplan", &mut io::stdout());
        }
    }

    Ok(())
}
