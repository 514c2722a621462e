use crate::formatter::FormatterKind;
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fmtchurn")]
#[command(about = "Measure the code churn caused by each release of a code formatter")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone)]
pub struct CommonArgs {
    #[arg(
        long,
        env = "FMTCHURN_ROOT",
        global = true,
        help = "Workspace root holding projects/ and env/ (default: current dir)"
    )]
    pub root: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        help = "Python interpreter used for pip and the formatters (default: <root>/env/bin/python)"
    )]
    pub python: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        help = "Directory of the release cache (default: <root>/.fmtchurn)"
    )]
    pub cache: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        default_value = crate::config::DEFAULT_INDEX_URL,
        help = "Package index JSON API base URL"
    )]
    pub index_url: String,

    #[arg(long, global = true, help = "Refetch release history instead of using the cache")]
    pub refresh: bool,

    #[arg(
        long,
        global = true,
        help = "Remote URL, required for projects outside the built-in registry"
    )]
    pub url: Option<String>,

    #[arg(long, global = true, help = "Default branch of the project")]
    pub branch: Option<String>,

    #[arg(short, long, global = true, help = "Enable debug logging")]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Clone the project (if missing) and snapshot its default branch
    #[command(name = "clone")]
    CloneProject {
        project: String,
    },
    /// List the release history of a formatter
    Releases {
        #[arg(value_enum)]
        formatter: FormatterKind,

        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
    /// Apply every formatter release to the project, one tagged commit each
    Run {
        project: String,

        #[arg(value_enum)]
        formatter: FormatterKind,

        #[arg(long, help = "Continue on the existing formatter branch instead of recreating it")]
        no_reset: bool,
    },
    /// Report churn per release, or per fixed interval with --days
    Report {
        project: String,

        #[arg(value_enum)]
        formatter: FormatterKind,

        #[arg(long, help = "Aggregate over windows of this many days")]
        days: Option<u32>,

        #[arg(
            long,
            requires = "days",
            help = "First window start (RFC3339, YYYY-MM-DD, or natural language)"
        )]
        start: Option<String>,

        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,
    },
    /// Count the project's lines of code
    Loc {
        project: String,

        #[arg(long, default_value = "Python", help = "Language as named by cloc")]
        language: String,
    },
    /// Check that every source file in the project compiles
    Validate {
        project: String,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        let common = self.common;
        match self.command {
            Commands::CloneProject { project } => crate::commands::clone::exec(&common, &project),
            Commands::Releases { formatter, json } => {
                crate::commands::releases::exec(&common, formatter, json)
            }
            Commands::Run { project, formatter, no_reset } => {
                crate::commands::run::exec(&common, &project, formatter, !no_reset)
            }
            Commands::Report { project, formatter, days, start, json, ndjson } => {
                let start = start.as_deref();
                crate::commands::report::exec(
                    &common, &project, formatter, days, start, json, ndjson,
                )
            }
            Commands::Loc { project, language } => {
                crate::commands::inspect::loc(&common, &project, &language)
            }
            Commands::Validate { project } => crate::commands::inspect::validate(&common, &project),
        }
    }
}
