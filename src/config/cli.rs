use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "web-stack")]
#[command(about = "Declare and provision the infrastructure behind a web service")]
pub struct CliConfig {
    #[arg(
        long,
        help = "Load the service configuration from a TOML file instead of the environment"
    )]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Render the declaration without submitting it")]
    pub dry_run: bool,

    #[arg(long, help = "Write the rendered declaration manifest to a file")]
    pub out: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}
