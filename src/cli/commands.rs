use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "cloudsweep", version, about = "Idle cloud resource auditor")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one full account scan and publish the report
    Scan(ScanArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
    /// Print the effective savings rate table
    Rates(RatesArgs),
}

#[derive(Args, Clone)]
pub struct ScanArgs {
    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Cloud REST gateway base URL
    #[arg(long)]
    pub endpoint: Option<String>,

    /// API bearer token (or use CLOUDSWEEP_API_TOKEN)
    #[arg(long)]
    pub api_token: Option<String>,

    /// Project name stamped into the report
    #[arg(long)]
    pub project_name: Option<String>,

    /// Comma-separated region override (skips region discovery)
    #[arg(long)]
    pub regions: Option<String>,

    /// Also write the report to a local file
    #[arg(short, long)]
    pub output: Option<String>,

    /// Assemble the report and print it instead of publishing
    #[arg(long)]
    pub dry_run: bool,

    /// Scan identifier for log correlation (random when omitted)
    #[arg(long)]
    pub scan_id: Option<String>,
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// YAML configuration file
    pub config: String,
}

#[derive(Args, Clone)]
pub struct RatesArgs {
    /// YAML configuration file with rate overrides
    #[arg(short, long)]
    pub config: Option<String>,
}
