use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "docsync",
    about = "Sync object store documents into knowledge service datasets",
    version = env!("CARGO_PKG_VERSION"),
    author
)]
pub struct Cli {
    #[arg(short, long, help = "Run continuously, one pass every --interval seconds")]
    pub daemon: bool,

    #[arg(
        short,
        long,
        env = "DOCSYNC_INTERVAL",
        help = "Seconds between passes in daemon mode [default: 300]"
    )]
    pub interval: Option<u64>,

    #[arg(short = 'n', long, help = "Show what would be synced without writing anything")]
    pub dry_run: bool,

    #[arg(long, requires = "dry_run", help = "Print the dry-run plan as JSON")]
    pub json: bool,

    #[arg(short, long, help = "Debug logging for docsync crates")]
    pub verbose: bool,

    #[arg(short, long, env = "DOCSYNC_CONFIG", help = "Path to a JSON config file")]
    pub config: Option<PathBuf>,
}
