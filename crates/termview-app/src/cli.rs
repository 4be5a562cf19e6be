use clap::Parser;

/// termview: a terminal emulator rendered in an embedded webview.
#[derive(Parser, Debug)]
#[command(name = "termview", version, about)]
pub struct Args {
    /// Execute a command instead of the default shell.
    #[arg(short = 'e', long)]
    pub execute: Option<String>,

    /// Working directory to start in.
    #[arg(short = 'd', long)]
    pub directory: Option<String>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Log filter override (e.g. `debug` or `termview_bridge=trace`).
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}
