mod audio;
mod catalog;
mod config;
mod error;
mod keys;
mod media;
mod runtime;
mod session;
mod ui;

use clap::Parser;

use crate::catalog::SongId;

#[derive(Parser, Debug)]
#[command(name = "cantor")]
#[command(about = "Terminal player for a song catalog server", long_about = None)]
pub struct Cli {
    /// Catalog server base URL (overrides `server.base_url`)
    #[arg(long)]
    server: Option<String>,

    /// Playlist entry to start from
    #[arg(long, default_value = "0")]
    start: usize,

    /// Start playing as soon as the first song is loaded
    #[arg(long)]
    play: bool,

    /// Song ids to queue
    ids: Vec<SongId>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run(Cli::parse())
}
