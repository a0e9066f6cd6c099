// hubdeck: a terminal dashboard over the gh CLI.
// Prefetches the owner/repo inventory, then runs the TUI event loop.

mod app;
mod cache;
mod config;
mod error;
mod gh;
mod json;
mod pipeline;
mod prefetch;
mod state;
mod ui;

use crate::app::App;
use crate::cache::ResultCache;
use crate::config::Config;
use crate::error::Result;
use crate::gh::ShellFetcher;
use crate::pipeline::Pipeline;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    config.ensure_dirs()?;

    let fetcher = ShellFetcher::new(config.fetch_log.clone());
    let pipeline = Pipeline::new(ResultCache::new(config, fetcher));

    // Startup gate: the UI waits for the inventory before its first frame.
    let (pipeline, inventory) = prefetch::gather(pipeline).await?;

    let mut terminal = ratatui::init();
    let result = App::new(pipeline, inventory).run(&mut terminal);
    ratatui::restore();
    result
}
