mod app;

use std::path::PathBuf;

use clap::Parser;
use graph_explorer::{EngineConfig, load_config};
use log::error;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Dataset document with nodes, edges, clusters and tags.
    #[arg(long, default_value = "./dataset.json")]
    dataset: PathBuf,
    /// Optional JSON file overriding palette, label and edge settings.
    #[arg(long)]
    settings: Option<PathBuf>,
}

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = match &args.settings {
        Some(path) => load_config(path).unwrap_or_else(|failure| {
            error!("{failure:#}; falling back to default settings");
            EngineConfig::default()
        }),
        None => EngineConfig::default(),
    };

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "graph-explorer",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::GraphExplorerApp::new(
                cc,
                args.dataset,
                config,
            )))
        }),
    )
}
