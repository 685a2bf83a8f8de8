use std::path::{Path, PathBuf};
use std::time::Duration;

use eframe::egui::{self, Context, Vec2};
use graph_explorer::graph::SearchHit;
use graph_explorer::{EngineConfig, GraphEngine, LoadStatus, RenderFrame};
use log::{info, warn};

use hover::HoverRouter;

mod canvas;
mod hover;
mod render_utils;
mod ui;

pub struct GraphExplorerApp {
    dataset_path: PathBuf,
    engine: GraphEngine,
    view: ViewModel,
}

struct ViewModel {
    pan: Vec2,
    zoom: f32,
    search: String,
    search_hits: Vec<SearchHit>,
    hover: HoverRouter,
    frame_cache: Option<FrameCache>,
}

struct FrameCache {
    revision: u64,
    zoom: f32,
    frame: RenderFrame,
}

impl Default for ViewModel {
    fn default() -> Self {
        Self {
            pan: Vec2::ZERO,
            zoom: 1.0,
            search: String::new(),
            search_hits: Vec::new(),
            hover: HoverRouter::default(),
            frame_cache: None,
        }
    }
}

impl GraphExplorerApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        dataset_path: PathBuf,
        config: EngineConfig,
    ) -> Self {
        let mut engine = GraphEngine::new(config);
        Self::start_load(&mut engine, &dataset_path);
        Self {
            dataset_path,
            engine,
            view: ViewModel::default(),
        }
    }

    fn start_load(engine: &mut GraphEngine, dataset_path: &Path) {
        info!("loading dataset {}", dataset_path.display());
        if let Err(error) = engine.begin_load(dataset_path.to_path_buf()) {
            warn!("load request ignored: {error}");
        }
    }
}

impl eframe::App for GraphExplorerApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        match self.engine.poll_load() {
            LoadStatus::Pending => ctx.request_repaint_after(Duration::from_millis(50)),
            LoadStatus::Completed => self.view = ViewModel::default(),
            LoadStatus::Idle | LoadStatus::Failed => {}
        }

        if self.engine.is_ready() {
            let mut reload_requested = false;
            self.view
                .show(ctx, &mut self.engine, &self.dataset_path, &mut reload_requested);
            if reload_requested {
                Self::start_load(&mut self.engine, &self.dataset_path);
            }
            return;
        }

        let mut retry_requested = false;
        egui::CentralPanel::default().show(ctx, |ui| match self.engine.last_error() {
            Some(error) if !self.engine.is_loading() => {
                ui.heading("Failed to load the graph dataset");
                ui.add_space(6.0);
                ui.label(error);
                ui.add_space(10.0);
                if ui.button("Retry").clicked() {
                    retry_requested = true;
                }
            }
            _ => {
                ui.vertical_centered(|ui| {
                    ui.add_space(120.0);
                    ui.heading("Loading graph dataset...");
                    ui.add_space(8.0);
                    ui.spinner();
                });
            }
        });

        if retry_requested {
            Self::start_load(&mut self.engine, &self.dataset_path);
        }
    }
}
