use std::path::Path;

use eframe::egui::{self, Align, Context, Layout};
use graph_explorer::GraphEngine;

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        engine: &mut GraphEngine,
        dataset_path: &Path,
        reload_requested: &mut bool,
    ) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("graph-explorer");
                    ui.separator();
                    ui.label(format!("dataset: {}", dataset_path.display()));
                    if let Some(graph) = engine.graph() {
                        ui.label(format!("nodes: {}", graph.node_count()));
                        ui.label(format!("edges: {}", graph.edge_count()));
                    }
                    if let Some(report) = engine.report() {
                        let skipped = report.skipped_count() + report.malformed;
                        if skipped > 0 {
                            ui.label(format!("skipped entries: {skipped}"));
                        }
                    }
                    let reload_button =
                        ui.add_enabled(!engine.is_loading(), egui::Button::new("Reload dataset"));
                    if reload_button.clicked() {
                        *reload_requested = true;
                    }
                    if ui.button("Reset view").clicked() {
                        self.pan = egui::Vec2::ZERO;
                        self.zoom = 1.0;
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if let Some(text) = self.visible_graph_text() {
                            ui.label(text);
                        }
                        if engine.is_loading() {
                            ui.spinner();
                        }
                    });
                });
            });

        egui::SidePanel::left("filters")
            .resizable(true)
            .default_width(280.0)
            .show(ctx, |ui| self.draw_filters(ui, engine));

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| self.draw_details(ui, engine));

        egui::CentralPanel::default().show(ctx, |ui| self.draw_graph(ui, engine));

        if let Some(event) = self.hover.take() {
            engine.apply_hover(event);
        }
    }

    fn visible_graph_text(&self) -> Option<String> {
        let frame = &self.frame_cache.as_ref()?.frame;
        Some(format!(
            "visible: {} nodes / {} edges  zoom {:.2}",
            frame.visible_nodes, frame.visible_edges, self.zoom
        ))
    }
}
