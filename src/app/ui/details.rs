use eframe::egui::{self, RichText, Ui};
use graph_explorer::GraphEngine;

use super::super::ViewModel;

const SKIPPED_ROWS: usize = 20;

impl ViewModel {
    pub(in crate::app) fn draw_details(&self, ui: &mut Ui, engine: &GraphEngine) {
        ui.heading("Hovered node");
        ui.add_space(6.0);

        match engine.hovered_node() {
            None => {
                ui.label("Hover a node in the graph or in the search results.");
            }
            Some(node) => {
                ui.label(RichText::new(node.label.as_str()).strong());
                ui.small(node.key.as_str());
                ui.add_space(6.0);

                ui.label(format!("Tag: {} ({})", node.tag, node.category.label()));
                let cluster = engine
                    .clusters()
                    .find(|cluster| cluster.key == node.cluster)
                    .map_or(node.cluster.as_str(), |cluster| cluster.display_label());
                ui.label(format!("Cluster: {cluster}"));

                if node.category.is_user() {
                    ui.label(format!("Id: {}", node.id));
                    ui.label(format!("Points: {}", node.points));
                    ui.label(format!("Events: {}", node.event_number));
                }

                if let Some(graph) = engine.graph() {
                    ui.label(format!(
                        "Outgoing: {}  Incoming: {}",
                        graph.outgoing_edges(&node.key).count(),
                        graph.incoming_edges(&node.key).count(),
                    ));
                }
                ui.small(format!("Image: {}", node.image));

                if !node.attributes.is_empty() {
                    ui.separator();
                    egui::Grid::new("node_attributes").striped(true).show(ui, |ui| {
                        for (field, value) in &node.attributes {
                            ui.label(field.as_str());
                            ui.label(value.to_string());
                            ui.end_row();
                        }
                    });
                }
            }
        }

        let Some(report) = engine.report() else {
            return;
        };
        if report.is_complete() {
            return;
        }

        ui.separator();
        ui.label(RichText::new("Skipped dataset entries").strong());
        if report.malformed > 0 {
            ui.label(format!("{} malformed entries", report.malformed));
        }
        for (entry, reason) in report.skipped().take(SKIPPED_ROWS) {
            ui.small(format!("{:?} {}: {reason}", entry.kind, entry.key));
        }
        let remaining = report.skipped_count().saturating_sub(SKIPPED_ROWS);
        if remaining > 0 {
            ui.small(format!("... and {remaining} more"));
        }
    }
}
