use eframe::egui::{self, Ui};
use graph_explorer::GraphEngine;

use super::super::ViewModel;
use super::super::hover::HoverSource;

const SEARCH_LIMIT: usize = 12;

impl ViewModel {
    pub(in crate::app) fn draw_filters(&mut self, ui: &mut Ui, engine: &mut GraphEngine) {
        ui.heading("Search");
        if ui.text_edit_singleline(&mut self.search).changed() {
            self.search_hits = engine.search(&self.search, SEARCH_LIMIT);
        }

        let mut hovered_hit = None;
        for hit in &self.search_hits {
            let active = engine.hovered() == Some(hit.key.as_str());
            let row = ui.selectable_label(active, hit.label.as_str());
            if row.hovered() || row.clicked() {
                hovered_hit = Some(hit.key.clone());
            }
        }
        self.hover.offer(HoverSource::Search, hovered_hit);

        ui.separator();
        egui::ScrollArea::vertical().show(ui, |ui| {
            draw_cluster_filters(ui, engine);
            ui.separator();
            draw_tag_filters(ui, engine);
        });
    }
}

fn draw_cluster_filters(ui: &mut Ui, engine: &mut GraphEngine) {
    let clusters = engine
        .clusters()
        .map(|cluster| (cluster.key.clone(), cluster.display_label().to_owned()))
        .collect::<Vec<_>>();

    ui.horizontal(|ui| {
        ui.heading("Clusters");
        if ui.small_button("all").clicked() {
            engine.set_clusters(clusters.iter().map(|(key, _)| key.as_str()));
        }
        if ui.small_button("none").clicked() {
            engine.set_clusters([]);
        }
    });

    for (key, label) in &clusters {
        let mut enabled = engine
            .filters()
            .is_some_and(|filters| filters.is_cluster_enabled(key));
        if ui.checkbox(&mut enabled, label.as_str()).changed() {
            engine.toggle_cluster(key);
        }
    }
}

fn draw_tag_filters(ui: &mut Ui, engine: &mut GraphEngine) {
    let tags = engine
        .tags()
        .map(|tag| tag.key.clone())
        .collect::<Vec<_>>();

    ui.horizontal(|ui| {
        ui.heading("Tags");
        if ui.small_button("all").clicked() {
            engine.set_tags(tags.iter().map(String::as_str));
        }
        if ui.small_button("none").clicked() {
            engine.set_tags([]);
        }
    });

    for key in &tags {
        let mut enabled = engine
            .filters()
            .is_some_and(|filters| filters.is_tag_enabled(key));
        if ui.checkbox(&mut enabled, key.as_str()).changed() {
            engine.toggle_tag(key);
        }
    }
}
