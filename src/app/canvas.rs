use std::collections::HashMap;

use eframe::egui::{self, Align2, Color32, FontId, Rect, Sense, Stroke, Ui, vec2};
use graph_explorer::config::EdgeCurve;
use graph_explorer::graph::rendered_size;
use graph_explorer::{Camera, GraphEngine};

use super::render_utils::{
    circle_visible, css_color_or, curve_points, screen_to_world, world_to_screen,
};
use super::hover::HoverSource;
use super::{FrameCache, ViewModel};

const BACKGROUND: Color32 = Color32::from_rgb(19, 23, 29);
const LABEL_COLOR: Color32 = Color32::from_rgb(226, 230, 238);
const FALLBACK_NODE: Color32 = Color32::from_rgb(73, 94, 152);
const FALLBACK_EDGE: Color32 = Color32::from_rgb(123, 155, 212);
const EDGE_CURVATURE: f32 = 0.25;
const CURVE_SEGMENTS: usize = 12;

impl ViewModel {
    fn handle_graph_zoom(&mut self, ui: &Ui, rect: Rect, response: &egui::Response) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| rect.center());
        let world_before = screen_to_world(rect, self.pan, self.zoom, pointer);

        let zoom_factor = (1.0 + (scroll * 0.0018)).clamp(0.85, 1.15);
        self.zoom = (self.zoom * zoom_factor).clamp(0.05, 12.0);
        self.pan = pointer - rect.center() - (world_before * self.zoom);
    }

    fn handle_graph_pan(&mut self, response: &egui::Response) {
        if response.dragged_by(egui::PointerButton::Secondary)
            || response.dragged_by(egui::PointerButton::Middle)
            || response.dragged_by(egui::PointerButton::Primary)
        {
            self.pan += response.drag_delta();
        }
    }

    fn refresh_frame(&mut self, engine: &GraphEngine) {
        let stale = self.frame_cache.as_ref().is_none_or(|cache| {
            cache.revision != engine.revision() || cache.zoom != self.zoom
        });
        if !stale {
            return;
        }

        self.frame_cache = engine
            .frame(Camera { zoom: self.zoom })
            .map(|frame| FrameCache {
                revision: engine.revision(),
                zoom: self.zoom,
                frame,
            });
    }

    pub(super) fn draw_graph(&mut self, ui: &mut Ui, engine: &GraphEngine) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, BACKGROUND);

        self.handle_graph_zoom(ui, rect, &response);
        self.handle_graph_pan(&response);
        self.refresh_frame(engine);

        let pan = self.pan;
        let zoom = self.zoom;
        let Some(frame) = self.frame_cache.as_ref().map(|cache| &cache.frame) else {
            ui.label("The graph is not ready yet.");
            return;
        };

        let mut screen = HashMap::with_capacity(frame.nodes.len());
        for node in &frame.nodes {
            let world = vec2(node.position.x as f32, node.position.y as f32);
            let radius = rendered_size(node.size, zoom).clamp(2.0, 60.0);
            screen.insert(
                node.key.as_str(),
                (world_to_screen(rect, pan, zoom, world), radius),
            );
        }

        for edge in frame.edges.iter().filter(|edge| edge.visible) {
            let (Some(&(start, _)), Some(&(end, _))) = (
                screen.get(edge.source.as_str()),
                screen.get(edge.target.as_str()),
            ) else {
                continue;
            };
            if !rect.contains(start) && !rect.contains(end) {
                continue;
            }

            let stroke = Stroke::new(
                (edge.size * zoom.sqrt()).clamp(0.5, 4.0),
                css_color_or(&edge.color, FALLBACK_EDGE),
            );
            match edge.curve {
                EdgeCurve::Straight => {
                    painter.line_segment([start, end], stroke);
                }
                EdgeCurve::Curve => {
                    let points = curve_points(start, end, EDGE_CURVATURE, CURVE_SEGMENTS);
                    for pair in points.windows(2) {
                        painter.line_segment([pair[0], pair[1]], stroke);
                    }
                }
            }
        }

        let mut draw_order = frame
            .nodes
            .iter()
            .filter(|node| node.visible)
            .collect::<Vec<_>>();
        draw_order.sort_by(|a, b| {
            a.z_index
                .cmp(&b.z_index)
                .then_with(|| a.size.total_cmp(&b.size))
        });

        let pointer = if response.hovered() {
            ui.input(|input| input.pointer.hover_pos())
        } else {
            None
        };
        let mut nearest: Option<(&str, f32)> = None;

        for node in draw_order {
            let Some(&(position, radius)) = screen.get(node.key.as_str()) else {
                continue;
            };
            if !circle_visible(rect, position, radius) {
                continue;
            }

            painter.circle_filled(position, radius, css_color_or(&node.color, FALLBACK_NODE));
            if node.highlighted {
                painter.circle_stroke(position, radius + 2.0, Stroke::new(2.0, Color32::WHITE));
            }
            if let Some(label) = &node.label {
                painter.text(
                    position + vec2(radius + 4.0, 0.0),
                    Align2::LEFT_CENTER,
                    label,
                    FontId::proportional(12.0),
                    LABEL_COLOR,
                );
            }

            if let Some(pointer) = pointer {
                let distance = position.distance(pointer);
                if distance <= radius && nearest.is_none_or(|(_, best)| distance < best) {
                    nearest = Some((node.key.as_str(), distance));
                }
            }
        }

        if nearest.is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }

        self.hover.offer(
            HoverSource::Canvas,
            nearest.map(|(key, _)| key.to_owned()),
        );
    }
}
