use eframe::egui::{Color32, Pos2, Rect, Vec2, vec2};

/// Parses the CSS color forms used in datasets: `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb()`, `rgba()`.
pub(super) fn parse_css_color(value: &str) -> Option<Color32> {
    let value = value.trim();

    if let Some(hex) = value.strip_prefix('#') {
        let channel = |index: usize| u8::from_str_radix(hex.get(index..index + 2)?, 16).ok();
        return match hex.len() {
            3 => {
                let mut expanded = [0u8; 3];
                for (slot, digit) in expanded.iter_mut().zip(hex.chars()) {
                    let nibble = digit.to_digit(16)? as u8;
                    *slot = nibble * 17;
                }
                Some(Color32::from_rgb(expanded[0], expanded[1], expanded[2]))
            }
            6 => Some(Color32::from_rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Color32::from_rgba_unmultiplied(
                channel(0)?,
                channel(2)?,
                channel(4)?,
                channel(6)?,
            )),
            _ => None,
        };
    }

    let body = value
        .strip_prefix("rgba(")
        .or_else(|| value.strip_prefix("rgb("))?
        .strip_suffix(')')?;
    let parts = body.split(',').map(str::trim).collect::<Vec<_>>();
    let component = |index: usize| -> Option<u8> {
        let raw = parts.get(index)?.parse::<f32>().ok()?;
        Some(raw.clamp(0.0, 255.0).round() as u8)
    };

    let alpha = match parts.len() {
        3 => 255,
        4 => {
            let raw = parts[3].parse::<f32>().ok()?;
            (raw.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        _ => return None,
    };

    Some(Color32::from_rgba_unmultiplied(
        component(0)?,
        component(1)?,
        component(2)?,
        alpha,
    ))
}

pub(super) fn css_color_or(value: &str, fallback: Color32) -> Color32 {
    parse_css_color(value).unwrap_or(fallback)
}

pub(super) fn circle_visible(rect: Rect, position: Pos2, radius: f32) -> bool {
    !(position.x + radius < rect.left()
        || position.x - radius > rect.right()
        || position.y + radius < rect.top()
        || position.y - radius > rect.bottom())
}

pub(super) fn world_to_screen(rect: Rect, pan: Vec2, zoom: f32, world: Vec2) -> Pos2 {
    rect.center() + pan + world * zoom
}

pub(super) fn screen_to_world(rect: Rect, pan: Vec2, zoom: f32, screen: Pos2) -> Vec2 {
    (screen - rect.center() - pan) / zoom
}

/// Samples a quadratic curve bowing to the left of `start -> end`.
pub(super) fn curve_points(start: Pos2, end: Pos2, curvature: f32, segments: usize) -> Vec<Pos2> {
    let delta = end - start;
    let normal = vec2(-delta.y, delta.x);
    let control = start + delta * 0.5 + normal * curvature;
    let segments = segments.max(1);

    (0..=segments)
        .map(|step| {
            let t = step as f32 / segments as f32;
            let inverse = 1.0 - t;
            let point = start.to_vec2() * (inverse * inverse)
                + control.to_vec2() * (2.0 * inverse * t)
                + end.to_vec2() * (t * t);
            point.to_pos2()
        })
        .collect()
}
