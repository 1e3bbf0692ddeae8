//! Shape generation for 2D primitives
//!
//! Everything is emitted as a plain triangle list in canvas pixels (y down).

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Vertex, colors, darken, lighten};

/// Generate vertices for a solid axis-aligned rectangle
pub fn rect(pos: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    gradient_quad(pos, size, [color; 4])
}

/// Top-to-bottom gradient
pub fn gradient_rect_v(pos: Vec2, size: Vec2, top: [f32; 4], bottom: [f32; 4]) -> Vec<Vertex> {
    gradient_quad(pos, size, [top, top, bottom, bottom])
}

/// Left-to-right gradient
pub fn gradient_rect_h(pos: Vec2, size: Vec2, left: [f32; 4], right: [f32; 4]) -> Vec<Vertex> {
    gradient_quad(pos, size, [left, right, left, right])
}

/// Corner colors: top-left, top-right, bottom-left, bottom-right
fn gradient_quad(pos: Vec2, size: Vec2, c: [[f32; 4]; 4]) -> Vec<Vertex> {
    let (x0, y0) = (pos.x, pos.y);
    let (x1, y1) = (pos.x + size.x, pos.y + size.y);
    vec![
        Vertex::new(x0, y0, c[0]),
        Vertex::new(x1, y0, c[1]),
        Vertex::new(x0, y1, c[2]),
        Vertex::new(x0, y1, c[2]),
        Vertex::new(x1, y0, c[1]),
        Vertex::new(x1, y1, c[3]),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 6) as usize);
    let at = |r: f32, theta: f32| center + Vec2::new(r * theta.cos(), r * theta.sin());

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        let inner1 = at(inner_radius, theta1);
        let outer1 = at(outer_radius, theta1);
        let inner2 = at(inner_radius, theta2);
        let outer2 = at(outer_radius, theta2);

        // Two triangles per segment
        vertices.push(Vertex::new(inner1.x, inner1.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(inner2.x, inner2.y, color));

        vertices.push(Vertex::new(inner2.x, inner2.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(outer2.x, outer2.y, color));
    }

    vertices
}

/// Filled area between a polyline and a horizontal base
pub fn ridge(points: &[Vec2], base_y: f32, color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(points.len().saturating_sub(1) * 6);
    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        vertices.push(Vertex::new(a.x, a.y, color));
        vertices.push(Vertex::new(b.x, b.y, color));
        vertices.push(Vertex::new(a.x, base_y, color));

        vertices.push(Vertex::new(a.x, base_y, color));
        vertices.push(Vertex::new(b.x, b.y, color));
        vertices.push(Vertex::new(b.x, base_y, color));
    }
    vertices
}

/// Vertical dashes along `x` from the top of the canvas to `height`
pub fn dashed_line(x: f32, width: f32, height: f32, dash: f32, gap: f32, color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    let mut y = 0.0;
    while y < height {
        let len = dash.min(height - y);
        vertices.extend(rect(Vec2::new(x - width / 2.0, y), Vec2::new(width, len), color));
        y += dash + gap;
    }
    vertices
}

fn wheel(pos: Vec2) -> Vec<Vertex> {
    let mut v = rect(pos, Vec2::new(8.0, 15.0), colors::TIRE);
    v.extend(rect(pos + Vec2::new(1.0, 2.0), Vec2::new(6.0, 11.0), colors::RIM));
    v
}

/// Top-down kart: shadow, body, windshields, wheels and lights.
/// The player's kart also gets a racing stripe and a round badge.
pub fn car(pos: Vec2, size: Vec2, body: [f32; 4], is_player: bool, segments: u32) -> Vec<Vertex> {
    let (x, y, w, h) = (pos.x, pos.y, size.x, size.y);
    let mut v = Vec::with_capacity(128);

    // Shadow
    v.extend(rect(Vec2::new(x + 2.0, y + h + 2.0), Vec2::new(w, 8.0), colors::SHADOW));

    // Wheels sit under the body edges
    for wheel_pos in [
        Vec2::new(x - 5.0, y + 10.0),
        Vec2::new(x + w - 3.0, y + 10.0),
        Vec2::new(x - 5.0, y + h - 25.0),
        Vec2::new(x + w - 3.0, y + h - 25.0),
    ] {
        v.extend(wheel(wheel_pos));
    }

    // Body with a side-to-side sheen
    let half = Vec2::new(w / 2.0, h);
    v.extend(gradient_rect_h(pos, half, lighten(body, 0.2), body));
    v.extend(gradient_rect_h(pos + Vec2::new(w / 2.0, 0.0), half, body, darken(body, 0.2)));
    v.extend(rect(pos + Vec2::new(2.0, 2.0), Vec2::new(w - 4.0, 8.0), lighten(body, 0.4)));

    // Windshields
    v.extend(rect(
        pos + Vec2::new(5.0, 5.0),
        Vec2::new(w - 10.0, h * 0.25),
        colors::WINDSHIELD,
    ));
    v.extend(rect(
        pos + Vec2::new(5.0, h * 0.7),
        Vec2::new(w - 10.0, h * 0.25),
        colors::WINDSHIELD,
    ));

    // Lights
    for lx in [x + 8.0, x + w - 14.0] {
        v.extend(rect(Vec2::new(lx, y + 2.0), Vec2::new(6.0, 4.0), colors::HEADLIGHT));
        v.extend(rect(Vec2::new(lx, y + h - 6.0), Vec2::new(6.0, 4.0), colors::TAILLIGHT));
    }

    if is_player {
        let centre = pos + size / 2.0;
        v.extend(rect(
            Vec2::new(centre.x - 1.0, y + 15.0),
            Vec2::new(2.0, h - 30.0),
            colors::STRIPE,
        ));
        v.extend(circle(centre, 12.0, colors::STRIPE, segments));
        v.extend(circle(centre, 8.0, body, segments));
    }

    v
}

/// Spinning coin; `rotation` moves the shine around the face
pub fn coin(center: Vec2, radius: f32, rotation: f32, segments: u32) -> Vec<Vertex> {
    let mut v = circle(center + Vec2::splat(2.0), radius, colors::SHADOW, segments);
    v.extend(circle(center, radius, colors::COIN, segments));
    v.extend(ring(center, radius * 0.85, radius, colors::COIN_RIM, segments));
    v.extend(circle(center, radius * 2.0 / 3.0, colors::COIN_INNER, segments));

    let shine = Vec2::new(-radius / 3.0, -radius / 3.0);
    let (sin, cos) = rotation.sin_cos();
    let shine = Vec2::new(shine.x * cos - shine.y * sin, shine.x * sin + shine.y * cos);
    v.extend(circle(center + shine, radius / 2.0, colors::COIN_SHINE, segments));
    v
}
