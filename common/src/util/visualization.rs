use crate::db::core::NetlistDB;
use crate::geom::point::Point;
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect as ImageRect;
use std::path::Path;

/// Renders a placement to a PNG: gate rectangles with their pins marked.
/// Image y grows downward, the circuit uses a bottom-left origin, so rows
/// are flipped during mapping.
pub fn draw_placement(db: &NetlistDB, positions: &[Point<i64>], filename: &str, size: u32) {
    let mut img = RgbImage::from_pixel(size, size, Rgb([20, 20, 20]));

    let span_x = db
        .gates
        .iter()
        .zip(positions)
        .map(|(g, p)| p.x + g.width)
        .max()
        .unwrap_or(1)
        .max(1);
    let span_y = db
        .gates
        .iter()
        .zip(positions)
        .map(|(g, p)| p.y + g.height)
        .max()
        .unwrap_or(1)
        .max(1);
    let span = span_x.max(span_y) as f64;
    let scale = size as f64 / span;

    let color_gate = Rgb([180, 60, 60]);
    let color_pin = Rgb([255, 255, 255]);

    for (i, gate) in db.gates.iter().enumerate() {
        let pos = positions[i];
        let w = (gate.width as f64 * scale).max(2.0);
        let h = (gate.height as f64 * scale).max(2.0);
        let x = pos.x as f64 * scale;
        let y_top = size as f64 - (pos.y as f64 * scale) - h;

        let rect = ImageRect::at(x as i32, y_top as i32).of_size(w as u32, h as u32);
        draw_filled_rect_mut(&mut img, rect, color_gate);

        for &pin in &gate.pins {
            let p = db.pin_position(pin, pos);
            let px = (p.x as f64 * scale) as i32;
            let py = (size as f64 - p.y as f64 * scale) as i32;
            let dot = ImageRect::at(px.max(0), (py - 1).max(0)).of_size(2, 2);
            draw_filled_rect_mut(&mut img, dot, color_pin);
        }
    }

    let _ = img.save(Path::new(filename));
}
