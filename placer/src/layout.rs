use rand::Rng;
use tdp_common::db::core::NetlistDB;
use tdp_common::geom::point::Point;
use tdp_common::geom::rect::Rect;

/// Deterministic collision-free seed layout: square grid, cell size twice
/// the maximum gate dimension (adjacent cells can never overlap), gates in
/// database order placed row-major one per cell. Returns the placement and
/// the grid extent that bounds every later move.
pub fn initial_placement(db: &NetlistDB) -> (Vec<Point<i64>>, i64) {
    let max_dim = db
        .gates
        .iter()
        .map(|g| g.width.max(g.height))
        .max()
        .unwrap_or(1);
    let cell = max_dim * 2;
    let side = (db.num_gates() as f64).sqrt().ceil() as i64;

    let positions = (0..db.num_gates() as i64)
        .map(|i| Point::new((i % side) * cell, (i / side) * cell))
        .collect();

    (positions, side * cell)
}

/// The sole move operator: pick one gate uniformly at random, offset each
/// axis by an independent uniform draw from [-5, 5], clamp so the gate
/// stays inside the grid. Every other gate keeps its position.
pub fn perturb(
    db: &NetlistDB,
    positions: &[Point<i64>],
    extent: i64,
    rng: &mut impl Rng,
) -> Vec<Point<i64>> {
    let mut next = positions.to_vec();
    let idx = rng.gen_range(0..next.len());
    let gate = &db.gates[idx];

    let dx: i64 = rng.gen_range(-5..=5);
    let dy: i64 = rng.gen_range(-5..=5);

    next[idx].x = (next[idx].x + dx).clamp(0, extent - gate.width);
    next[idx].y = (next[idx].y + dy).clamp(0, extent - gate.height);
    next
}

/// Whole-candidate legality: no two gate rectangles overlap. Shared edges
/// are legal. Quadratic pairwise scan.
pub fn is_legal(db: &NetlistDB, positions: &[Point<i64>]) -> bool {
    for i in 0..db.num_gates() {
        let a = Rect::of_gate(positions[i], db.gates[i].width, db.gates[i].height);
        for j in (i + 1)..db.num_gates() {
            let b = Rect::of_gate(positions[j], db.gates[j].width, db.gates[j].height);
            if a.overlaps(&b) {
                return false;
            }
        }
    }
    true
}
