use tdp_common::db::core::NetlistDB;
use tdp_common::db::indices::PinId;
use tdp_common::geom::point::Point;

/// Propagation delay of one path under a placement. Consecutive nodes on
/// the same gate cost the gate's intrinsic delay; a hop between gates costs
/// `wire_delay` per unit of Manhattan distance between the absolute pin
/// coordinates. Pure integer arithmetic; no hidden state.
pub fn path_delay(db: &NetlistDB, positions: &[Point<i64>], path: &[PinId]) -> i64 {
    let mut total = 0;
    for hop in path.windows(2) {
        let from_gate = db.pin_to_gate[hop[0].index()];
        let to_gate = db.pin_to_gate[hop[1].index()];
        if from_gate == to_gate {
            total += db.gates[from_gate.index()].delay;
        } else {
            let a = db.pin_position(hop[0], positions[from_gate.index()]);
            let b = db.pin_position(hop[1], positions[to_gate.index()]);
            total += db.wire_delay * a.manhattan(b);
        }
    }
    total
}

/// Index and delay of the slowest path in the full enumerated set,
/// recomputed from scratch; the first maximum wins ties. `None` when the
/// set is empty.
pub fn critical_path(
    db: &NetlistDB,
    positions: &[Point<i64>],
    paths: &[Vec<PinId>],
) -> Option<(usize, i64)> {
    let mut best: Option<(usize, i64)> = None;
    for (i, path) in paths.iter().enumerate() {
        let delay = path_delay(db, positions, path);
        if best.is_none_or(|(_, d)| delay > d) {
            best = Some((i, delay));
        }
    }
    best
}
