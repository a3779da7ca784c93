use crate::db::core::NetlistDB;
use crate::geom::point::Point;
use crate::geom::rect::Rect;
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};

/// Independent verification of a final placement: every gate inside the
/// given extent and no two gate rectangles overlapping. Shared edges are
/// legal (half-open intervals on both axes).
pub fn run_placement_check(
    db: &NetlistDB,
    positions: &[Point<i64>],
    extent: i64,
) -> Result<(), String> {
    log::info!("Starting placement verification...");
    let valid = AtomicBool::new(true);

    db.gates.par_iter().enumerate().for_each(|(i, gate)| {
        let pos = positions[i];
        if pos.x < 0 || pos.y < 0 || pos.x + gate.width > extent || pos.y + gate.height > extent {
            log::error!("FAIL: Gate '{}' out of bounds.", gate.name);
            valid.store(false, Ordering::Relaxed);
        }
    });

    let has_overlap = (0..db.num_gates()).into_par_iter().any(|i| {
        let r1 = Rect::of_gate(positions[i], db.gates[i].width, db.gates[i].height);

        for j in (i + 1)..db.num_gates() {
            let r2 = Rect::of_gate(positions[j], db.gates[j].width, db.gates[j].height);
            if r1.overlaps(&r2) {
                log::error!(
                    "FAIL: Gate overlap '{}' and '{}'",
                    db.gates[i].name,
                    db.gates[j].name
                );
                return true;
            }
        }
        false
    });

    if has_overlap {
        valid.store(false, Ordering::Relaxed);
    }

    if valid.load(Ordering::Relaxed) {
        log::info!("\x1b[32mPASS\x1b[0m: Placement is valid.");
        Ok(())
    } else {
        Err("Placement verification failed.".to_string())
    }
}
