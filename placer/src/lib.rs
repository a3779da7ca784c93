pub mod anneal;
pub mod delay;
pub mod graph;
pub mod layout;
pub mod paths;

use rayon::prelude::*;
use thiserror::Error;

use tdp_common::db::core::NetlistDB;
use tdp_common::db::indices::PinId;
use tdp_common::geom::point::Point;
use tdp_common::util::config::AnnealingConfig;

use crate::graph::SignalGraph;

#[derive(Debug, Error)]
pub enum PlaceError {
    /// Structural wire loop; no placement is attempted.
    #[error("circuit contains a cyclic path: {pretty}")]
    Cyclic { cycle: Vec<PinId>, pretty: String },
}

/// Best placement found across all replicas.
#[derive(Clone, Debug)]
pub struct PlacementResult {
    pub positions: Vec<Point<i64>>,
    pub delay: i64,
    pub critical_path: Vec<PinId>,
    pub grid_extent: i64,
}

/// Full placement flow: build the signal graph, enumerate every boundary
/// path once, then fan out independent annealing replicas and keep the
/// global minimum-delay result.
///
/// Replicas run in parallel over rayon. The database is shared immutably;
/// each replica owns its placement vectors and its own deterministically
/// derived RNG seed, so runs never observe each other. Every replica runs
/// to its temperature floor; results are reduced sequentially so ties in
/// best delay resolve to the lowest replica index.
pub fn place(db: &NetlistDB, cfg: &AnnealingConfig) -> Result<PlacementResult, PlaceError> {
    let graph = SignalGraph::build(db);

    let paths = paths::enumerate(db, &graph).map_err(|cycle| {
        let pretty = paths::format_cycle(db, &cycle);
        PlaceError::Cyclic { cycle, pretty }
    })?;
    log::info!("Enumerated {} unique signal paths", paths.len());

    if paths.is_empty() {
        log::warn!("No boundary-to-boundary paths; keeping the seed layout");
        let (positions, grid_extent) = layout::initial_placement(db);
        return Ok(PlacementResult {
            positions,
            delay: 0,
            critical_path: Vec::new(),
            grid_extent,
        });
    }

    let replicas = if cfg.replicas == 0 {
        rayon::current_num_threads()
    } else {
        cfg.replicas
    };
    log::info!("Running {} annealing replicas", replicas);

    let results: Vec<PlacementResult> = (0..replicas)
        .into_par_iter()
        .map(|k| anneal::run_replica(db, &paths, cfg, cfg.seed.wrapping_add(k as u64)))
        .collect();

    Ok(select_best(results))
}

/// Minimum-delay reduction; the earliest replica wins ties.
fn select_best(results: Vec<PlacementResult>) -> PlacementResult {
    let mut iter = results.into_iter();
    let mut best = iter
        .next()
        .unwrap_or_else(|| PlacementResult {
            positions: Vec::new(),
            delay: 0,
            critical_path: Vec::new(),
            grid_extent: 0,
        });
    for candidate in iter {
        if candidate.delay < best.delay {
            best = candidate;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use tdp_common::db::core::Wire;

    fn result_with_delay(delay: i64) -> PlacementResult {
        PlacementResult {
            positions: vec![Point::new(delay, 0)],
            delay,
            critical_path: Vec::new(),
            grid_extent: 100,
        }
    }

    #[test]
    fn reduction_picks_global_minimum() {
        let best = select_best(vec![
            result_with_delay(12),
            result_with_delay(9),
            result_with_delay(15),
        ]);
        assert_eq!(best.delay, 9);
    }

    #[test]
    fn reduction_breaks_ties_by_first_replica() {
        let mut first = result_with_delay(9);
        first.grid_extent = 1;
        let mut second = result_with_delay(9);
        second.grid_extent = 2;

        let best = select_best(vec![first, second]);
        assert_eq!(best.grid_extent, 1);
    }

    #[test]
    fn cyclic_netlist_fails_before_placement() {
        let mut db = NetlistDB::new();
        for name in ["gA", "gB"] {
            let g = db.add_gate(name.to_string(), 4, 2, 1);
            db.add_pin(g, Point::new(0, 1));
            db.add_pin(g, Point::new(4, 1));
        }
        let a_in = db.lookup_pin("gA", 1).unwrap();
        let a_out = db.lookup_pin("gA", 2).unwrap();
        let b_in = db.lookup_pin("gB", 1).unwrap();
        let b_out = db.lookup_pin("gB", 2).unwrap();
        db.wires.push(Wire { src: a_out, dst: b_in });
        db.wires.push(Wire { src: b_out, dst: a_in });

        let err = place(&db, &AnnealingConfig::default()).unwrap_err();
        let PlaceError::Cyclic { cycle, pretty } = err;
        assert!(!cycle.is_empty());
        assert!(pretty.contains("->"));
    }

    #[test]
    fn end_to_end_two_gate_chain() {
        let mut db = NetlistDB::new();
        for name in ["g1", "g2"] {
            let g = db.add_gate(name.to_string(), 4, 2, 1);
            db.add_pin(g, Point::new(0, 1));
            db.add_pin(g, Point::new(4, 1));
        }
        db.wires.push(Wire {
            src: db.lookup_pin("g1", 2).unwrap(),
            dst: db.lookup_pin("g2", 1).unwrap(),
        });
        db.wire_delay = 1;

        let cfg = AnnealingConfig {
            initial_temp: 10.0,
            final_temp: 0.1,
            alpha: 0.8,
            moves_per_temp: 40,
            replicas: 2,
            seed: 5,
            auto_tune: false,
        };
        let result = place(&db, &cfg).unwrap();

        assert_eq!(result.critical_path.len(), 4);
        assert!(layout::is_legal(&db, &result.positions));
        // Both gate delays always contribute; the wire can never cost
        // less than zero.
        assert!(result.delay >= 2);
    }
}
