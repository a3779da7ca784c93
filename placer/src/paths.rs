use std::collections::HashSet;
use tdp_common::db::core::NetlistDB;
use tdp_common::db::indices::{GateId, PinId};

use crate::graph::SignalGraph;

/// Node sequence from a repeated ancestor back around to itself.
pub type Cycle = Vec<PinId>;

/// Canonical path identity: the two endpoint nodes collapse to their gate
/// id (the boundary pin chosen there does not distinguish paths), interior
/// nodes keep their exact pin. Paths shorter than three nodes have no
/// interior and keep the full pin sequence.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum KeyPart {
    Gate(GateId),
    Pin(PinId),
}

fn canonical_key(db: &NetlistDB, path: &[PinId]) -> Vec<KeyPart> {
    if path.len() < 3 {
        return path.iter().map(|&p| KeyPart::Pin(p)).collect();
    }
    let mut key = Vec::with_capacity(path.len());
    key.push(KeyPart::Gate(db.pin_to_gate[path[0].index()]));
    for &p in &path[1..path.len() - 1] {
        key.push(KeyPart::Pin(p));
    }
    key.push(KeyPart::Gate(
        db.pin_to_gate[path[path.len() - 1].index()],
    ));
    key
}

/// One representative boundary pin per gate: the lowest-numbered primary
/// pin each gate owns. A gate with several functionally distinct boundary
/// pins therefore contributes a single search endpoint.
fn representatives(db: &NetlistDB, pins: &[PinId]) -> Vec<PinId> {
    let mut by_gate = std::collections::BTreeMap::new();
    for &pin in pins {
        by_gate.entry(db.pin_to_gate[pin.index()]).or_insert(pin);
    }
    by_gate.into_values().collect()
}

/// Enumerates every unique acyclic signal path between circuit boundary
/// pins, or reports the first structural cycle found.
///
/// Depth-first search with an explicit frame stack; each frame carries the
/// path so far and the set of nodes on the current branch. Revisiting an
/// on-branch node aborts the whole enumeration with the offending cycle.
/// Topology only; runs once per netlist.
pub fn enumerate(db: &NetlistDB, graph: &SignalGraph) -> Result<Vec<Vec<PinId>>, Cycle> {
    let sources = representatives(db, &graph.primary_inputs);
    let sinks = representatives(db, &graph.primary_outputs);

    // A netlist whose every pin is wired has no boundary pairs to search
    // from, so a pure wire loop would otherwise go unnoticed. Sweep the
    // whole graph for cycles in that case.
    if (sources.is_empty() || sinks.is_empty()) && !db.wires.is_empty() {
        for start in (0..db.num_pins()).map(PinId::new) {
            search(db, graph, start, None, &mut Vec::new(), &mut HashSet::new())?;
        }
        return Ok(Vec::new());
    }

    let mut unique = Vec::new();
    let mut seen = HashSet::new();

    for &source in &sources {
        for &sink in &sinks {
            let mut paths = Vec::new();
            search(db, graph, source, Some(sink), &mut paths, &mut seen)?;
            unique.append(&mut paths);
        }
    }

    Ok(unique)
}

struct Frame {
    node: PinId,
    path: Vec<PinId>,
    on_branch: HashSet<PinId>,
}

/// Exhaustive simple-path search from `source`. Completed paths reaching
/// `target` (canonically deduplicated against `seen`) are appended to
/// `out`; a revisit of an on-branch node returns the cycle from the
/// repeated ancestor to the point of repetition.
fn search(
    db: &NetlistDB,
    graph: &SignalGraph,
    source: PinId,
    target: Option<PinId>,
    out: &mut Vec<Vec<PinId>>,
    seen: &mut HashSet<Vec<KeyPart>>,
) -> Result<(), Cycle> {
    let mut stack = vec![Frame {
        node: source,
        path: vec![source],
        on_branch: HashSet::from([source]),
    }];

    while let Some(frame) = stack.pop() {
        if Some(frame.node) == target {
            if seen.insert(canonical_key(db, &frame.path)) {
                out.push(frame.path);
            }
            continue;
        }

        for &next in graph.succ[frame.node.index()].iter().rev() {
            if frame.on_branch.contains(&next) {
                let at = frame
                    .path
                    .iter()
                    .position(|&n| n == next)
                    .unwrap_or(0);
                return Err(frame.path[at..].to_vec());
            }
            let mut path = frame.path.clone();
            path.push(next);
            let mut on_branch = frame.on_branch.clone();
            on_branch.insert(next);
            stack.push(Frame {
                node: next,
                path,
                on_branch,
            });
        }
    }

    Ok(())
}

/// `g1.p2 -> g2.p1 -> ...` rendering for cycle diagnostics.
pub fn format_cycle(db: &NetlistDB, cycle: &[PinId]) -> String {
    cycle
        .iter()
        .map(|&p| db.pin_label(p))
        .collect::<Vec<_>>()
        .join(" -> ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tdp_common::db::core::Wire;
    use tdp_common::geom::point::Point;

    fn gate_with_io(db: &mut NetlistDB, name: &str) -> (PinId, PinId) {
        let g = db.add_gate(name.to_string(), 4, 2, 1);
        let input = db.add_pin(g, Point::new(0, 1));
        let output = db.add_pin(g, Point::new(4, 1));
        (input, output)
    }

    #[test]
    fn chain_yields_single_path() {
        let mut db = NetlistDB::new();
        let (g1_in, g1_out) = gate_with_io(&mut db, "g1");
        let (g2_in, g2_out) = gate_with_io(&mut db, "g2");
        db.wires.push(Wire {
            src: g1_out,
            dst: g2_in,
        });

        let graph = SignalGraph::build(&db);
        let paths = enumerate(&db, &graph).unwrap();

        assert_eq!(paths, vec![vec![g1_in, g1_out, g2_in, g2_out]]);
    }

    #[test]
    fn wire_loop_reports_cycle() {
        let mut db = NetlistDB::new();
        let (a_in, a_out) = gate_with_io(&mut db, "gA");
        let (b_in, b_out) = gate_with_io(&mut db, "gB");
        db.wires.push(Wire {
            src: a_out,
            dst: b_in,
        });
        db.wires.push(Wire {
            src: b_out,
            dst: a_in,
        });

        let graph = SignalGraph::build(&db);
        let err = enumerate(&db, &graph).unwrap_err();

        assert!(!err.is_empty());
        // The cycle revisits its first node via the loop.
        let labels = format_cycle(&db, &err);
        assert!(labels.contains(" -> "));
    }

    #[test]
    fn reachable_cycle_aborts_pair_search() {
        // gA has a spare primary input and output; the wired pins form a
        // loop through gB that the search walks into.
        let mut db = NetlistDB::new();
        let ga = db.add_gate("gA".to_string(), 4, 4, 1);
        let a_in1 = db.add_pin(ga, Point::new(0, 1));
        let a_in2 = db.add_pin(ga, Point::new(0, 3));
        let a_out1 = db.add_pin(ga, Point::new(4, 1));
        let a_out2 = db.add_pin(ga, Point::new(4, 3));
        let (b_in, b_out) = gate_with_io(&mut db, "gB");
        let _ = (a_in1, a_out2);

        db.wires.push(Wire {
            src: a_out1,
            dst: b_in,
        });
        db.wires.push(Wire {
            src: b_out,
            dst: a_in2,
        });

        let graph = SignalGraph::build(&db);
        assert!(enumerate(&db, &graph).is_err());
    }

    #[test]
    fn endpoint_pin_variants_collapse() {
        // Paths differing only in an endpoint pin share one canonical key;
        // a differing interior pin does not.
        let mut db = NetlistDB::new();
        let (g1_in, g1_out) = gate_with_io(&mut db, "g1");
        let g2 = db.add_gate("g2".to_string(), 4, 4, 1);
        let g2_in = db.add_pin(g2, Point::new(0, 1));
        let g2_out_a = db.add_pin(g2, Point::new(4, 1));
        let g2_out_b = db.add_pin(g2, Point::new(4, 3));
        db.wires.push(Wire {
            src: g1_out,
            dst: g2_in,
        });

        let via_a = vec![g1_in, g1_out, g2_in, g2_out_a];
        let via_b = vec![g1_in, g1_out, g2_in, g2_out_b];
        assert_eq!(canonical_key(&db, &via_a), canonical_key(&db, &via_b));

        let other_interior = vec![g1_in, g1_out, g2_out_a, g2_out_b];
        assert_ne!(canonical_key(&db, &via_a), canonical_key(&db, &other_interior));

        // With one representative sink per gate the enumeration itself
        // also yields exactly one entry.
        let graph = SignalGraph::build(&db);
        assert_eq!(graph.primary_outputs.len(), 2);
        let paths = enumerate(&db, &graph).unwrap();
        assert_eq!(paths.len(), 1);
    }

    #[test]
    fn disconnected_gates_yield_no_paths() {
        let mut db = NetlistDB::new();
        gate_with_io(&mut db, "g1");
        gate_with_io(&mut db, "g2");

        let graph = SignalGraph::build(&db);
        let paths = enumerate(&db, &graph).unwrap();

        // Each gate is its own source and sink; only same-gate pairs
        // connect, via the intra-gate hop.
        assert_eq!(paths.len(), 2);
    }
}
