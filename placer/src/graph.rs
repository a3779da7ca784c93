use std::collections::HashSet;
use tdp_common::db::core::NetlistDB;
use tdp_common::db::indices::PinId;

/// Pin-level signal graph: wire edges plus, for every gate, an edge from
/// each of its input pins to each of its output pins (the combinational
/// pass-through; traversing one attributes the gate's intrinsic delay).
pub struct SignalGraph {
    pub succ: Vec<Vec<PinId>>,
    /// Input pins that no wire drives; circuit boundary sources.
    pub primary_inputs: Vec<PinId>,
    /// Output pins that drive no wire; circuit boundary sinks.
    pub primary_outputs: Vec<PinId>,
}

impl SignalGraph {
    pub fn build(db: &NetlistDB) -> Self {
        let mut succ = vec![Vec::new(); db.num_pins()];

        for wire in &db.wires {
            succ[wire.src.index()].push(wire.dst);
        }

        for gate in &db.gates {
            let inputs: Vec<PinId> = gate
                .pins
                .iter()
                .copied()
                .filter(|&p| db.is_input_pin(p))
                .collect();
            let outputs: Vec<PinId> = gate
                .pins
                .iter()
                .copied()
                .filter(|&p| db.is_output_pin(p))
                .collect();
            for &input in &inputs {
                for &output in &outputs {
                    succ[input.index()].push(output);
                }
            }
        }

        let driven: HashSet<PinId> = db.wires.iter().map(|w| w.dst).collect();
        let driving: HashSet<PinId> = db.wires.iter().map(|w| w.src).collect();

        let all_pins = (0..db.num_pins()).map(PinId::new);
        let primary_inputs = all_pins
            .clone()
            .filter(|&p| db.is_input_pin(p) && !driven.contains(&p))
            .collect();
        let primary_outputs = all_pins
            .filter(|&p| db.is_output_pin(p) && !driving.contains(&p))
            .collect();

        SignalGraph {
            succ,
            primary_inputs,
            primary_outputs,
        }
    }
}
