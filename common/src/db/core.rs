use crate::db::indices::*;
use crate::geom::point::Point;
use std::collections::HashMap;

#[derive(Clone, Debug)]
pub struct GateData {
    pub name: String,
    pub width: i64,
    pub height: i64,
    pub delay: i64,
    pub pins: Vec<PinId>,
}

/// Directed connection between two pins, fixed for the whole run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Wire {
    pub src: PinId,
    pub dst: PinId,
}

/// Gate-level netlist database.
///
/// Gate geometry and connectivity are immutable once parsing finishes;
/// candidate placements live outside the database as `Vec<Point<i64>>`
/// indexed by gate, so concurrent optimizer replicas can share one
/// database without synchronization.
pub struct NetlistDB {
    pub gates: Vec<GateData>,

    pub pin_offsets: Vec<Point<i64>>,
    pub pin_to_gate: Vec<GateId>,

    pub wires: Vec<Wire>,
    pub wire_delay: i64,

    pub gate_name_map: HashMap<String, GateId>,
}

impl NetlistDB {
    pub fn new() -> Self {
        Self {
            gates: Vec::new(),
            pin_offsets: Vec::new(),
            pin_to_gate: Vec::new(),
            wires: Vec::new(),
            wire_delay: 0,
            gate_name_map: HashMap::new(),
        }
    }

    pub fn num_gates(&self) -> usize {
        self.gates.len()
    }
    pub fn num_pins(&self) -> usize {
        self.pin_offsets.len()
    }

    pub fn add_gate(&mut self, name: String, width: i64, height: i64, delay: i64) -> GateId {
        let id = GateId::new(self.gates.len());
        self.gates.push(GateData {
            name: name.clone(),
            width,
            height,
            delay,
            pins: Vec::new(),
        });
        self.gate_name_map.insert(name, id);
        id
    }

    pub fn add_pin(&mut self, gate: GateId, offset: Point<i64>) -> PinId {
        let pid = PinId::new(self.pin_offsets.len());
        self.pin_offsets.push(offset);
        self.pin_to_gate.push(gate);
        self.gates[gate.index()].pins.push(pid);
        pid
    }

    /// Absolute pin coordinate under the given gate origin.
    #[inline]
    pub fn pin_position(&self, pin: PinId, gate_origin: Point<i64>) -> Point<i64> {
        gate_origin + self.pin_offsets[pin.index()]
    }

    /// Input pins sit on the gate's left edge.
    #[inline]
    pub fn is_input_pin(&self, pin: PinId) -> bool {
        self.pin_offsets[pin.index()].x == 0
    }

    /// Output pins sit on the gate's right edge.
    #[inline]
    pub fn is_output_pin(&self, pin: PinId) -> bool {
        let gate = &self.gates[self.pin_to_gate[pin.index()].index()];
        self.pin_offsets[pin.index()].x == gate.width
    }

    /// 1-based pin number within the owning gate, as used by the text format.
    pub fn pin_number(&self, pin: PinId) -> usize {
        let gate = &self.gates[self.pin_to_gate[pin.index()].index()];
        gate.pins.iter().position(|&p| p == pin).unwrap_or(0) + 1
    }

    /// `gate.pN` label for reports and cycle diagnostics.
    pub fn pin_label(&self, pin: PinId) -> String {
        let gate = &self.gates[self.pin_to_gate[pin.index()].index()];
        format!("{}.p{}", gate.name, self.pin_number(pin))
    }

    /// Resolves `<gate>.p<N>` (1-indexed) to a pin id.
    pub fn lookup_pin(&self, gate_name: &str, pin_number: usize) -> Option<PinId> {
        let &gate = self.gate_name_map.get(gate_name)?;
        self.gates[gate.index()].pins.get(pin_number.checked_sub(1)?).copied()
    }
}

impl Default for NetlistDB {
    fn default() -> Self {
        Self::new()
    }
}
