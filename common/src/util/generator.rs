use rand::Rng;
use std::fs::File;
use std::io::Write;

/// Generates a random acyclic benchmark netlist in the gate text format.
///
/// Wires only run from lower-index gate outputs to higher-index gate inputs,
/// so the result is always a DAG and exercises the full placement flow.
pub fn generate_random_netlist(
    filename: &str,
    num_gates: usize,
    num_wires: usize,
    wire_delay: i64,
) -> std::io::Result<()> {
    let mut file = File::create(filename)?;
    let mut rng = rand::thread_rng();

    log::info!(
        "Generating benchmark: {} gates, {} wires, wire_delay {}",
        num_gates,
        num_wires,
        wire_delay
    );

    // Every gate gets one input pin and one output pin on opposite edges.
    for i in 0..num_gates {
        let width = rng.gen_range(2..=8) * 2;
        let height = rng.gen_range(1..=4) * 2;
        let delay = rng.gen_range(1..=5);
        writeln!(file, "g{} {} {} {}", i + 1, width, height, delay)?;
        writeln!(file, "pins 2 0 {} {} {}", height / 2, width, height / 2)?;
    }

    writeln!(file, "wire_delay {}", wire_delay)?;

    if num_gates >= 2 {
        let mut emitted = std::collections::HashSet::new();
        let mut written = 0;
        let mut attempts = 0;
        while written < num_wires && attempts < num_wires * 20 {
            attempts += 1;
            let src = rng.gen_range(0..num_gates - 1);
            let dst = rng.gen_range(src + 1..num_gates);
            if !emitted.insert((src, dst)) {
                continue;
            }
            writeln!(file, "wire g{}.p2 g{}.p1", src + 1, dst + 1)?;
            written += 1;
        }
        if written < num_wires {
            log::warn!(
                "Generator: only {} of {} requested wires fit without duplicates",
                written,
                num_wires
            );
        }
    }

    Ok(())
}
