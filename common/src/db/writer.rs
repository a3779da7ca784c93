use crate::db::core::NetlistDB;
use crate::db::indices::PinId;
use crate::geom::point::Point;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;

/// Writes the placement report: tight bounding box after shifting the
/// placement to the origin, the critical path and its delay, then one line
/// per gate sorted by name. Reported y uses a bottom-left origin, so
/// `y_reported = box_height - y - gate_height`.
pub fn write_placement(
    db: &NetlistDB,
    positions: &[Point<i64>],
    critical_path: &[PinId],
    critical_delay: i64,
    filename: &str,
) -> Result<()> {
    let min_x = positions.iter().map(|p| p.x).min().unwrap_or(0);
    let min_y = positions.iter().map(|p| p.y).min().unwrap_or(0);

    let shifted: Vec<Point<i64>> = positions
        .iter()
        .map(|p| Point::new(p.x - min_x, p.y - min_y))
        .collect();

    let max_x = db
        .gates
        .iter()
        .zip(&shifted)
        .map(|(g, p)| p.x + g.width)
        .max()
        .unwrap_or(0);
    let max_y = db
        .gates
        .iter()
        .zip(&shifted)
        .map(|(g, p)| p.y + g.height)
        .max()
        .unwrap_or(0);

    let mut file =
        File::create(filename).context(format!("Failed to create output file: {}", filename))?;

    writeln!(file, "bounding_box {} {}", max_x, max_y)?;

    let labels: Vec<String> = critical_path.iter().map(|&p| db.pin_label(p)).collect();
    writeln!(file, "critical_path {}", labels.join(" "))?;
    writeln!(file, "critical_path_delay {}", critical_delay)?;

    let mut order: Vec<usize> = (0..db.num_gates()).collect();
    order.sort_by(|&a, &b| db.gates[a].name.cmp(&db.gates[b].name));

    for i in order {
        let gate = &db.gates[i];
        let pos = shifted[i];
        writeln!(
            file,
            "{} {} {}",
            gate.name,
            pos.x,
            max_y - pos.y - gate.height
        )?;
    }

    log::info!("Wrote placement to {}", filename);
    Ok(())
}

/// Writes the error record for a structurally cyclic netlist.
pub fn write_cycle(cycle_text: &str, filename: &str) -> Result<()> {
    let mut file =
        File::create(filename).context(format!("Failed to create output file: {}", filename))?;
    writeln!(file, "Error: Circuit contains a cyclic path")?;
    writeln!(file, "Cycle: {}", cycle_text)?;
    Ok(())
}
