use crate::db::core::{NetlistDB, Wire};
use crate::geom::point::Point;
use anyhow::{Context, Result, bail};
use std::fs::File;
use std::io::{BufRead, BufReader};

/// Parses the line-oriented gate netlist format:
///
/// ```text
/// g1 4 2 1
/// pins 2 0 1 4 1
/// wire_delay 1
/// wire g1.p2 g2.p1
/// ```
///
/// A `pins` line attaches to the most recent gate declaration. Pin numbers
/// in wire declarations are 1-indexed.
pub fn parse(db: &mut NetlistDB, filename: &str) -> Result<()> {
    let file =
        File::open(filename).context(format!("Failed to open netlist file: {}", filename))?;
    let reader = BufReader::new(file);

    let mut current_gate = None;

    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();

        if line.starts_with("pins") {
            let gate = current_gate
                .with_context(|| format!("line {}: pins before any gate", lineno + 1))?;
            let coords = parts.get(2..).unwrap_or(&[]);
            if coords.len() % 2 != 0 {
                bail!("line {}: odd number of pin coordinates", lineno + 1);
            }
            for pair in coords.chunks(2) {
                let x: i64 = pair[0]
                    .parse()
                    .with_context(|| format!("line {}: bad pin x", lineno + 1))?;
                let y: i64 = pair[1]
                    .parse()
                    .with_context(|| format!("line {}: bad pin y", lineno + 1))?;
                db.add_pin(gate, Point::new(x, y));
            }
        } else if line.starts_with("wire_delay") {
            db.wire_delay = parts
                .get(1)
                .and_then(|v| v.parse().ok())
                .with_context(|| format!("line {}: bad wire_delay", lineno + 1))?;
        } else if line.starts_with("wire") {
            if parts.len() < 3 {
                bail!("line {}: wire needs two endpoints", lineno + 1);
            }
            let src = parse_endpoint(db, parts[1])
                .with_context(|| format!("line {}: bad wire source '{}'", lineno + 1, parts[1]))?;
            let dst = parse_endpoint(db, parts[2]).with_context(|| {
                format!("line {}: bad wire destination '{}'", lineno + 1, parts[2])
            })?;
            db.wires.push(Wire { src, dst });
        } else if line.starts_with('g') {
            if parts.len() < 4 {
                bail!("line {}: gate needs width, height and delay", lineno + 1);
            }
            let name = parts[0].to_string();
            let width: i64 = parts[1]
                .parse()
                .with_context(|| format!("line {}: bad gate width", lineno + 1))?;
            let height: i64 = parts[2]
                .parse()
                .with_context(|| format!("line {}: bad gate height", lineno + 1))?;
            let delay: i64 = parts[3]
                .parse()
                .with_context(|| format!("line {}: bad gate delay", lineno + 1))?;
            current_gate = Some(db.add_gate(name, width, height, delay));
        } else {
            log::warn!("Netlist: skipping unrecognized line {}: '{}'", lineno + 1, line);
        }
    }

    log::info!(
        "Parsed netlist: {} gates, {} pins, {} wires, wire_delay {}",
        db.num_gates(),
        db.num_pins(),
        db.wires.len(),
        db.wire_delay
    );
    Ok(())
}

/// `<gate>.p<N>` -> pin id.
fn parse_endpoint(db: &NetlistDB, token: &str) -> Result<crate::db::indices::PinId> {
    let (gate_name, pin_part) = token
        .split_once('.')
        .context("endpoint must be <gate>.p<N>")?;
    let number: usize = pin_part
        .strip_prefix('p')
        .context("pin reference must start with 'p'")?
        .parse()
        .context("pin number is not an integer")?;
    db.lookup_pin(gate_name, number)
        .with_context(|| format!("unknown pin {}.p{}", gate_name, number))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse_str(text: &str) -> Result<NetlistDB> {
        let tmp = tempfile_path();
        {
            let mut f = File::create(&tmp).unwrap();
            f.write_all(text.as_bytes()).unwrap();
        }
        let mut db = NetlistDB::new();
        let res = parse(&mut db, tmp.to_str().unwrap());
        let _ = std::fs::remove_file(&tmp);
        res.map(|_| db)
    }

    fn tempfile_path() -> std::path::PathBuf {
        let mut p = std::env::temp_dir();
        let unique = format!(
            "tdp_netlist_{}_{:?}.txt",
            std::process::id(),
            std::thread::current().id()
        );
        p.push(unique);
        p
    }

    #[test]
    fn parses_gates_pins_and_wires() {
        let db = parse_str(
            "g1 4 2 1\n\
             pins 2 0 1 4 1\n\
             g2 4 2 1\n\
             pins 2 0 1 4 1\n\
             wire_delay 1\n\
             wire g1.p2 g2.p1\n",
        )
        .unwrap();

        assert_eq!(db.num_gates(), 2);
        assert_eq!(db.num_pins(), 4);
        assert_eq!(db.wire_delay, 1);
        assert_eq!(db.wires.len(), 1);
        assert_eq!(db.pin_label(db.wires[0].src), "g1.p2");
        assert_eq!(db.pin_label(db.wires[0].dst), "g2.p1");
    }

    #[test]
    fn rejects_wire_to_unknown_pin() {
        let res = parse_str(
            "g1 4 2 1\n\
             pins 2 0 1 4 1\n\
             wire g1.p2 g9.p1\n",
        );
        assert!(res.is_err());
    }
}
