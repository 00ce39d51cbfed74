//! Export helpers for solver traces and JSON dumps.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use orbital_solver::Step;
use serde::Serialize;

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

/// One line per step, in the order the values were obtained.
pub fn write_trace(writer: &mut dyn Write, trace: &[Step]) -> io::Result<()> {
    for step in trace {
        writeln!(writer, "{step}")?;
    }
    Ok(())
}

/// Pretty-printed JSON followed by a newline.
pub fn write_json<T: Serialize + ?Sized>(writer: &mut dyn Write, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)
}

/// The trace, then `Raw data:` and the JSON dump of the resolved value.
pub fn write_report<T: Serialize + ?Sized>(
    writer: &mut dyn Write,
    trace: &[Step],
    value: &T,
) -> io::Result<()> {
    write_trace(writer, trace)?;
    writeln!(writer)?;
    writeln!(writer, "Raw data:")?;
    write_json(writer, value)?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use orbital_core::Quantity;
    use rust_decimal_macros::dec;

    fn trace() -> Vec<Step> {
        vec![
            Step::Given {
                param: "ra",
                value: Quantity::new(dec!(42164), "km"),
            },
            Step::Derived {
                param: "a",
                via: "a = (ra + rp) / 2",
                inputs: vec![
                    ("ra", Quantity::new(dec!(42164), "km")),
                    ("rp", Quantity::new(dec!(6578), "km")),
                ],
                value: Quantity::new(dec!(24371), "km"),
            },
        ]
    }

    #[test]
    fn report_lists_steps_then_json() {
        let mut out = Vec::new();
        write_report(&mut out, &trace(), &serde_json::json!({ "a": "24371" })).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("[ra] given as 42164.000 km"));
        assert_eq!(
            lines.next(),
            Some("[a] = 24371.000 km via a = (ra + rp) / 2 from {ra = 42164.000 km, rp = 6578.000 km}")
        );
        assert!(text.contains("Raw data:\n{\n  \"a\": \"24371\"\n}\n"));
    }

    #[test]
    fn writer_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out.json");
        {
            let mut writer = writer_for_path(&path).unwrap();
            write_json(&mut *writer, &trace()).unwrap();
        }
        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written[1]["kind"], "derived");
        assert_eq!(written[1]["value"]["unit"], "km");
    }
}
