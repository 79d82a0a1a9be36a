use std::fs::File;
use std::io::Read;

use anyhow::{Context, Result};
use druglike::*;

/// Reads a descriptor JSON object (from a file argument or stdin), runs the
/// rule checks, and prints the report cards. With --json the structured
/// report is printed instead of the rendered text.
fn main() -> Result<()> {
    init_logging("info");

    let mut json_output = false;
    let mut path: Option<String> = None;
    for arg in std::env::args().skip(1) {
        if arg == "--json" {
            json_output = true;
        } else {
            path = Some(arg);
        }
    }

    let mut payload = String::new();
    match &path {
        Some(path) => {
            File::open(path)
                .with_context(|| format!("Failed to open {path}"))?
                .read_to_string(&mut payload)?;
        }
        None => {
            std::io::stdin().read_to_string(&mut payload)?;
        }
    }

    let descriptors = DescriptorSet::from_json(&payload)?;
    let report = evaluate(&descriptors);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_report(&report));
    }
    Ok(())
}
