use std::fs::File;
use std::io::Read;

use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord, Writer};
use tracing::{info, warn};

use crate::{evaluate, Descriptor, DescriptorSet, RuleReport, DESCRIPTORS, FAMILIES};

/// One screened compound: name, resolved descriptors, and the rule report.
pub type ScreenedRecord = (String, DescriptorSet, RuleReport);

/// Maps each CSV column to the descriptor its header resolves to, using the
/// same alias tables as the JSON payload path. Column 0 holds the compound
/// name (or notation) and is never mapped; unrecognized columns are ignored
/// with a warning.
fn resolve_columns(headers: &StringRecord) -> Vec<Option<Descriptor>> {
    let mut columns = Vec::new();
    for (index, header) in headers.iter().enumerate() {
        if index == 0 {
            columns.push(None);
            continue;
        }
        let name = header.trim();
        let descriptor = DESCRIPTORS.iter().copied().find(|d| d.matches_key(name));
        if descriptor.is_none() {
            warn!("Ignoring unrecognized descriptor column '{}'", name);
        }
        columns.push(descriptor);
    }
    columns
}

/// Screens an in-memory descriptor table.
///
/// The first column names the compound; the remaining columns are matched to
/// descriptors by their header. Missing cells default to 0. Records with an
/// empty name or a non-numeric cell are skipped with a warning so one bad
/// row cannot sink a whole library.
pub fn screen_csv_data(csv_data: &str) -> Result<Vec<ScreenedRecord>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_reader(csv_data.as_bytes());
    let headers = rdr.headers().context("Failed to read CSV header")?.clone();
    let columns = resolve_columns(&headers);

    let mut screened = Vec::new();
    'records: for result in rdr.records() {
        let record: StringRecord = result.context("Error reading record")?;
        let name = record.get(0).unwrap_or("").trim().to_string();
        if name.is_empty() {
            warn!("Skipping record with no compound name: {:?}", record);
            continue;
        }

        let mut descriptors = DescriptorSet::default();
        for (index, descriptor) in columns.iter().enumerate() {
            let descriptor = match descriptor {
                Some(descriptor) => *descriptor,
                None => continue,
            };
            let raw = record.get(index).unwrap_or("").trim();
            if raw.is_empty() {
                continue;
            }
            match raw.parse::<f64>() {
                Ok(value) => descriptors.set(descriptor, value),
                Err(_) => {
                    warn!(
                        "Skipping '{}': column '{}' is not numeric: '{}'",
                        name,
                        headers.get(index).unwrap_or(""),
                        raw
                    );
                    continue 'records;
                }
            }
        }

        let report = evaluate(&descriptors);
        screened.push((name, descriptors, report));
    }
    Ok(screened)
}

/// Screens a descriptor CSV file and writes the results CSV.
///
/// The output has one row per compound: "pass" or the failed finding
/// messages for each family, then the total violation count.
pub fn screen_and_write_csv(input_csv: &str, output_csv: &str) -> Result<()> {
    let mut csv_data = String::new();
    File::open(input_csv)
        .with_context(|| format!("Failed to open {input_csv}"))?
        .read_to_string(&mut csv_data)?;

    let screened = screen_csv_data(&csv_data)?;

    let file = File::create(output_csv)
        .with_context(|| format!("Failed to create {output_csv}"))?;
    let mut wtr = Writer::from_writer(file);
    wtr.write_record(["Name", "Lipinski", "Veber", "Ghose", "Egan", "Violations"])?;
    for (name, _descriptors, report) in &screened {
        let mut row = vec![name.clone()];
        for family in FAMILIES {
            let failed = report.failed(family);
            if failed.is_empty() {
                row.push("pass".to_string());
            } else {
                row.push(failed.join("; "));
            }
        }
        row.push(report.violations().to_string());
        wtr.write_record(&row)?;
    }
    // Ensure all data is flushed to disk.
    wtr.flush()?;
    info!(
        "Screened {} compounds from {} into {}",
        screened.len(),
        input_csv,
        output_csv
    );
    Ok(())
}
