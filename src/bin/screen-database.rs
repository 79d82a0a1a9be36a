use anyhow::Result;
use druglike::*;

fn main() -> Result<()> {
    init_logging("trace");

    let mut args = std::env::args().skip(1);
    let input_csv = args.next().unwrap_or_else(|| "molecules.csv".to_string());
    let output_csv = args
        .next()
        .unwrap_or_else(|| "screened-molecules.csv".to_string());

    screen_and_write_csv(&input_csv, &output_csv)?;

    Ok(())
}
