use std::{
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::Context;
use compress_io::compress::CompressIo;

use crate::counts::ReadCounts;

/// Column name for an input file (the file name without directories)
fn column_name(p: &Path) -> String {
    p.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| p.display().to_string())
}

/// Format a total count the way the original tabulation did: decimal
/// point kept for whole numbers, exponent with sign and at least two digits
/// outside [1e-4, 1e16), lower case nan.
fn format_total(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_owned();
    }
    // Debug switches to exponent notation at the same thresholds
    let s = format!("{:?}", x);
    match s.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(d) => ('-', d),
                None => ('+', exp),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => s,
    }
}

/// Write the combined table to wrt.
///
/// One row per location, sorted on decreasing total, with one column per
/// input file holding the count as found in that file (0 if missing).
/// Returns the number of locations written
pub fn write_table<W: Write>(
    wrt: &mut W,
    counts: &ReadCounts,
    input_files: &[PathBuf],
    show_totals: bool,
) -> anyhow::Result<usize> {
    write!(wrt, "Replicon\tPosition\tDirection")?;
    for p in input_files {
        write!(wrt, "\t{}", column_name(p))?
    }
    if show_totals {
        write!(wrt, "\tAllReads")?
    }
    writeln!(wrt)?;

    let sorted = counts.sorted();
    for (loc_ix, loc, total) in sorted.iter() {
        write!(
            wrt,
            "{}\t{}\t{}",
            loc.replicon(),
            loc.position(),
            loc.strand()
        )?;
        for file_ix in 0..input_files.len() {
            write!(
                wrt,
                "\t{}",
                counts.file_count_at(file_ix, *loc_ix).unwrap_or("0")
            )?
        }
        if show_totals {
            write!(wrt, "\t{}", format_total(*total))?
        }
        writeln!(wrt)?
    }
    Ok(sorted.len())
}

/// Write combined table to output file
pub fn write_compiled(
    counts: &ReadCounts,
    input_files: &[PathBuf],
    out_path: &Path,
    show_totals: bool,
) -> anyhow::Result<()> {
    debug!("Opening output file {}", out_path.display());
    let mut wrt = CompressIo::new()
        .path(out_path)
        .bufwriter()
        .with_context(|| format!("Failed to open output file {}", out_path.display()))?;

    let n = write_table(&mut wrt, counts, input_files, show_totals)
        .with_context(|| format!("Error writing combined counts to {}", out_path.display()))?;
    wrt.flush()
        .with_context(|| format!("Error writing combined counts to {}", out_path.display()))?;

    info!("Total positions tabulated: {}", n);
    Ok(())
}
