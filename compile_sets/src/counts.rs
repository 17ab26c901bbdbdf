use std::{collections::HashMap, path::Path};

use anyhow::Context;
use compress_io::compress::CompressIo;
use indexmap::IndexMap;
use utils::{get_next_line, skip_header};

use crate::{
    error::ParseError,
    location::{Location, LocationScreen},
};

/// ReadCounts
///
/// Combined counts from all input files.
///
/// totals - sum of counts over all files for each location, kept in the
///          order that locations were first seen
/// file_counts - count string as found in the input, indexed by
///               (file index, location index in totals)
///
#[derive(Debug, Default)]
pub struct ReadCounts {
    totals: IndexMap<Location, f64>,
    file_counts: HashMap<(usize, usize), String>,
}

impl ReadCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add count for location from file with index file_ix.
    /// If a location is seen more than once in the same file, the last
    /// count string is kept for that file but all counts go to the total
    pub fn add(&mut self, file_ix: usize, loc: Location, raw: &str, count: f64) {
        let entry = self.totals.entry(loc);
        let loc_ix = entry.index();
        *entry.or_insert(0.0) += count;
        self.file_counts.insert((file_ix, loc_ix), raw.to_owned());
    }

    /// Number of distinct locations
    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    pub fn file_count_at(&self, file_ix: usize, loc_ix: usize) -> Option<&str> {
        self.file_counts.get(&(file_ix, loc_ix)).map(|s| s.as_str())
    }

    /// Locations sorted on decreasing total.  Ties keep the order in which
    /// the locations were first seen.  Uses the IEEE total order, so a NaN
    /// total sorts before +inf (and -NaN after -inf).
    /// Returns (location index, location, total)
    pub fn sorted(&self) -> Vec<(usize, &Location, f64)> {
        let mut v: Vec<_> = self
            .totals
            .iter()
            .enumerate()
            .map(|(ix, (loc, t))| (ix, loc, *t))
            .collect();
        v.sort_by(|a, b| b.2.total_cmp(&a.2));
        v
    }
}

/// Read in all count files in order, returning the combined counts.
/// Only locations passing the screen (if present) are counted
pub fn read_count_files<P: AsRef<Path>>(
    files: &[P],
    screen: Option<&LocationScreen>,
) -> anyhow::Result<ReadCounts> {
    let mut counts = ReadCounts::new();
    for (ix, p) in files.iter().enumerate() {
        read_count_file(&mut counts, ix, p.as_ref(), screen)?
    }
    Ok(counts)
}

/// Read a single count file, adding entries to counts.
///
/// Input has a header line followed by lines with exactly 4 tab separated
/// columns (replicon, position, strand, read count)
fn read_count_file(
    counts: &mut ReadCounts,
    file_ix: usize,
    p: &Path,
    screen: Option<&LocationScreen>,
) -> anyhow::Result<()> {
    info!("Reading file {}", p.display());
    let mut rdr = CompressIo::new()
        .path(p)
        .bufreader()
        .with_context(|| format!("Could not open count file {}", p.display()))?;

    let mut buf = String::new();
    if !skip_header(&mut rdr, &mut buf)
        .with_context(|| format!("Error reading from {}", p.display()))?
    {
        warn!("Count file {} is empty", p.display());
        return Ok(());
    }

    let mut line = 1;
    let (mut n_used, mut n_skipped) = (0, 0);
    while let Some(fields) = get_next_line(&mut rdr, &mut buf)
        .with_context(|| format!("Error after reading {} lines from {}", line, p.display()))?
    {
        line += 1;
        if fields.len() != 4 {
            return Err(ParseError::FieldCount {
                path: p.to_owned(),
                line,
                found: fields.len(),
            }
            .into());
        }
        let (replicon, position, strand, raw) = (fields[0], fields[1], fields[2], fields[3]);
        let count = raw.trim().parse::<f64>().map_err(|source| ParseError::ReadCount {
            path: p.to_owned(),
            line,
            value: raw.to_owned(),
            source,
        })?;

        if let Some(s) = screen {
            if !s.accepts(replicon, position, strand) {
                n_skipped += 1;
                continue;
            }
        }
        counts.add(file_ix, Location::new(replicon, position, strand), raw, count);
        n_used += 1;
    }

    debug!(
        "Finished reading {}: {} entries counted, {} screened out",
        p.display(),
        n_used,
        n_skipped
    );
    Ok(())
}

#[cfg(test)]
impl ReadCounts {
    fn total(&self, loc: &Location) -> Option<f64> {
        self.totals.get(loc).copied()
    }

    fn file_count(&self, file_ix: usize, loc: &Location) -> Option<&str> {
        self.totals
            .get_index_of(loc)
            .and_then(|loc_ix| self.file_count_at(file_ix, loc_ix))
    }
}
