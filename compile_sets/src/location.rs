use std::{collections::HashSet, path::Path};

use anyhow::Context;
use compress_io::compress::CompressIo;
use utils::{get_next_line, skip_header};

use crate::error::ParseError;

/// Insertion location
///
/// Position is kept as the string found in the input so that it is
/// output unchanged
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    replicon: String,
    position: String,
    strand: String,
}

impl Location {
    pub fn new<S: Into<String>, T: Into<String>, U: Into<String>>(
        replicon: S,
        position: T,
        strand: U,
    ) -> Self {
        Self {
            replicon: replicon.into(),
            position: position.into(),
            strand: strand.into(),
        }
    }

    pub fn replicon(&self) -> &str {
        &self.replicon
    }

    pub fn position(&self) -> &str {
        &self.position
    }

    pub fn strand(&self) -> &str {
        &self.strand
    }
}

/// Strand used when checking a count file entry against the screen.
///
/// Lower case strands come from a pipeline with the opposite orientation
/// convention to the screen, so 'f' is checked as 'R' and 'r' as 'F'.
/// Anything else is checked as is.
pub fn screen_strand(strand: &str) -> &str {
    match strand {
        "f" => "R",
        "r" => "F",
        s => s,
    }
}

/// Set of locations that should be counted
#[derive(Debug, Default)]
pub struct LocationScreen {
    locs: HashSet<Location>,
}

impl LocationScreen {
    pub fn len(&self) -> usize {
        self.locs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locs.is_empty()
    }

    /// Literal membership test (no strand conversion)
    pub fn contains(&self, loc: &Location) -> bool {
        self.locs.contains(loc)
    }

    /// Check whether an entry from a count file passes the screen
    pub fn accepts(&self, replicon: &str, position: &str, strand: &str) -> bool {
        self.contains(&Location::new(replicon, position, screen_strand(strand)))
    }
}

impl FromIterator<Location> for LocationScreen {
    fn from_iter<I: IntoIterator<Item = Location>>(iter: I) -> Self {
        Self {
            locs: iter.into_iter().collect(),
        }
    }
}

/// Read in location screen file
///
/// File has a header line followed by lines with at least 3 tab separated
/// columns (replicon, position, strand).  Additional columns are ignored.
pub fn read_location_screen<P: AsRef<Path>>(fname: P) -> anyhow::Result<LocationScreen> {
    let fname = fname.as_ref();
    debug!("Reading in location screen from {}", fname.display());

    let mut rdr = CompressIo::new()
        .path(fname)
        .bufreader()
        .with_context(|| format!("Could not open location screen {}", fname.display()))?;

    let mut buf = String::new();
    let mut screen = LocationScreen::default();
    if !skip_header(&mut rdr, &mut buf)
        .with_context(|| format!("Error reading from {}", fname.display()))?
    {
        warn!("Location screen {} is empty", fname.display());
        return Ok(screen);
    }

    let mut line = 1;
    while let Some(fields) = get_next_line(&mut rdr, &mut buf).with_context(|| {
        format!(
            "Error after reading {} lines from {}",
            line,
            fname.display()
        )
    })? {
        line += 1;
        if fields.len() < 3 {
            return Err(ParseError::TooFewFields {
                path: fname.to_owned(),
                line,
                found: fields.len(),
            }
            .into());
        }
        screen
            .locs
            .insert(Location::new(fields[0], fields[1], fields[2]));
    }

    info!(
        "Read {} locations to be counted from {}",
        screen.len(),
        fname.display()
    );
    Ok(screen)
}
