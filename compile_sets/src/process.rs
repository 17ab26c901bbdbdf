use crate::{config::Config, counts, location, output};

/// Strategy
///
/// Read in the location screen (if given), then read all count files
/// accumulating per location totals and the per file counts.
/// The output file is only opened once all inputs have been read
/// successfully, so a bad input leaves no partial table behind
pub fn compile_sets(cfg: &Config) -> anyhow::Result<()> {
    info!("Compiling sets of read counts");

    let screen = cfg
        .screen_file()
        .map(location::read_location_screen)
        .transpose()?;
    if screen.as_ref().is_some_and(|s| s.is_empty()) {
        warn!("Location screen has no entries; no locations will be counted");
    }

    let counts = counts::read_count_files(cfg.input_files(), screen.as_ref())?;
    debug!(
        "Read {} input files; {} distinct locations found",
        cfg.input_files().len(),
        counts.len()
    );
    if counts.is_empty() {
        warn!("No locations found to tabulate");
    }

    output::write_compiled(
        &counts,
        cfg.input_files(),
        cfg.output_file(),
        cfg.show_totals(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{fs, path::PathBuf};

    const HEADER: &str = "replicon\tposition\tstrand\treads\n";

    fn setup(dir: &std::path::Path, inputs: &[(&str, &str)]) -> Vec<PathBuf> {
        inputs
            .iter()
            .map(|(name, body)| {
                let p = dir.join(name);
                fs::write(&p, format!("{}{}", HEADER, body)).unwrap();
                p
            })
            .collect()
    }

    #[test]
    fn combine_two_files() {
        let dir = tempfile::tempdir().unwrap();
        let files = setup(
            dir.path(),
            &[
                ("file1.txt", "chr1\t100\tF\t5.0\nchr1\t300\tR\t1\n"),
                ("file2.txt", "chr1\t100\tF\t3.0\nchr2\t20\tF\t4\n"),
            ],
        );
        let out = dir.path().join("out.txt");
        let cfg = Config::new(files, out.clone());

        compile_sets(&cfg).unwrap();
        let s = fs::read_to_string(&out).unwrap();
        let lines: Vec<_> = s.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Replicon\tPosition\tDirection\tfile1.txt\tfile2.txt",
                "chr1\t100\tF\t5.0\t3.0",
                "chr2\t20\tF\t0\t4",
                "chr1\t300\tR\t1\t0",
            ]
        );
    }

    #[test]
    fn combine_with_screen_and_totals() {
        let dir = tempfile::tempdir().unwrap();
        let files = setup(
            dir.path(),
            &[
                ("a.txt", "chr1\t100\tf\t5.0\nchr1\t100\tR\t2\nchr1\t9\tF\t50\n"),
                ("b.txt", "chr1\t100\tf\t1.5\n"),
            ],
        );
        let screen = dir.path().join("screen.txt");
        fs::write(&screen, "replicon\tposition\tstrand\nchr1\t100\tR\n").unwrap();
        let out = dir.path().join("out.txt");

        let mut cfg = Config::new(files, out.clone());
        cfg.set_screen_file(&screen);
        cfg.set_show_totals();

        compile_sets(&cfg).unwrap();
        let s = fs::read_to_string(&out).unwrap();
        let lines: Vec<_> = s.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Replicon\tPosition\tDirection\ta.txt\tb.txt\tAllReads",
                "chr1\t100\tf\t5.0\t1.5\t6.5",
                "chr1\t100\tR\t2\t0\t2.0",
            ]
        );
    }

    #[test]
    fn empty_screen_gives_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let files = setup(dir.path(), &[("a.txt", "chr1\t100\tf\t5.0\n")]);
        let screen = dir.path().join("screen.txt");
        fs::write(&screen, "replicon\tposition\tstrand\n").unwrap();
        let out = dir.path().join("out.txt");

        let mut cfg = Config::new(files, out.clone());
        cfg.set_screen_file(&screen);

        compile_sets(&cfg).unwrap();
        let s = fs::read_to_string(&out).unwrap();
        assert_eq!(s, "Replicon\tPosition\tDirection\ta.txt\n");
    }

    #[test]
    fn bad_input_leaves_no_output() {
        let dir = tempfile::tempdir().unwrap();
        let files = setup(
            dir.path(),
            &[
                ("good.txt", "chr1\t100\tF\t5.0\n"),
                ("bad.txt", "chr1\t100\tF\n"),
            ],
        );
        let out = dir.path().join("out.txt");
        let cfg = Config::new(files, out.clone());

        assert!(compile_sets(&cfg).is_err());
        assert!(!out.exists());
    }

    #[test]
    fn bad_screen_leaves_no_output() {
        let dir = tempfile::tempdir().unwrap();
        let files = setup(dir.path(), &[("good.txt", "chr1\t100\tF\t5.0\n")]);
        let screen = dir.path().join("screen.txt");
        fs::write(&screen, "header\nchr1\n").unwrap();
        let out = dir.path().join("out.txt");

        let mut cfg = Config::new(files, out.clone());
        cfg.set_screen_file(&screen);

        assert!(compile_sets(&cfg).is_err());
        assert!(!out.exists());
    }
}
