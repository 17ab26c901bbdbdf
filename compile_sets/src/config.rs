use std::path::{Path, PathBuf};

/// Config
///
/// Configuration info for the program
/// This is generated from the command line arguments
/// Once set it is read only
///
/// input_files - count files to be combined, in output column order
/// screen_file - optional list of locations to be counted
/// output_file - path of combined table
/// show_totals - add a column with the sum of counts over all input files
///
pub struct Config {
    input_files: Vec<PathBuf>,
    screen_file: Option<PathBuf>,
    output_file: PathBuf,
    show_totals: bool,
}

impl Config {
    pub fn new(input_files: Vec<PathBuf>, output_file: PathBuf) -> Self {
        Self {
            input_files,
            screen_file: None,
            output_file,
            show_totals: false,
        }
    }

    pub fn set_screen_file<P: AsRef<Path>>(&mut self, p: P) {
        self.screen_file = Some(p.as_ref().to_owned())
    }

    pub fn set_show_totals(&mut self) {
        self.show_totals = true
    }

    pub fn input_files(&self) -> &[PathBuf] {
        &self.input_files
    }

    pub fn screen_file(&self) -> Option<&Path> {
        self.screen_file.as_deref()
    }

    pub fn output_file(&self) -> &Path {
        &self.output_file
    }

    pub fn show_totals(&self) -> bool {
        self.show_totals
    }
}
