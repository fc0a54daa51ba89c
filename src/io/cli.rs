//! Command-line interface for filling text tile grids

use crate::algorithm::forest::{ForestConfig, ForestFiller};
use crate::algorithm::rough::RoughFill;
use crate::io::configuration::OUTPUT_SUFFIX;
use crate::io::error::{Result, file_system_error, invalid_parameter};
use crate::io::progress::ProgressManager;
use crate::io::text::{read_grid, write_grid};
use crate::spatial::grid::TileGrid;
use crate::spatial::tiles::TileFamily;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Extension of grid files picked up from a directory target
pub const GRID_EXTENSION: &str = "txt";

#[derive(Parser, Debug)]
#[command(name = "tilefill")]
#[command(
    author,
    version,
    about = "Fill placeholder cells of golf course tile grids"
)]
/// Command-line arguments for the fill tool
pub struct Cli {
    /// Fill to run
    #[command(subcommand)]
    pub command: Command,

    /// Suppress progress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long, global = true)]
    pub no_skip: bool,
}

/// Available fills
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Fill every placeholder region with forest tiles
    Forest {
        /// Grid file or directory of grid files
        #[arg(value_name = "TARGET")]
        target: PathBuf,

        /// Family index (0-3) at the grid origin; searched when omitted
        #[arg(short = 'r', long, value_parser = clap::value_parser!(u8).range(0..4))]
        orientation: Option<u8>,

        /// Output file (single-file targets only)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Fill placeholders connected to the origin with rough
    Rough {
        /// Grid file or directory of grid files
        #[arg(value_name = "TARGET")]
        target: PathBuf,

        /// Output file (single-file targets only)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl Command {
    /// File or directory to process
    pub const fn target(&self) -> &PathBuf {
        match self {
            Self::Forest { target, .. } | Self::Rough { target, .. } => target,
        }
    }

    /// Explicit output path, if given
    pub const fn output(&self) -> Option<&PathBuf> {
        match self {
            Self::Forest { output, .. } | Self::Rough { output, .. } => output.as_ref(),
        }
    }
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Runs the selected fill over every target grid file
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if the target is invalid, a grid cannot be read or
    /// written, or a fill fails
    pub fn process(&mut self) -> Result<()> {
        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for file in &files {
            self.process_file(file)?;
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = self.cli.command.target();
        if target.is_file() {
            if self.should_process_file(target) {
                Ok(vec![target.clone()])
            } else {
                Ok(vec![])
            }
        } else if target.is_dir() {
            if self.cli.command.output().is_some() {
                return Err(invalid_parameter(
                    "output",
                    &target.display(),
                    &"an explicit output needs a single grid file target",
                ));
            }
            let entries = std::fs::read_dir(target)
                .map_err(|source| file_system_error(target, "list directory", source))?;
            let mut files = Vec::new();
            for entry in entries {
                let path = entry
                    .map_err(|source| file_system_error(target, "list directory", source))?
                    .path();
                if Self::is_grid_input(&path) && self.should_process_file(&path) {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_parameter(
                "target",
                &target.display(),
                &"must be a grid file or directory",
            ))
        }
    }

    fn is_grid_input(path: &Path) -> bool {
        let is_text = path.extension().and_then(|s| s.to_str()) == Some(GRID_EXTENSION);
        let is_output = path
            .file_stem()
            .and_then(|s| s.to_str())
            .is_some_and(|stem| stem.ends_with(OUTPUT_SUFFIX));
        is_text && !is_output
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = self.output_path(input_path);
        if output_path.exists() {
            tracing::info!(input = %input_path.display(), "skipping, output exists");
            false
        } else {
            true
        }
    }

    fn process_file(&self, input_path: &Path) -> Result<()> {
        let start_time = Instant::now();
        let output_path = self.output_path(input_path);
        let mut grid = read_grid(input_path)?;

        let filled = match self.cli.command {
            Command::Forest { orientation, .. } => {
                self.fill_forest(&mut grid, orientation, input_path)?
            }
            Command::Rough { .. } => {
                let assignment = RoughFill.fill(&grid);
                grid.apply(&assignment);
                assignment.len()
            }
        };

        write_grid(&output_path, &grid)?;

        if let Some(ref pm) = self.progress_manager {
            pm.complete_file();
        }
        tracing::info!(
            input = %input_path.display(),
            output = %output_path.display(),
            cells = filled,
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "grid filled"
        );
        Ok(())
    }

    fn fill_forest(
        &self,
        grid: &mut TileGrid,
        orientation: Option<u8>,
        input_path: &Path,
    ) -> Result<usize> {
        let config = ForestConfig {
            orientation: orientation.map(|index| TileFamily::from_index(usize::from(index))),
        };
        let filler = ForestFiller::with_config(config);
        let regions = filler.detect_regions(grid);

        let progress = self.progress_manager.as_ref();
        if let Some(pm) = progress {
            pm.start_file(input_path, regions.len());
        }

        let assignment = filler.fill_regions(grid, &regions, |_, _| {
            if let Some(pm) = progress {
                pm.complete_region();
            }
        })?;
        grid.apply(&assignment);
        Ok(assignment.len())
    }

    /// Where the filled grid for an input is written
    pub fn output_path(&self, input_path: &Path) -> PathBuf {
        if let Some(output) = self.cli.command.output() {
            return output.clone();
        }

        let stem = input_path.file_stem().unwrap_or_default();
        let extension = input_path.extension().unwrap_or_default();
        let output_name = format!(
            "{}{}.{}",
            stem.to_string_lossy(),
            OUTPUT_SUFFIX,
            extension.to_string_lossy()
        );

        if let Some(parent) = input_path.parent() {
            parent.join(output_name)
        } else {
            PathBuf::from(output_name)
        }
    }
}
