//! Command-line interface for batch grid detection and overlay export

use crate::analysis::correlation::Axis;
use crate::analysis::estimator::{
    EstimationResult, EstimatorConfig, GridOffset, GridPeriodEstimator,
};
use crate::io::configuration::{
    DEFAULT_MAX_GRID_SIZE, DEFAULT_MIN_GRID_SIZE, DEFAULT_PEAK_THRESHOLD, DEFAULT_ZOOM,
    GRAPH_X_SUFFIX, GRAPH_Y_SUFFIX, OUTPUT_SUFFIX, default_grid_size,
};
use crate::io::error::{GridError, Result, invalid_parameter};
use crate::io::graph::CorrelationGraph;
use crate::io::image::{is_png, load_rgba, save_rgba, suffixed_path};
use crate::io::overlay::GridOverlay;
use crate::io::progress::ProgressManager;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "gridsnap")]
#[command(
    version,
    about = "Detect the cell size of pixel art and draw a matching grid"
)]
/// Command-line arguments for the grid detection tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Input PNG file or directory to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Largest grid cell size accepted by detection
    #[arg(short, long, default_value_t = DEFAULT_MAX_GRID_SIZE)]
    pub max_size: u32,

    /// Smallest grid cell size accepted by detection
    #[arg(long, default_value_t = DEFAULT_MIN_GRID_SIZE)]
    pub min_size: u32,

    /// Normalized correlation a peak must exceed
    #[arg(short, long, default_value_t = DEFAULT_PEAK_THRESHOLD)]
    pub threshold: f64,

    /// Use this grid size instead of detecting one
    #[arg(short, long)]
    pub size: Option<f64>,

    /// Overlay zoom factor
    #[arg(short, long, default_value_t = DEFAULT_ZOOM)]
    pub zoom: f64,

    /// Also write horizontal and vertical correlation graphs
    #[arg(short, long)]
    pub graphs: bool,

    /// Only log warnings and errors, hide progress
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,

    /// Increase log detail (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
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

    /// Estimator settings taken from the arguments
    pub fn estimator_config(&self) -> EstimatorConfig {
        EstimatorConfig {
            min_grid_size: self.min_size,
            max_grid_size: self.max_size,
            peak_threshold: self.threshold,
            ..EstimatorConfig::default()
        }
    }
}

/// Where a grid size used for an overlay came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeSource {
    /// Given with `--size`
    Manual,
    /// Found by the estimator
    Detected,
    /// Detection failed; the default size was used
    Fallback,
}

/// Outcome of processing one input file
#[derive(Debug, Clone, PartialEq)]
pub struct FileReport {
    /// Input image
    pub input: PathBuf,
    /// Written overlay image
    pub output: PathBuf,
    /// Grid size drawn in the overlay
    pub grid_size: f64,
    /// Origin of `grid_size`
    pub source: SizeSource,
    /// Estimator result, absent when the size was given manually
    pub estimation: Option<EstimationResult>,
}

/// Orchestrates batch processing of PNG files with progress tracking
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
    /// Returns an error if:
    /// - The target is missing or not a PNG file or directory
    /// - The estimator parameters, manual size or zoom are invalid
    /// - An image cannot be loaded or an output cannot be written
    pub fn process(&mut self) -> Result<Vec<FileReport>> {
        let estimator = GridPeriodEstimator::new(self.cli.estimator_config())?;
        GridOverlay::new(self.cli.size.unwrap_or(1.0))
            .with_zoom(self.cli.zoom)
            .validate()?;

        let files = self.collect_files()?;
        if files.is_empty() {
            return Ok(Vec::new());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        let mut reports = Vec::with_capacity(files.len());
        for file in &files {
            let report = self.process_file(file, &estimator)?;
            if let Some(ref mut pm) = self.progress_manager {
                pm.complete_file(report.source != SizeSource::Fallback);
            }
            reports.push(report);
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(reports)
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;

        if target.is_file() {
            if !is_png(target) {
                return Err(GridError::InvalidTarget {
                    path: target.clone(),
                    reason: "target file must be a PNG image",
                });
            }
            Ok(if self.should_process_file(target) {
                vec![target.clone()]
            } else {
                Vec::new()
            })
        } else if target.is_dir() {
            let entries = std::fs::read_dir(target).map_err(|e| GridError::FileSystem {
                path: target.clone(),
                operation: "read directory",
                source: e,
            })?;

            let mut files = Vec::new();
            for entry in entries {
                let path = entry?.path();
                if path.is_file()
                    && is_png(&path)
                    && !Self::is_generated(&path)
                    && self.should_process_file(&path)
                {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(GridError::InvalidTarget {
                path: target.clone(),
                reason: "target must be a PNG file or directory",
            })
        }
    }

    // Outputs of earlier runs are never treated as inputs
    fn is_generated(path: &Path) -> bool {
        path.file_stem()
            .map(|stem| stem.to_string_lossy())
            .is_some_and(|stem| {
                [OUTPUT_SUFFIX, GRAPH_X_SUFFIX, GRAPH_Y_SUFFIX]
                    .iter()
                    .any(|suffix| stem.ends_with(suffix))
            })
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = Self::get_output_path(input_path);
        if output_path.exists() {
            info!("skipping {} (output exists)", input_path.display());
            false
        } else {
            true
        }
    }

    fn process_file(
        &self,
        input_path: &Path,
        estimator: &GridPeriodEstimator,
    ) -> Result<FileReport> {
        if let Some(ref pm) = self.progress_manager {
            pm.start_file(input_path);
        }

        let image = load_rgba(input_path)?;

        let (grid_size, source, estimation) = self.cli.size.map_or_else(
            || {
                let result = estimator.estimate(&image);
                Self::log_estimate(input_path, &result);

                let fallback = f64::from(default_grid_size(self.cli.max_size));
                let source = if result.is_detected() {
                    SizeSource::Detected
                } else {
                    warn!(
                        "{}: falling back to grid size {fallback}",
                        input_path.display()
                    );
                    SizeSource::Fallback
                };
                (result.size_or(fallback), source, Some(result))
            },
            |size| (size, SizeSource::Manual, None),
        );

        if grid_size <= 0.0 {
            return Err(invalid_parameter(
                "size",
                &grid_size,
                &"grid size must be positive",
            ));
        }

        let offset = estimation
            .as_ref()
            .map_or_else(GridOffset::default, |result| result.offset);
        let overlay = GridOverlay::new(grid_size)
            .with_zoom(self.cli.zoom)
            .with_offset(offset);
        let output_path = Self::get_output_path(input_path);
        save_rgba(&overlay.render(&image)?, &output_path)?;

        if self.cli.graphs
            && let Some(ref result) = estimation
        {
            Self::write_graphs(input_path, result)?;
        }

        Ok(FileReport {
            input: input_path.to_path_buf(),
            output: output_path,
            grid_size,
            source,
            estimation,
        })
    }

    fn log_estimate(input_path: &Path, result: &EstimationResult) {
        for axis in Axis::ALL {
            info!(
                "{} [{axis}] {}",
                input_path.display(),
                result.axis_summary(axis)
            );
        }
        if result.is_detected() {
            info!("{}: grid size {:.3}px", input_path.display(), result.size);
        }
    }

    fn write_graphs(input_path: &Path, result: &EstimationResult) -> Result<()> {
        let graph = CorrelationGraph::default();
        for axis in Axis::ALL {
            let plot = graph.render(result.profile(axis).values(), result.axis_size(axis));
            save_rgba(&plot, Self::get_graph_path(input_path, axis))?;
        }
        Ok(())
    }

    /// Overlay path for an input, e.g. `sprite.png` -> `sprite_grid.png`
    pub fn get_output_path(input_path: &Path) -> PathBuf {
        suffixed_path(input_path, OUTPUT_SUFFIX)
    }

    /// Correlation graph path for an input and axis
    pub fn get_graph_path(input_path: &Path, axis: Axis) -> PathBuf {
        let suffix = match axis {
            Axis::Horizontal => GRAPH_X_SUFFIX,
            Axis::Vertical => GRAPH_Y_SUFFIX,
        };
        suffixed_path(input_path, suffix)
    }
}
