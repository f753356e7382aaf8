//! Tests for command-line interface parsing and file processing

#[cfg(test)]
mod tests {
    use clap::Parser;
    use gridsnap::analysis::correlation::Axis;
    use gridsnap::io::cli::{Cli, FileProcessor, SizeSource};
    use gridsnap::io::configuration::{
        DEFAULT_MAX_GRID_SIZE, DEFAULT_MIN_GRID_SIZE, DEFAULT_PEAK_THRESHOLD, DEFAULT_ZOOM,
    };
    use gridsnap::io::image::{load_rgba, save_rgba};
    use gridsnap::raster::pattern::{checkerboard, gray, uniform};
    use gridsnap::{GridError, PixelBuffer};
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn write_png(path: &Path, image: PixelBuffer) {
        let image = image.into_rgba_image().expect("Failed to convert buffer");
        save_rgba(&image, path).expect("Failed to write test image");
    }

    fn write_checkerboard(path: &Path) {
        write_png(path, checkerboard(64, 64, 8, 8, [gray(0), gray(255)]));
    }

    fn run(args: &[&str]) -> gridsnap::Result<Vec<gridsnap::io::cli::FileReport>> {
        let mut full = vec!["program"];
        full.extend_from_slice(args);
        FileProcessor::new(Cli::parse_from(full)).process()
    }

    // Tests CLI parsing with only required target argument
    // Verified by changing default values to ensure defaults are used
    #[test]
    fn test_cli_parse_minimal_args() {
        let cli = Cli::parse_from(["program", "test.png"]);

        assert_eq!(cli.target, PathBuf::from("test.png"));
        assert_eq!(cli.max_size, DEFAULT_MAX_GRID_SIZE);
        assert_eq!(cli.min_size, DEFAULT_MIN_GRID_SIZE);
        assert!((cli.threshold - DEFAULT_PEAK_THRESHOLD).abs() < f64::EPSILON);
        assert!((cli.zoom - DEFAULT_ZOOM).abs() < f64::EPSILON);
        assert_eq!(cli.size, None);
        assert!(!cli.graphs);
        assert!(!cli.quiet);
        assert_eq!(cli.verbose, 0);
    }

    // Tests CLI parsing with all available arguments
    #[test]
    fn test_cli_parse_all_args() {
        let cli = Cli::parse_from([
            "program",
            "art",
            "--max-size",
            "24",
            "--min-size",
            "3",
            "--threshold",
            "0.3",
            "--size",
            "6.5",
            "--zoom",
            "2",
            "--graphs",
            "--quiet",
            "--no-skip",
        ]);

        assert_eq!(cli.target, PathBuf::from("art"));
        assert_eq!(cli.max_size, 24);
        assert_eq!(cli.min_size, 3);
        assert!((cli.threshold - 0.3).abs() < f64::EPSILON);
        assert_eq!(cli.size, Some(6.5));
        assert!((cli.zoom - 2.0).abs() < f64::EPSILON);
        assert!(cli.graphs);
        assert!(cli.quiet);
        assert!(!cli.skip_existing());
    }

    // Tests short flags and repeated verbosity
    // Verified by changing short flag definitions
    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from(["program", "a.png", "-m", "12", "-t", "0.5", "-z", "3", "-vv"]);

        assert_eq!(cli.max_size, 12);
        assert!((cli.threshold - 0.5).abs() < f64::EPSILON);
        assert!((cli.zoom - 3.0).abs() < f64::EPSILON);
        assert_eq!(cli.verbose, 2);
    }

    // Tests flags controlling skipping and progress
    // Verified by inverting boolean logic in skip_existing method
    #[test]
    fn test_skip_and_progress_flags() {
        let cli = Cli::parse_from(["program", "test.png"]);
        assert!(cli.skip_existing());
        assert!(cli.should_show_progress());

        let cli = Cli::parse_from(["program", "test.png", "-n", "-q"]);
        assert!(!cli.skip_existing());
        assert!(!cli.should_show_progress());
    }

    // Tests estimator settings come from the arguments
    #[test]
    fn test_estimator_config() {
        let cli = Cli::parse_from(["program", "x.png", "-m", "20", "--min-size", "4", "-t", "0.25"]);

        let config = cli.estimator_config();

        assert_eq!(config.max_grid_size, 20);
        assert_eq!(config.min_grid_size, 4);
        assert!((config.peak_threshold - 0.25).abs() < f64::EPSILON);
    }

    // Tests output paths sit next to the input
    #[test]
    fn test_output_paths() {
        let input = Path::new("sheets/hero.png");

        assert_eq!(
            FileProcessor::get_output_path(input),
            PathBuf::from("sheets/hero_grid.png")
        );
        assert_eq!(
            FileProcessor::get_graph_path(input, Axis::Horizontal),
            PathBuf::from("sheets/hero_corr_x.png")
        );
        assert_eq!(
            FileProcessor::get_graph_path(input, Axis::Vertical),
            PathBuf::from("sheets/hero_corr_y.png")
        );
    }

    // Tests a single file is detected and its overlay written
    // Verified by skipping the overlay export
    #[test]
    fn test_process_single_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let input = temp_dir.path().join("board.png");
        write_checkerboard(&input);
        let target = input.to_string_lossy().into_owned();

        let reports = run(&[target.as_str(), "--quiet"]).expect("processing succeeds");

        assert_eq!(reports.len(), 1);
        let report = reports.first().expect("one report");
        assert_eq!(report.source, SizeSource::Detected);
        assert!((report.grid_size - 8.0).abs() < 0.05);
        assert_eq!(report.output, temp_dir.path().join("board_grid.png"));

        let overlay = load_rgba(&report.output).expect("overlay is readable");
        assert_eq!(overlay.dimensions(), (64, 64));
    }

    // Tests featureless images fall back to the default size
    #[test]
    fn test_process_fallback_size() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let input = temp_dir.path().join("flat.png");
        write_png(&input, uniform(32, 32, gray(128)));
        let target = input.to_string_lossy().into_owned();

        let reports = run(&[target.as_str(), "-q", "-m", "10"]).expect("processing succeeds");

        let report = reports.first().expect("one report");
        assert_eq!(report.source, SizeSource::Fallback);
        assert!((report.grid_size - 10.0).abs() < f64::EPSILON);
        assert!(report.estimation.as_ref().is_some_and(|e| !e.is_detected()));
        assert!(report.output.exists());
    }

    // Tests a manual size bypasses estimation
    #[test]
    fn test_process_manual_size() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let input = temp_dir.path().join("manual.png");
        write_checkerboard(&input);
        let target = input.to_string_lossy().into_owned();

        let reports = run(&[target.as_str(), "-q", "--size", "5", "--zoom", "2"]).expect("processing succeeds");

        let report = reports.first().expect("one report");
        assert_eq!(report.source, SizeSource::Manual);
        assert!(report.estimation.is_none());
        let overlay = load_rgba(&report.output).expect("overlay is readable");
        assert_eq!(overlay.dimensions(), (128, 128));
    }

    // Tests graphs are written for both axes on request
    #[test]
    fn test_process_writes_graphs() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let input = temp_dir.path().join("plot.png");
        write_checkerboard(&input);
        let target = input.to_string_lossy().into_owned();

        run(&[target.as_str(), "-q", "--graphs"]).expect("processing succeeds");

        assert!(temp_dir.path().join("plot_corr_x.png").exists());
        assert!(temp_dir.path().join("plot_corr_y.png").exists());
    }

    // Tests directory processing skips existing outputs and generated files
    // Verified by treating overlays as inputs
    #[test]
    fn test_process_directory_skipping() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        write_checkerboard(&temp_dir.path().join("b.png"));
        write_checkerboard(&temp_dir.path().join("a.png"));
        std::fs::write(temp_dir.path().join("notes.txt"), "not an image")
            .expect("Failed to write file");
        let target = temp_dir.path().to_string_lossy().into_owned();

        let first = run(&[target.as_str(), "-q", "-g"]).expect("first run succeeds");
        let inputs: Vec<_> = first.iter().map(|r| r.input.clone()).collect();
        assert_eq!(
            inputs,
            vec![temp_dir.path().join("a.png"), temp_dir.path().join("b.png")]
        );

        let second = run(&[target.as_str(), "-q"]).expect("second run succeeds");
        assert!(second.is_empty());

        let third = run(&[target.as_str(), "-q", "--no-skip"]).expect("third run succeeds");
        assert_eq!(third.len(), 2);
    }

    // Tests non-PNG files and missing paths are rejected
    #[test]
    fn test_invalid_targets() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let text = temp_dir.path().join("readme.txt");
        std::fs::write(&text, "hello").expect("Failed to write file");
        let missing = temp_dir.path().join("missing.png");

        let text = text.to_string_lossy().into_owned();
        let missing = missing.to_string_lossy().into_owned();

        let result = run(&[text.as_str(), "-q"]);
        assert!(matches!(result, Err(GridError::InvalidTarget { .. })));

        let result = run(&[missing.as_str(), "-q"]);
        assert!(matches!(result, Err(GridError::InvalidTarget { .. })));
    }

    // Tests invalid parameters fail before any file is touched
    #[test]
    fn test_invalid_parameters() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let input = temp_dir.path().join("param.png");
        write_checkerboard(&input);
        let target = input.to_string_lossy().into_owned();

        for args in [
            ["--zoom", "100"],
            ["--size", "0"],
            ["--min-size", "0"],
            ["--max-size", "1"],
        ] {
            let mut full = vec![target.as_str(), "-q"];
            full.extend_from_slice(&args);
            let result = run(&full);
            assert!(
                matches!(result, Err(GridError::InvalidParameter { .. })),
                "{args:?} should be rejected"
            );
        }
        assert!(!temp_dir.path().join("param_grid.png").exists());
    }
}
