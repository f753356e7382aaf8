//! Detection constants and runtime configuration defaults

// Parameter defaults mirrored by the CLI
/// Smallest grid cell size considered by default
pub const DEFAULT_MIN_GRID_SIZE: u32 = 2;
/// Largest grid cell size accepted by default
pub const DEFAULT_MAX_GRID_SIZE: u32 = 32;
/// Normalized correlation a local maximum must exceed to become a candidate
pub const DEFAULT_PEAK_THRESHOLD: f64 = 0.19;

// Peak picking constants
/// Maximum relative deviation of a candidate from an integer harmonic
pub const HARMONIC_TOLERANCE: f64 = 0.15;
/// Largest parabolic sub-pixel shift accepted, in samples
pub const MAX_SUBPIXEL_OFFSET: f64 = 1.0;
/// Fallback search extends this far past the maximum grid size
pub const FALLBACK_SEARCH_FACTOR: f64 = 1.5;

// Luma weights (ITU-R BT.601)
/// Red channel weight in luma conversion
pub const LUMA_RED: f64 = 0.299;
/// Green channel weight in luma conversion
pub const LUMA_GREEN: f64 = 0.587;
/// Blue channel weight in luma conversion
pub const LUMA_BLUE: f64 = 0.114;

/// Grid size used when detection fails, capped by the maximum grid size
pub const DEFAULT_GRID_SIZE: u32 = 16;

// Overlay settings
/// Half-transparent black grid lines
pub const GRID_LINE_COLOR: [u8; 4] = [0, 0, 0, 128];
/// Default overlay zoom factor
pub const DEFAULT_ZOOM: f64 = 1.0;
/// Smallest accepted zoom factor
pub const MIN_ZOOM: f64 = 0.1;
/// Largest accepted zoom factor
pub const MAX_ZOOM: f64 = 16.0;

// Correlation graph settings
/// Graph canvas width in pixels
pub const GRAPH_WIDTH: u32 = 400;
/// Graph canvas height in pixels
pub const GRAPH_HEIGHT: u32 = 150;
/// Blank border around the plot area
pub const GRAPH_PADDING: u32 = 20;
/// Profile polyline color (#4a90e2)
pub const GRAPH_LINE_COLOR: [u8; 4] = [74, 144, 226, 255];
/// Profile polyline thickness
pub const GRAPH_LINE_WIDTH: u32 = 2;
/// Detected period marker color
pub const GRAPH_PEAK_COLOR: [u8; 4] = [255, 0, 0, 255];
/// Graph background color
pub const GRAPH_BACKGROUND: [u8; 4] = [255, 255, 255, 255];

// Output settings
/// Suffix added to overlay filenames
pub const OUTPUT_SUFFIX: &str = "_grid";
/// Suffix added to horizontal correlation graph filenames
pub const GRAPH_X_SUFFIX: &str = "_corr_x";
/// Suffix added to vertical correlation graph filenames
pub const GRAPH_Y_SUFFIX: &str = "_corr_y";
/// Extension used when the input has none
pub const DEFAULT_EXTENSION: &str = "png";

/// Width of the batch progress bar in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

/// Fallback grid size for a given upper bound
pub fn default_grid_size(max_grid_size: u32) -> u32 {
    DEFAULT_GRID_SIZE.min(max_grid_size)
}
