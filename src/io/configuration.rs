//! Algorithm constants and runtime configuration defaults

// Fringe compatibility
/// Minimum observed co-occurrence count for two fringe tiles to be neighbours
pub const DEFAULT_FREQUENCY_THRESHOLD: u32 = 3;

/// Shortest closed path that can enclose a green
pub const MIN_PATH_LENGTH: usize = 4;

// Propagation must terminate; hitting the cap is reported as a defect
/// Iteration allowance per propagation unit (cell or path position)
pub const PROPAGATION_ITERATIONS_PER_UNIT: usize = 50;
/// Fixed iteration allowance added to every propagation run
pub const PROPAGATION_ITERATION_BASE: usize = 500;

/// Iteration cap for a propagation run over `units` cells or positions
pub const fn propagation_limit(units: usize) -> usize {
    units
        .saturating_mul(PROPAGATION_ITERATIONS_PER_UNIT)
        .saturating_add(PROPAGATION_ITERATION_BASE)
}

// Default values for configurable parameters
/// Fixed seed for reproducible fringe generation
pub const DEFAULT_SEED: u64 = 42;

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

// Text grid settings
/// Token standing for a placeholder cell in text grids
pub const PLACEHOLDER_TOKEN: &str = "..";
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_filled";
