//! Tests for fill constants and the propagation cap

#[cfg(test)]
mod tests {
    use tilefill::io::configuration::{
        DEFAULT_FREQUENCY_THRESHOLD, MIN_PATH_LENGTH, OUTPUT_SUFFIX, PLACEHOLDER_TOKEN,
        propagation_limit,
    };

    // Tests the cap grows by fifty per unit over a base of five hundred
    // Verified by dropping the base allowance
    #[test]
    fn test_propagation_limit() {
        assert_eq!(propagation_limit(0), 500);
        assert_eq!(propagation_limit(10), 1000);
        assert_eq!(propagation_limit(usize::MAX), usize::MAX);
    }

    // Tests default values used by fringe generation and text grids
    // Verified by changing constant values
    #[test]
    fn test_defaults() {
        assert_eq!(DEFAULT_FREQUENCY_THRESHOLD, 3);
        assert_eq!(MIN_PATH_LENGTH, 4);
        assert_eq!(PLACEHOLDER_TOKEN, "..");
        assert_eq!(OUTPUT_SUFFIX, "_filled");
    }
}
