//! Tests for batch and region progress bars

#[cfg(test)]
mod tests {
    use std::path::Path;
    use tilefill::io::progress::ProgressManager;

    // Tests a single file runs with only the region bar
    // Verified by incrementing the batch bar without checking it exists
    #[test]
    fn test_single_file_cycle() {
        let mut pm = ProgressManager::new();
        pm.finish();

        pm.initialize(1);
        pm.start_file(Path::new("single.txt"), 2);
        pm.complete_region();
        pm.complete_region();
        pm.complete_file();
        pm.finish();
    }

    // Tests a full batch cycle runs without a terminal attached
    // Verified by unwrapping the template parse in the style statics
    #[test]
    fn test_file_cycle() {
        let mut pm = ProgressManager::default();
        pm.initialize(2);
        for name in ["a.txt", "b.txt"] {
            pm.start_file(Path::new(name), 3);
            for _ in 0..3 {
                pm.complete_region();
            }
            pm.complete_file();
        }
        pm.finish();
    }

    // Tests a file with no regions leaves an empty region bar
    // Verified by panicking on a zero-length bar in start_file
    #[test]
    fn test_file_without_regions() {
        let mut pm = ProgressManager::new();
        pm.initialize(3);
        pm.start_file(Path::new("empty.txt"), 0);
        pm.complete_file();
        pm.finish();
    }
}
