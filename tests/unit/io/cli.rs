//! Tests for command-line parsing and grid file processing

#[cfg(test)]
mod tests {
    use clap::Parser;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::tempdir;
    use tilefill::AlgorithmError;
    use tilefill::io::cli::{Cli, Command, FileProcessor};

    fn run(args: &[&str]) -> Result<(), AlgorithmError> {
        FileProcessor::new(Cli::parse_from(args)).process()
    }

    fn read(path: &Path) -> String {
        fs::read_to_string(path).unwrap_or_else(|error| unreachable!("read failed: {error}"))
    }

    fn write(path: &Path, text: &str) {
        fs::write(path, text).unwrap_or_else(|error| unreachable!("write failed: {error}"));
    }

    // Tests the forest subcommand with an orientation and global flags
    // Verified by declaring quiet without global = true
    #[test]
    fn test_parse_forest() {
        let cli = Cli::parse_from(["tilefill", "forest", "hole.txt", "-r", "2", "--quiet"]);
        assert!(cli.quiet);
        assert!(cli.skip_existing());
        assert!(!cli.should_show_progress());
        match cli.command {
            Command::Forest {
                ref target,
                orientation,
                ref output,
            } => {
                assert_eq!(target, &PathBuf::from("hole.txt"));
                assert_eq!(orientation, Some(2));
                assert!(output.is_none());
            }
            Command::Rough { .. } => unreachable!("Expected forest command"),
        }
    }

    // Verifies orientations outside 0..4 are rejected at parse time
    // Verified by removing the range from the value parser
    #[test]
    fn test_orientation_range() {
        assert!(Cli::try_parse_from(["tilefill", "forest", "hole.txt", "-r", "4"]).is_err());
        assert!(Cli::try_parse_from(["tilefill", "forest", "hole.txt", "-r", "3"]).is_ok());
    }

    // Tests output paths default to a suffixed sibling unless given
    // Verified by dropping the extension from the default name
    #[test]
    fn test_output_path() {
        let processor = FileProcessor::new(Cli::parse_from(["tilefill", "rough", "in/hole.txt"]));
        assert_eq!(
            processor.output_path(Path::new("in/hole.txt")),
            PathBuf::from("in/hole_filled.txt")
        );

        let explicit = FileProcessor::new(Cli::parse_from([
            "tilefill", "rough", "hole.txt", "-o", "out.txt",
        ]));
        assert_eq!(
            explicit.output_path(Path::new("hole.txt")),
            PathBuf::from("out.txt")
        );
    }

    // Verifies rough fill writes the filled grid next to the input
    // Verified by writing the unfilled grid
    #[test]
    fn test_process_rough_file() {
        let dir = tempdir().unwrap_or_else(|error| unreachable!("tempdir failed: {error}"));
        let input = dir.path().join("hole.txt");
        write(&input, ".. 66\n.. ..\n");

        let target = input.to_string_lossy().to_string();
        assert!(run(&["tilefill", "--quiet", "rough", &target]).is_ok());
        assert_eq!(read(&dir.path().join("hole_filled.txt")), "70 66\n2C 29\n");
    }

    // Verifies directory targets skip existing outputs and never read them as input
    // Verified by treating _filled files as grid inputs
    #[test]
    fn test_process_forest_directory() {
        let dir = tempdir().unwrap_or_else(|error| unreachable!("tempdir failed: {error}"));
        write(&dir.path().join("a.txt"), "..\n");
        write(&dir.path().join("a_filled.txt"), "00\n");
        write(&dir.path().join("b.txt"), ".. ..\n");
        write(&dir.path().join("notes.md"), "not a grid\n");

        let target = dir.path().to_string_lossy().to_string();
        assert!(run(&["tilefill", "-q", "forest", &target]).is_ok());
        assert_eq!(read(&dir.path().join("a_filled.txt")), "00\n");
        assert_eq!(read(&dir.path().join("b_filled.txt")), "A0 A1\n");

        assert!(run(&["tilefill", "-q", "--no-skip", "forest", &target]).is_ok());
        assert_eq!(read(&dir.path().join("a_filled.txt")), "A0\n");
    }

    // Verifies an explicit output cannot be combined with a directory target
    // Verified by accepting the output and overwriting it per file
    #[test]
    fn test_directory_with_output_rejected() {
        let dir = tempdir().unwrap_or_else(|error| unreachable!("tempdir failed: {error}"));
        let target = dir.path().to_string_lossy().to_string();
        let result = run(&["tilefill", "-q", "forest", &target, "-o", "out.txt"]);
        assert!(matches!(
            result,
            Err(AlgorithmError::InvalidParameter {
                parameter: "output",
                ..
            })
        ));
        assert!(matches!(
            run(&["tilefill", "-q", "rough", "/definitely/not/here.txt"]),
            Err(AlgorithmError::InvalidParameter {
                parameter: "target",
                ..
            })
        ));
    }
}
