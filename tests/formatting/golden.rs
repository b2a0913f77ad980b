#[cfg(test)]
mod golden {
    use std::fs;
    use std::path::Path;

    use scratchblocks::database::Database;
    use scratchblocks::formatting::*;
    use scratchblocks::parsing::{self, ParseOptions};

    // The files in tests/golden/ are in their canonical formatted form, so
    // parsing and formatting each one must give back exactly what was read.

    /// Print the lines which differ between the file and its reformatted
    /// text.
    fn show_diff(expected: &str, actual: &str, path: &Path) {
        let expected: Vec<&str> = expected
            .lines()
            .collect();
        let actual: Vec<&str> = actual
            .lines()
            .collect();

        println!("\n{:?} is not in canonical form", path);

        for number in 0..expected
            .len()
            .max(actual.len())
        {
            let before = expected
                .get(number)
                .copied()
                .unwrap_or_default();
            let after = actual
                .get(number)
                .copied()
                .unwrap_or_default();

            if before != after {
                println!("line {}:", number + 1);
                println!("  - {}", before);
                println!("  + {}", after);
            }
        }
    }

    #[test]
    fn ensure_identical_output() {
        let dir = Path::new("tests/golden/");

        assert!(dir.exists(), "golden directory missing");

        let entries = fs::read_dir(dir).expect("Failed to read golden directory");

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.expect("Failed to read directory entry");
            let path = entry.path();

            if path
                .extension()
                .and_then(|s| s.to_str())
                == Some("sb")
            {
                files.push(path);
            }
        }

        assert!(!files.is_empty(), "No .sb files found in golden directory");

        let database = Database::english().unwrap();
        let options = ParseOptions::default();
        let mut failures = Vec::new();

        for file in &files {
            let original = parsing::load(file)
                .unwrap_or_else(|e| panic!("Failed to load file {:?}: {:?}", file, e));

            let scripts = parsing::parse(&database, &original, &options);
            let result = format(&scripts);

            if result != original {
                show_diff(&original, &result, file);
                failures.push(file.clone());
            }
        }

        if !failures.is_empty() {
            panic!(
                "Golden files should be in canonical form, but {} files differ",
                failures.len()
            );
        }
    }
}
