#[cfg(test)]
mod samples {
    use std::fs;
    use std::path::{Path, PathBuf};

    use scratchblocks::database::Database;
    use scratchblocks::formatting;
    use scratchblocks::language::*;
    use scratchblocks::parsing::{self, ParseOptions};

    fn sample_files(dir: &Path) -> Vec<PathBuf> {
        assert!(dir.exists(), "samples directory missing");

        let entries = fs::read_dir(dir).expect("Failed to read samples directory");

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

        assert!(!files.is_empty(), "No .sb files found in samples directory");
        files.sort();
        files
    }

    #[test]
    fn ensure_samples_recognised() {
        let database = Database::english().unwrap();
        let options = ParseOptions::default();

        let mut failures = Vec::new();

        for file in &sample_files(Path::new("tests/samples/")) {
            let content = parsing::load(file)
                .unwrap_or_else(|e| panic!("Failed to load file {:?}: {:?}", file, e));

            let scripts = parsing::parse(&database, &content, &options);
            assert!(!scripts.is_empty(), "{:?} produced no scripts", file);

            for script in &scripts {
                for block in script.blocks() {
                    if block.category == Category::Obsolete && block.blockid != "_" {
                        println!("File {:?}: unrecognised block '{}'", file, block.spec());
                        failures.push(file.clone());
                    }
                }
            }
        }

        if !failures.is_empty() {
            panic!(
                "Sample files should only contain known blocks, but {} blocks were not recognised",
                failures.len()
            );
        }
    }

    #[test]
    fn ensure_formatting_settles() {
        let database = Database::english().unwrap();
        let options = ParseOptions::default();

        for file in &sample_files(Path::new("tests/samples/")) {
            let content = parsing::load(file)
                .unwrap_or_else(|e| panic!("Failed to load file {:?}: {:?}", file, e));

            let first = formatting::format(&parsing::parse(&database, &content, &options));
            let second = formatting::format(&parsing::parse(&database, &first, &options));

            assert_eq!(first, second, "formatting {:?} did not settle", file);
        }
    }
}
