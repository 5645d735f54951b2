#[cfg(test)]
mod samples {
    use std::fs;
    use std::path::Path;

    use chordpro::parsing;

    #[test]
    fn ensure_samples_parse() {
        let dir = Path::new("tests/samples/");

        assert!(dir.exists(), "samples directory missing");

        let entries = fs::read_dir(dir).expect("Failed to read samples directory");

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.expect("Failed to read directory entry");
            let path = entry.path();

            if path
                .extension()
                .and_then(|s| s.to_str())
                == Some("cho")
            {
                files.push(path);
            }
        }

        assert!(!files.is_empty(), "No .cho files found in samples directory");

        let mut failures = Vec::new();

        for file in &files {
            let content = parsing::load(&file)
                .unwrap_or_else(|e| panic!("Failed to load file {:?}: {:?}", file, e));

            let parsed = parsing::parse(&content);
            if !parsed.is_success() {
                println!("File {:?} failed to parse: {:?}", file, parsed.diagnostics);
                failures.push(file.clone());
                continue;
            }

            if parsed
                .document
                .title
                .is_none()
            {
                println!("File {:?} has no title", file);
                failures.push(file.clone());
            }

            if parsed
                .document
                .song_lines()
                .count()
                == 0
            {
                println!("File {:?} has no song lines", file);
                failures.push(file.clone());
            }
        }

        if !failures.is_empty() {
            panic!(
                "Sample files should parse successfully, but {} files failed",
                failures.len()
            );
        }
    }

    #[test]
    fn missing_files_are_reported() {
        let result = parsing::load(Path::new("tests/samples/nonexistent.cho"));
        let error = result.unwrap_err();
        assert_eq!(error.problem, "File not found");
    }
}
