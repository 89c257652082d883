//! Structural checks keeping `tests/unit/` in step with `src/`

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::Path;

    const SRC_DIR: &str = "src";
    const UNIT_DIR: &str = "tests/unit";

    // Entry points and module files carry no logic of their own
    fn is_structural(relative: &str) -> bool {
        relative == "lib.rs" || relative == "main.rs" || relative.ends_with("mod.rs")
    }

    fn tree(root: &str) -> BTreeSet<String> {
        let base = Path::new(root);
        collect_relative_paths(base, base).unwrap_or_else(|error| {
            assert!(!base.exists(), "Failed to read {root}: {error}");
            BTreeSet::new()
        })
    }

    fn collect_relative_paths(dir: &Path, base: &Path) -> Result<BTreeSet<String>, io::Error> {
        let mut paths = BTreeSet::new();
        if !dir.is_dir() {
            return Ok(paths);
        }

        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let relative = path
                .strip_prefix(base)
                .map_err(|_| io::Error::other("Failed to strip prefix"))?
                .to_string_lossy()
                .to_string();

            if path.is_dir() {
                paths.extend(collect_relative_paths(&path, base)?);
                paths.insert(relative);
            } else if path.extension().and_then(|ext| ext.to_str()) == Some("rs") {
                paths.insert(relative);
            }
        }
        Ok(paths)
    }

    // Tests every source file has a unit test file at the mirrored path
    // Verified by adding an untested module under src/
    #[test]
    fn test_all_src_files_have_unit_tests() {
        let src = tree(SRC_DIR);
        let unit = tree(UNIT_DIR);

        let missing: Vec<String> = src
            .iter()
            .filter(|path| !is_structural(path) && !unit.contains(*path))
            .map(|path| format!("  - src/{path} -> tests/unit/{path}"))
            .collect();

        assert!(
            missing.is_empty(),
            "Source files without unit test counterparts:\n{}",
            missing.join("\n")
        );
    }

    // Tests no unit test file outlives the module it covers
    // Verified by renaming a source module
    #[test]
    fn test_all_unit_tests_have_src_counterparts() {
        let src = tree(SRC_DIR);
        let unit = tree(UNIT_DIR);

        let orphaned: Vec<String> = unit
            .iter()
            .filter(|path| !path.ends_with("mod.rs") && !src.contains(*path))
            .map(|path| format!("  - tests/unit/{path} -> src/{path} (missing)"))
            .collect();

        assert!(
            orphaned.is_empty(),
            "Unit test files without source counterparts:\n{}",
            orphaned.join("\n")
        );
    }

    // Tests every unit test file is declared by its parent module
    // Verified by removing a `pub mod` line from a unit test mod.rs
    #[test]
    fn test_all_unit_tests_are_declared() {
        let unit = tree(UNIT_DIR);
        let mut undeclared = Vec::new();

        for relative in &unit {
            let path = Path::new(UNIT_DIR).join(relative);
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if stem == "main" || stem == "mod" {
                continue;
            }

            let Some(parent) = path.parent() else {
                continue;
            };
            let declaring = if parent == Path::new(UNIT_DIR) {
                parent.join("main.rs")
            } else {
                parent.join("mod.rs")
            };
            let content = fs::read_to_string(&declaring).unwrap_or_default();
            if !content.contains(&format!("mod {stem};")) {
                undeclared.push(format!("  - {} (not in {})", path.display(), declaring.display()));
            }
        }

        assert!(
            undeclared.is_empty(),
            "Unit test files that are never compiled:\n{}",
            undeclared.join("\n")
        );
    }

    fn check_test_files(dir: &Path, without_tests: &mut Vec<String>) -> Result<(), io::Error> {
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_dir() {
                check_test_files(&path, without_tests)?;
                continue;
            }
            if path.extension().and_then(|ext| ext.to_str()) != Some("rs") {
                continue;
            }

            let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
                continue;
            };
            if file_name == "main.rs" && path.parent() != Some(Path::new("tests/meta")) {
                continue;
            }
            if file_name == "mod.rs" {
                continue;
            }

            if !fs::read_to_string(&path)?.contains("#[test]") {
                without_tests.push(format!("  - {}", path.display()));
            }
        }
        Ok(())
    }

    // Tests every test file actually defines tests
    // Verified by emptying a unit test module
    #[test]
    fn test_all_test_files_contain_tests() {
        let tests_dir = Path::new("tests");
        let mut without_tests = Vec::new();

        if let Err(error) = check_test_files(tests_dir, &mut without_tests) {
            assert!(!tests_dir.exists(), "Failed to scan tests directory: {error}");
        }

        assert!(
            without_tests.is_empty(),
            "Test files without any #[test] functions:\n{}",
            without_tests.join("\n")
        );
    }
}
