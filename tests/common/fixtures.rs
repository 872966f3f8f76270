use std::fs;
use std::path::{Path, PathBuf};

/// Directory holding the sample .cql scripts
pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Load a test fixture from tests/fixtures/
pub fn load_fixture(name: &str) -> String {
    let path = fixtures_dir().join(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to load fixture {}: {}", name, e))
}

/// Discover all .cql files in tests/fixtures/
pub fn discover_fixtures() -> Vec<PathBuf> {
    let mut paths: Vec<_> = fs::read_dir(fixtures_dir())
        .expect("Failed to read fixtures directory")
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some("cql"))
        .collect();
    paths.sort();
    paths
}
