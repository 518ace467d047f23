mod json_ocel_import_tests;

/// Absolute path of a file in `test_data`
fn test_data_path(file: &str) -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("src/core/event_data/tests/test_data")
        .join(file)
}
