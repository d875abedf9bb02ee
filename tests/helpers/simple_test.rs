//! Simple test infrastructure for basic testing

use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize test environment
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

/// Test context owning a scratch directory for config files
pub struct SimpleTestContext {
    pub temp_dir: tempfile::TempDir,
}

impl SimpleTestContext {
    pub fn new() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        init_test_env();
        Ok(Self {
            temp_dir: tempfile::tempdir()?,
        })
    }

    /// Write `contents` to `name` inside the scratch directory
    pub fn write_file(&self, name: &str, contents: &str) -> std::io::Result<std::path::PathBuf> {
        let path = self.temp_dir.path().join(name);
        std::fs::write(&path, contents)?;
        Ok(path)
    }
}
