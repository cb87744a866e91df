//! Shell-script stand-ins for the LightGBM executable

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Write an executable `/bin/sh` script named `lightgbm` into `dir`
pub fn write_stub(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("lightgbm");
    std::fs::write(&path, format!("#!/bin/sh\n{}", body)).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}
