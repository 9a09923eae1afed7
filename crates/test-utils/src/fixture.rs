use std::fs;
use std::path::{Path, PathBuf};

/// Write an executable `/bin/sh` script into `dir` and return its path.
///
/// Used by tests that need a real program on disk (custom search paths,
/// executables with spaces in their names).
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    let contents = format!("#!/bin/sh\n{body}\n");
    fs::write(&path, contents).expect("writing fixture script");

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(&path)
            .expect("fixture script metadata")
            .permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).expect("marking fixture script executable");
    }

    path
}
