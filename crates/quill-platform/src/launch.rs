use std::path::{Path, PathBuf};

use log::{debug, info};

/// File name of the managed executable for this OS and architecture, for
/// example `quill.linux.x86_64` or `quill.windows.x86_64.exe`. Release
/// assets follow the same convention.
#[must_use]
pub fn managed_executable_name() -> String {
    let base = format!("quill.{}.{}", std::env::consts::OS, std::env::consts::ARCH);
    if cfg!(windows) {
        format!("{base}.exe")
    } else {
        base
    }
}

#[must_use]
pub fn managed_executable_path(cache_dir: &Path) -> PathBuf {
    cache_dir.join(managed_executable_name())
}

/// Spawn the managed application detached and report whether it was started.
///
/// A missing executable is a no-op (`Ok(false)`): the launcher keeps running,
/// typically because nothing has been installed yet. On `Ok(true)` the caller
/// is expected to terminate this process.
///
/// # Errors
/// Returns an error when the executable exists but cannot be spawned.
pub fn launch_managed(cache_dir: &Path) -> std::io::Result<bool> {
    let path = managed_executable_path(cache_dir);
    if !path.exists() {
        debug!("managed executable not present at {}", path.display());
        return Ok(false);
    }

    let mut command = std::process::Command::new(&path);

    // The managed app skips its own update check when started by the
    // launcher, and must not pop a console window.
    #[cfg(windows)]
    {
        use std::os::windows::process::CommandExt;
        const CREATE_NO_WINDOW: u32 = 0x0800_0000;
        command.arg("--no-update");
        command.creation_flags(CREATE_NO_WINDOW);
    }

    command.spawn()?;
    info!("handed off to {}", path.display());
    Ok(true)
}
