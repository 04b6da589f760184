//! Ghostscript discovery.
//!
//! [`ToolLocator`] is the single capability the rest of the crate needs from
//! the platform: where the executable is, which version it is, and where its
//! PDF/X definition template lives. [`system_locator`] picks the variant for
//! the running OS once at startup.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, trace};

/// Template shipped with Ghostscript that declares the PDF/X output intent.
pub const TEMPLATE_NAME: &str = "PDFX_def.ps";

/// Locates an installed Ghostscript.
pub trait ToolLocator {
    /// Absolute path of the executable, if installed.
    fn executable(&self) -> Option<PathBuf>;

    /// Directory containing the executable.
    fn install_dir(&self) -> Option<PathBuf> {
        self.executable()?.parent().map(Path::to_path_buf)
    }

    /// Version string as printed by `--version`.
    fn version(&self) -> Option<String> {
        query_version(&self.executable()?)
    }

    /// Locations where the PDF/X template may live for `version`, most
    /// likely first.
    fn template_candidates(&self, version: &str) -> Vec<PathBuf> {
        self.install_dir()
            .map(|dir| template_candidates(&dir, version))
            .unwrap_or_default()
    }
}

impl<T: ToolLocator + ?Sized> ToolLocator for Box<T> {
    fn executable(&self) -> Option<PathBuf> {
        (**self).executable()
    }

    fn install_dir(&self) -> Option<PathBuf> {
        (**self).install_dir()
    }

    fn version(&self) -> Option<String> {
        (**self).version()
    }

    fn template_candidates(&self, version: &str) -> Vec<PathBuf> {
        (**self).template_candidates(version)
    }
}

/// Template locations relative to the `bin` directory.
///
/// Unix installs keep it under `share/ghostscript/<version>/lib`, Windows
/// installs under `<gs dir>/lib`.
pub fn template_candidates(install_dir: &Path, version: &str) -> Vec<PathBuf> {
    let prefix = install_dir.join("..");
    vec![
        prefix
            .join("share")
            .join("ghostscript")
            .join(version)
            .join("lib")
            .join(TEMPLATE_NAME),
        prefix.join("lib").join(TEMPLATE_NAME),
    ]
}

/// Runs `<exe> --version` and returns its trimmed output.
///
/// `None` unless the process exits successfully with non-empty output.
pub fn query_version(executable: &Path) -> Option<String> {
    let output = Command::new(executable).arg("--version").output().ok()?;
    if !output.status.success() {
        debug!(exe = %executable.display(), status = %output.status, "version query failed");
        return None;
    }
    let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!version.is_empty()).then_some(version)
}

/// Ghostscript on Unix-like systems: `gs` on `PATH`, then MacPorts and
/// `/usr/local` prefixes.
#[derive(Debug, Clone, Default)]
pub struct UnixGhostscript;

impl UnixGhostscript {
    const EXTRA_DIRS: [&'static str; 2] = ["/opt/local/bin", "/usr/local/bin"];
}

impl ToolLocator for UnixGhostscript {
    fn executable(&self) -> Option<PathBuf> {
        let extra: Vec<PathBuf> = Self::EXTRA_DIRS.iter().map(PathBuf::from).collect();
        find_executable("gs", &extra)
    }
}

/// Ghostscript on Windows: a copy bundled next to the application, then
/// `%PROGRAMFILES%\gs\*`, then `PATH`.
#[derive(Debug, Clone, Default)]
pub struct WindowsGhostscript {
    /// Application directory that may contain a bundled `gs` folder.
    pub app_dir: Option<PathBuf>,
    /// Override for `%PROGRAMFILES%`.
    pub program_files: Option<PathBuf>,
}

impl WindowsGhostscript {
    const BINARIES: [&'static str; 2] = ["gswin64c.exe", "gswin32c.exe"];

    /// Locator rooted at the running executable's directory.
    pub fn from_env() -> Self {
        Self {
            app_dir: std::env::current_exe()
                .ok()
                .and_then(|exe| exe.parent().map(Path::to_path_buf)),
            program_files: std::env::var_os("PROGRAMFILES").map(PathBuf::from),
        }
    }

    fn install_roots(&self) -> Vec<PathBuf> {
        let mut roots = Vec::new();
        if let Some(app) = &self.app_dir {
            roots.push(app.join("gs"));
        }
        let installs = self
            .program_files
            .as_ref()
            .and_then(|pf| std::fs::read_dir(pf.join("gs")).ok());
        if let Some(entries) = installs {
            let mut versions: Vec<PathBuf> = entries
                .filter_map(Result::ok)
                .map(|e| e.path())
                .filter(|p| p.is_dir())
                .collect();
            versions.sort_by(|a, b| b.cmp(a));
            roots.extend(versions);
        }
        roots
    }
}

impl ToolLocator for WindowsGhostscript {
    fn executable(&self) -> Option<PathBuf> {
        for root in self.install_roots() {
            for bin in Self::BINARIES {
                let candidate = root.join("bin").join(bin);
                if candidate.is_file() {
                    return Some(candidate);
                }
            }
        }
        Self::BINARIES
            .iter()
            .find_map(|bin| find_executable(bin, &[]))
    }
}

/// An explicitly configured Ghostscript.
///
/// A pinned version skips the `--version` query.
#[derive(Debug, Clone)]
pub struct PinnedTool {
    executable: PathBuf,
    version: Option<String>,
}

impl PinnedTool {
    /// Uses the executable at `executable`.
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            version: None,
        }
    }

    /// Pins the version instead of probing the executable.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }
}

impl ToolLocator for PinnedTool {
    fn executable(&self) -> Option<PathBuf> {
        if !self.executable.is_file() {
            return None;
        }
        std::path::absolute(&self.executable).ok()
    }

    fn version(&self) -> Option<String> {
        match &self.version {
            Some(v) if !v.trim().is_empty() => Some(v.trim().to_string()),
            Some(_) => None,
            None => query_version(&self.executable()?),
        }
    }
}

/// Returns the locator for the running platform.
pub fn system_locator() -> Box<dyn ToolLocator> {
    if cfg!(windows) {
        Box::new(WindowsGhostscript::from_env())
    } else {
        Box::new(UnixGhostscript)
    }
}

/// Searches `PATH`, then `extra_dirs`, for a file named `name`.
pub fn find_executable(name: impl AsRef<OsStr>, extra_dirs: &[PathBuf]) -> Option<PathBuf> {
    let name = name.as_ref();
    let path_dirs = std::env::var_os("PATH")
        .map(|p| std::env::split_paths(&p).collect::<Vec<_>>())
        .unwrap_or_default();

    path_dirs
        .iter()
        .chain(extra_dirs)
        .map(|dir| dir.join(name))
        .find(|candidate| is_executable(candidate))
        .inspect(|found| trace!(exe = %found.display(), "found executable"))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn template_layouts() {
        let candidates = template_candidates(Path::new("/usr/bin"), "10.02.1");
        assert_eq!(
            candidates[0],
            Path::new("/usr/bin/../share/ghostscript/10.02.1/lib/PDFX_def.ps")
        );
        assert_eq!(candidates[1], Path::new("/usr/bin/../lib/PDFX_def.ps"));
    }

    #[test]
    fn pinned_tool_missing_executable() {
        let dir = tempdir().unwrap();
        let tool = PinnedTool::new(dir.path().join("gs")).with_version("10.0");
        assert!(tool.executable().is_none());
        assert!(tool.install_dir().is_none());
        assert!(tool.template_candidates("10.0").is_empty());
    }

    #[test]
    fn pinned_tool_layout() {
        let dir = tempdir().unwrap();
        let bin = dir.path().join("bin");
        fs::create_dir_all(&bin).unwrap();
        fs::write(bin.join("gs"), b"").unwrap();

        let tool = PinnedTool::new(bin.join("gs")).with_version(" 10.03.0\n");
        assert_eq!(tool.version().as_deref(), Some("10.03.0"));
        assert_eq!(tool.install_dir().unwrap(), std::path::absolute(&bin).unwrap());
        assert!(tool.template_candidates("10.03.0")[0].ends_with("share/ghostscript/10.03.0/lib/PDFX_def.ps"));

        let blank = PinnedTool::new(bin.join("gs")).with_version("  ");
        assert!(blank.version().is_none());
    }

    #[test]
    fn windows_prefers_bundled_copy() {
        let dir = tempdir().unwrap();
        let bundled = dir.path().join("app").join("gs").join("bin");
        let installed = dir.path().join("pf").join("gs").join("gs10.01.0").join("bin");
        fs::create_dir_all(&bundled).unwrap();
        fs::create_dir_all(&installed).unwrap();
        fs::write(bundled.join("gswin32c.exe"), b"").unwrap();
        fs::write(installed.join("gswin64c.exe"), b"").unwrap();

        let locator = WindowsGhostscript {
            app_dir: Some(dir.path().join("app")),
            program_files: Some(dir.path().join("pf")),
        };
        assert_eq!(locator.executable().unwrap(), bundled.join("gswin32c.exe"));

        let locator = WindowsGhostscript {
            app_dir: None,
            program_files: Some(dir.path().join("pf")),
        };
        assert_eq!(locator.executable().unwrap(), installed.join("gswin64c.exe"));
    }

    #[cfg(unix)]
    #[test]
    fn query_version_reads_stdout() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let exe = dir.path().join("gs");
        fs::write(&exe, "#!/bin/sh\necho 10.05.1\n").unwrap();
        fs::set_permissions(&exe, fs::Permissions::from_mode(0o755)).unwrap();
        assert_eq!(query_version(&exe).as_deref(), Some("10.05.1"));

        let failing = dir.path().join("gs-broken");
        fs::write(&failing, "#!/bin/sh\necho oops\nexit 2\n").unwrap();
        fs::set_permissions(&failing, fs::Permissions::from_mode(0o755)).unwrap();
        assert!(query_version(&failing).is_none());

        assert_eq!(PinnedTool::new(&exe).version().as_deref(), Some("10.05.1"));
    }
}
