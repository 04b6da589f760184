//! Ghostscript invocation.

use crate::{JobError, JobResult, ToolLocator};
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};
use std::time::Instant;
use tracing::{debug, info, trace};

/// A successful Ghostscript run.
#[derive(Debug, Clone)]
pub struct ConversionOutcome {
    /// Executable that ran.
    pub executable: PathBuf,
    /// Captured stdout followed by stderr.
    pub output: String,
}

/// Runs Ghostscript with `args` and waits for it to exit.
///
/// Blocking and single-shot. A non-zero exit is returned as
/// [`JobError::ConversionFailed`] carrying everything the tool printed.
pub fn run_conversion(tool: &dyn ToolLocator, args: &[OsString]) -> JobResult<ConversionOutcome> {
    let executable = tool.executable().ok_or(JobError::ToolNotFound)?;
    trace!(exe = %executable.display(), args = args.len(), "run_conversion");

    let start = Instant::now();
    let result = Command::new(&executable)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .map_err(JobError::Spawn)?;
    debug!(status = %result.status, elapsed_ms = start.elapsed().as_millis() as u64, "ghostscript exited");

    let output = combined_output(&result);
    if !result.status.success() {
        return Err(JobError::ConversionFailed {
            code: result.status.code(),
            output,
        });
    }

    info!(exe = %executable.display(), "conversion finished");
    Ok(ConversionOutcome { executable, output })
}

fn combined_output(result: &Output) -> String {
    let mut text = String::from_utf8_lossy(&result.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&result.stderr));
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PinnedTool;
    use tempfile::tempdir;

    #[test]
    fn missing_tool() {
        let dir = tempdir().unwrap();
        let tool = PinnedTool::new(dir.path().join("gs"));
        assert!(matches!(run_conversion(&tool, &[]), Err(JobError::ToolNotFound)));
    }

    #[cfg(unix)]
    fn script(dir: &std::path::Path, name: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;
        let path = dir.join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[cfg(unix)]
    #[test]
    fn success_captures_output() {
        let dir = tempdir().unwrap();
        let exe = script(dir.path(), "gs", r#"echo "args: $*""#);
        let tool = PinnedTool::new(&exe);

        let outcome = run_conversion(&tool, &["-dBATCH".into(), "in.pdf".into()]).unwrap();
        assert_eq!(outcome.output, "args: -dBATCH in.pdf\n");
        assert_eq!(outcome.executable, std::path::absolute(&exe).unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn failure_keeps_stdout_and_stderr() {
        let dir = tempdir().unwrap();
        let exe = script(
            dir.path(),
            "gs",
            "echo 'GPL Ghostscript'\necho 'Error: /undefinedfilename' >&2\nexit 1",
        );
        let tool = PinnedTool::new(&exe);

        match run_conversion(&tool, &[]) {
            Err(err @ JobError::ConversionFailed { .. }) => {
                assert!(err.is_process_failure());
                let JobError::ConversionFailed { code, output } = err else {
                    unreachable!()
                };
                assert_eq!(code, Some(1));
                assert_eq!(output, "GPL Ghostscript\nError: /undefinedfilename\n");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn unlaunchable_file_is_spawn_error() {
        let dir = tempdir().unwrap();
        let exe = dir.path().join("gs");
        std::fs::write(&exe, b"not a program").unwrap();
        let tool = PinnedTool::new(&exe);
        assert!(matches!(run_conversion(&tool, &[]), Err(JobError::Spawn(_))));
    }
}
