//! User-facing progress output.
//!
//! Diagnostics go through the `log` facade; the short progress lines a
//! workflow log shows are written here to an injected stream so tests can
//! capture them.

use camino::Utf8Path;
use std::fmt;
use std::io::Write;

/// Write one line to `stderr`, ignoring failures.
pub fn write_stderr_line(stderr: &mut dyn Write, message: impl fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort progress output; ignore write failures.
    }
}

/// Format the final success line.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use jaab::output::success_message;
///
/// let msg = success_message("Report_V1.0.0-RC1.jmpaddin", Utf8Path::new("/work"), false);
/// assert!(msg.contains("uploaded"));
/// ```
#[must_use]
pub fn success_message(asset_name: &str, work_dir: &Utf8Path, skipped_upload: bool) -> String {
    if skipped_upload {
        format!("Built {asset_name} in {work_dir} (upload skipped)")
    } else {
        format!("Built and uploaded {asset_name}")
    }
}
