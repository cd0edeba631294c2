//! Output helpers for the wardctl CLI
//!
//! Status lines ("✓ Room 101 saved") go to stdout unless quiet mode is on.
//! Records requested with `show`/`list` are always printed.
//!
//! # Quiet Mode
//!
//! Status lines are suppressed when:
//! - `--quiet` flag is passed
//! - `WARDCTL_QUIET=1` environment variable is set

use std::fmt::Display;
use std::sync::OnceLock;

use anyhow::{bail, Result};
use serde::Serialize;

/// Global quiet mode state
static QUIET_MODE: OnceLock<bool> = OnceLock::new();

/// Initialize quiet mode from the flag and environment
///
/// Call this once at startup with the --quiet flag value.
pub fn init_quiet_mode(quiet_flag: bool) {
    let is_quiet = quiet_flag || std::env::var("WARDCTL_QUIET").map(|v| v == "1").unwrap_or(false);

    QUIET_MODE.set(is_quiet).ok();
}

/// Check if we're in quiet mode
pub fn is_quiet() -> bool {
    *QUIET_MODE.get().unwrap_or(&false)
}

pub fn success(msg: impl Display) {
    if !is_quiet() {
        println!("✓ {msg}");
    }
}

/// Turn a controller outcome into a CLI result.
///
/// Controllers report failure as `false` after logging the reason, so the
/// error here only names the action.
pub fn outcome(ok: bool, done: impl Display, action: impl Display) -> Result<()> {
    if ok {
        success(done);
        Ok(())
    } else {
        bail!("Could not {action} (see log for details)")
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_outcome_names_action() {
        let err = outcome(false, "done", "admit patient 'A B'").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Could not admit patient 'A B' (see log for details)"
        );
        assert!(outcome(true, "done", "anything").is_ok());
    }
}
