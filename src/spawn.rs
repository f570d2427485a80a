//! Child-process spawning: launcher/key-bound commands, scratchpad
//! commands, and autostart scripts.
//!
//! Grounded on `spawn.c` in `original_source/src/`: every spawned child
//! closes the inherited X socket, starts a new session so it survives a
//! WM restart, resets `SIGCHLD` to its default disposition (the parent
//! globally ignores it, see [`ignore_sigchld`]), then `execvp`s. Spec §5
//! "Child processes".

use std::ffi::CString;
use std::os::unix::io::RawFd;
use std::path::{Path, PathBuf};

use nix::sys::signal::{self, SigHandler, Signal};
use nix::sys::wait::{WaitPidFlag, WaitStatus};
use nix::unistd::{self, ForkResult};
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Install the process-wide `SIGCHLD` disposition used for the whole
/// lifetime of the window manager: ignored, with `NOCLDWAIT` behaviour so
/// exited children never linger as zombies (spec §5, "SIGCHLD is
/// globally ignored with NOCLDWAIT"). `nix`'s `signal()` alone does not
/// expose `SA_NOCLDWAIT`; reaping any already-exited child with a
/// non-blocking `waitpid` loop after installing the ignore handler gets
/// the same outcome for children forked before this call.
pub fn ignore_sigchld() -> Result<()> {
    unsafe { signal::signal(Signal::SIGCHLD, SigHandler::SigIgn) }.map_err(Error::Errno)?;
    reap_zombies();
    Ok(())
}

fn reap_zombies() {
    loop {
        match nix::sys::wait::waitpid(None, Some(WaitPidFlag::WNOHANG)) {
            Ok(WaitStatus::Exited(..)) | Ok(WaitStatus::Signaled(..)) => continue,
            _ => break,
        }
    }
}

/// Fork and `execvp` a command, detaching it from the window manager.
/// `x_fd` is the X connection's socket, closed in the child before
/// `execvp` so the spawned process never inherits it (spec §5). Grounded
/// on `spawn()` in `original_source/src/spawn.c`.
pub fn spawn(argv: &[&str], x_fd: RawFd) -> Result<()> {
    let Some((prog, args)) = argv.split_first() else {
        return Ok(());
    };
    let prog_c = CString::new(*prog).map_err(|_| Error::Raw("argv[0] contains a NUL byte".into()))?;
    let args_c: Vec<CString> = argv
        .iter()
        .map(|a| CString::new(*a).map_err(|_| Error::Raw("argv contains a NUL byte".into())))
        .collect::<Result<_>>()?;
    let _ = args;

    match unsafe { unistd::fork() }.map_err(Error::Errno)? {
        ForkResult::Parent { child, .. } => {
            debug!(?child, cmd = *prog, "spawned child process");
            Ok(())
        }
        ForkResult::Child => {
            let _ = unistd::close(x_fd);
            let _ = unistd::setsid();
            // A forked child resets SIGCHLD to default: the parent's
            // ignore handler would otherwise be inherited, surprising
            // e.g. shells that rely on reaping their own children.
            unsafe { signal::signal(Signal::SIGCHLD, SigHandler::SigDfl) }.ok();
            let _ = unistd::execvp(&prog_c, &args_c);
            // execvp only returns on failure.
            std::process::exit(1);
        }
    }
}

/// Spawn a scratchpad's configured command (spec §4.2 "not found ⇒ spawn
/// the scratchpad's configured command"). Identical to [`spawn`]; kept as
/// a distinct entry point matching the original's separate
/// `spawnscratch()` so call sites read the same way the C source does.
pub fn spawn_scratch(argv: &[&str], x_fd: RawFd) -> Result<()> {
    spawn(argv, x_fd)
}

/// Locate the autostart script directory per spec §6 "Autostart":
/// `$XDG_DATA_HOME/awm`, falling back to `~/.local/share/awm`, then
/// `~/.awm`. Grounded on `runautostart()` in `original_source/src/spawn.c`.
fn autostart_dir() -> Option<PathBuf> {
    let home = std::env::var_os("HOME").map(PathBuf::from)?;

    if let Some(xdg) = std::env::var_os("XDG_DATA_HOME").filter(|v| !v.is_empty()) {
        let dir = PathBuf::from(xdg).join("awm");
        if dir.is_dir() {
            return Some(dir);
        }
    }
    let local_share = home.join(".local/share/awm");
    if local_share.is_dir() {
        return Some(local_share);
    }
    let dot_awm = home.join(".awm");
    if dot_awm.is_dir() {
        return Some(dot_awm);
    }
    None
}

fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// Run `autostart_blocking.sh` synchronously (if present and executable),
/// then launch `autostart.sh` in the background. Skipped entirely after a
/// restart (spec §6 "Restart": `RESTARTED=1` suppresses autostart).
/// Grounded on `runautostart()` in `original_source/src/spawn.c`.
pub fn run_autostart(restarted: bool) {
    if restarted {
        debug!("RESTARTED=1, skipping autostart scripts");
        return;
    }
    let Some(dir) = autostart_dir() else {
        return;
    };

    let blocking = dir.join("autostart_blocking.sh");
    if is_executable(&blocking) {
        match std::process::Command::new(&blocking).status() {
            Ok(status) if !status.success() => {
                warn!(?status, path = %blocking.display(), "autostart_blocking.sh exited non-zero");
            }
            Err(e) => warn!(error = %e, path = %blocking.display(), "failed to run autostart_blocking.sh"),
            _ => {}
        }
    }

    let background = dir.join("autostart.sh");
    if is_executable(&background) {
        match std::process::Command::new(&background).spawn() {
            Ok(child) => debug!(pid = child.id(), "autostart.sh launched"),
            Err(e) => warn!(error = %e, path = %background.display(), "failed to run autostart.sh"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn autostart_dir_prefers_xdg_data_home() {
        let tmp = std::env::temp_dir().join(format!("awm-test-xdg-{}", std::process::id()));
        let awm_dir = tmp.join("awm");
        std::fs::create_dir_all(&awm_dir).unwrap();

        std::env::set_var("XDG_DATA_HOME", &tmp);
        std::env::set_var("HOME", &tmp);
        assert_eq!(autostart_dir(), Some(awm_dir.clone()));

        std::env::remove_var("XDG_DATA_HOME");
        std::fs::remove_dir_all(&tmp).ok();
    }
}
