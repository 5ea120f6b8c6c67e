use std::os::unix::process::CommandExt;
use std::process::{Command, Stdio};

use tracing::warn;

/// Launch `bin` detached from the compositor: stdio nulled, own session.
/// Returns immediately; the child is never waited on and failures past
/// exec are not observable. Hosts are expected to ignore SIGCHLD so the
/// children get reaped by the kernel.
pub fn spawn(bin: &str) {
    if bin.is_empty() {
        return;
    }

    let mut command = Command::new(bin);
    command.stdin(Stdio::null()).stdout(Stdio::null()).stderr(Stdio::null());
    unsafe {
        command.pre_exec(|| {
            let _ = nix::unistd::setsid();
            Ok(())
        });
    }

    match command.spawn() {
        Ok(child) => drop(child),
        Err(err) => warn!("failed to spawn '{bin}': {err}"),
    }
}
