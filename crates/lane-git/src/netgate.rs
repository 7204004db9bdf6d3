//! Best-effort network gate around push/fetch operations.
//!
//! Some networks require a VPN-style tunnel (warp-cli and friends) before
//! GitHub is reachable. The gate checks the tunnel state, connects when
//! needed, runs the operation, and disconnects afterwards - but only when
//! this call was the one that connected. Everything is best-effort: a missing
//! gate CLI means the operation just runs directly.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::exec;

/// Tunnel state reported by the gate CLI's `status` subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateStatus {
    /// Tunnel is up.
    Connected,
    /// Tunnel is coming up.
    Connecting,
    /// Tunnel is down.
    Disconnected,
    /// Output didn't match any known state (or the CLI failed).
    Unknown,
}

impl GateStatus {
    /// Classify `status` output by its state line.
    #[must_use]
    pub fn parse(output: &str) -> Self {
        if output.contains(": Connected") {
            Self::Connected
        } else if output.contains(": Connecting") {
            Self::Connecting
        } else if output.contains(": Disconnected") {
            Self::Disconnected
        } else {
            Self::Unknown
        }
    }
}

/// Control surface of the gate CLI, separated out for testability.
pub trait GateControl {
    /// Current tunnel state.
    fn status(&self) -> GateStatus;

    /// Request a connection. Returns whether the CLI accepted the request.
    fn connect(&self) -> bool;

    /// Request a disconnect.
    fn disconnect(&self) -> bool;
}

/// [`GateControl`] backed by the external gate CLI.
#[derive(Debug, Clone)]
pub struct GateCli {
    path: PathBuf,
    workdir: PathBuf,
}

impl GateCli {
    /// Wrap a gate CLI binary, running it from `workdir`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, workdir: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            workdir: workdir.into(),
        }
    }

    fn cli(&self, arg: &str) -> exec::CmdOutput {
        exec::run(&self.workdir, &self.path.to_string_lossy(), &[arg])
    }
}

impl GateControl for GateCli {
    fn status(&self) -> GateStatus {
        GateStatus::parse(&self.cli("status").output)
    }

    fn connect(&self) -> bool {
        self.cli("connect").is_success()
    }

    fn disconnect(&self) -> bool {
        self.cli("disconnect").is_success()
    }
}

/// How long to wait for the tunnel to come up, and at what interval.
const READY_TIMEOUT: Duration = Duration::from_secs(15);
const READY_POLL: Duration = Duration::from_millis(500);

/// Scoped network acquisition around an operation.
pub struct NetGate<C: GateControl> {
    control: Option<C>,
    timeout: Duration,
    poll: Duration,
}

impl NetGate<GateCli> {
    /// Gate using a configured or discovered CLI path; `None` disables the
    /// gate entirely.
    #[must_use]
    pub fn discover(configured: Option<&str>, workdir: &Path) -> Self {
        let path = configured
            .map(PathBuf::from)
            .filter(|p| p.exists())
            .or_else(which_gate);
        match &path {
            Some(p) => debug!(path = %p.display(), "network gate enabled"),
            None => debug!("no network gate CLI found - gate disabled"),
        }
        Self::new(path.map(|p| GateCli::new(p, workdir)))
    }
}

fn which_gate() -> Option<PathBuf> {
    which::which("warp-cli").ok().or_else(|| {
        // Conventional install location when not on PATH.
        let default = PathBuf::from("/usr/local/bin/warp-cli");
        default.exists().then_some(default)
    })
}

impl<C: GateControl> NetGate<C> {
    /// Build a gate over an explicit control; `None` makes it a no-op.
    #[must_use]
    pub const fn new(control: Option<C>) -> Self {
        Self {
            control,
            timeout: READY_TIMEOUT,
            poll: READY_POLL,
        }
    }

    /// A gate that never touches the network.
    #[must_use]
    pub const fn disabled() -> Self {
        Self::new(None)
    }

    /// Override the readiness wait (tests).
    #[must_use]
    pub const fn with_timing(mut self, timeout: Duration, poll: Duration) -> Self {
        self.timeout = timeout;
        self.poll = poll;
        self
    }

    /// Run `op` with the tunnel up.
    ///
    /// When the tunnel is already connected the operation runs as-is and the
    /// tunnel is left alone. Otherwise the gate connects, busy-waits for
    /// readiness (bounded), runs the operation, and tears the tunnel back
    /// down on the way out.
    pub fn with_network<T>(&self, op: impl FnOnce() -> T) -> T {
        let Some(control) = &self.control else {
            return op();
        };

        let initiated = control.status() != GateStatus::Connected;
        if initiated {
            debug!("bringing network gate up");
            if !control.connect() {
                warn!("network gate connect request failed - continuing anyway");
            }
            let start = Instant::now();
            while start.elapsed() < self.timeout {
                if control.status() == GateStatus::Connected {
                    break;
                }
                std::thread::sleep(self.poll);
            }
        }

        // Teardown must run on every exit path of the originating call.
        let _guard = TeardownGuard {
            control: initiated.then_some(control),
        };
        op()
    }
}

struct TeardownGuard<'a, C: GateControl> {
    control: Option<&'a C>,
}

impl<C: GateControl> Drop for TeardownGuard<'_, C> {
    fn drop(&mut self) {
        if let Some(control) = self.control {
            debug!("tearing network gate down");
            control.disconnect();
        }
    }
}
