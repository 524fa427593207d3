//! Process resident-memory sampling.

use std::sync::Mutex;
use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Samples this process's resident set size in megabytes.
///
/// A sample is `None` when the platform is unsupported or the process
/// cannot be inspected; sampling never fails.
pub struct MemorySampler {
    pid: Option<Pid>,
    system: Mutex<System>,
}

impl MemorySampler {
    pub fn new() -> Self {
        let pid = if sysinfo::IS_SUPPORTED_SYSTEM {
            sysinfo::get_current_pid().ok()
        } else {
            None
        };
        Self {
            pid,
            system: Mutex::new(System::new()),
        }
    }

    /// A sampler that never measures anything.
    pub fn disabled() -> Self {
        Self {
            pid: None,
            system: Mutex::new(System::new()),
        }
    }

    pub fn sample_mb(&self) -> Option<f64> {
        let pid = self.pid?;
        let mut system = self.system.lock().ok()?;
        system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[pid]),
            true,
            ProcessRefreshKind::nothing().with_memory(),
        );
        let bytes = system.process(pid)?.memory();
        Some(bytes as f64 / BYTES_PER_MB)
    }
}

impl Default for MemorySampler {
    fn default() -> Self {
        Self::new()
    }
}
