use std::sync::Mutex;
use std::time::{Duration, Instant};

#[cfg(feature = "cli")]
use sysinfo::{Pid, RefreshKind, System};

#[derive(Debug, Clone)]
pub struct PhaseStats {
    pub phase: String,
    pub phase_time: Duration,
    pub elapsed_time: Duration,
    pub cpu_usage: Option<f32>,
    pub memory_usage_mb: Option<u64>,
    pub peak_memory_mb: Option<u64>,
}

/// Tracks how long each pipeline phase took. With the `cli` feature it also
/// samples the process' CPU and memory through sysinfo.
pub struct SystemMonitor {
    enabled: bool,
    start_time: Instant,
    last_mark: Mutex<Instant>,
    peak_memory: Mutex<u64>,
    #[cfg(feature = "cli")]
    system: Mutex<System>,
    #[cfg(feature = "cli")]
    pid: Option<Pid>,
}

impl SystemMonitor {
    pub fn new(enabled: bool) -> Self {
        let now = Instant::now();

        #[cfg(feature = "cli")]
        let (system, pid) = {
            let mut system = System::new_with_specifics(RefreshKind::everything());
            if enabled {
                system.refresh_all();
            }
            (system, sysinfo::get_current_pid().ok())
        };

        Self {
            enabled,
            start_time: now,
            last_mark: Mutex::new(now),
            peak_memory: Mutex::new(0),
            #[cfg(feature = "cli")]
            system: Mutex::new(system),
            #[cfg(feature = "cli")]
            pid,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Closes the current phase and returns its stats. `None` when disabled.
    pub fn mark(&self, phase: &str) -> Option<PhaseStats> {
        if !self.enabled {
            return None;
        }

        let now = Instant::now();
        let phase_time = {
            let mut last = self.last_mark.lock().ok()?;
            let took = now.duration_since(*last);
            *last = now;
            took
        };

        let (cpu_usage, memory_usage_mb) = self.sample();
        let peak_memory_mb = match memory_usage_mb {
            Some(mb) => {
                let mut peak = self.peak_memory.lock().ok()?;
                *peak = (*peak).max(mb);
                Some(*peak)
            }
            None => None,
        };

        Some(PhaseStats {
            phase: phase.to_string(),
            phase_time,
            elapsed_time: now.duration_since(self.start_time),
            cpu_usage,
            memory_usage_mb,
            peak_memory_mb,
        })
    }

    #[cfg(feature = "cli")]
    fn sample(&self) -> (Option<f32>, Option<u64>) {
        let Some(pid) = self.pid else {
            return (None, None);
        };
        let Ok(mut system) = self.system.lock() else {
            return (None, None);
        };
        system.refresh_all();
        match system.process(pid) {
            Some(process) => (
                Some(process.cpu_usage()),
                Some(process.memory() / 1024 / 1024),
            ),
            None => (None, None),
        }
    }

    #[cfg(not(feature = "cli"))]
    fn sample(&self) -> (Option<f32>, Option<u64>) {
        (None, None)
    }

    pub fn log_stats(&self, phase: &str) {
        if let Some(stats) = self.mark(phase) {
            match (stats.cpu_usage, stats.memory_usage_mb) {
                (Some(cpu), Some(mem)) => tracing::info!(
                    "📊 {} took {:?} - CPU: {:.1}%, Memory: {}MB, Peak: {}MB",
                    stats.phase,
                    stats.phase_time,
                    cpu,
                    mem,
                    stats.peak_memory_mb.unwrap_or(mem)
                ),
                _ => tracing::info!("📊 {} took {:?}", stats.phase, stats.phase_time),
            }
        }
    }

    pub fn log_final_stats(&self) {
        if !self.enabled {
            return;
        }
        let peak = self.peak_memory.lock().map(|p| *p).unwrap_or(0);
        tracing::info!(
            "📊 Final Stats - Total Time: {:?}, Peak Memory: {}MB",
            self.start_time.elapsed(),
            peak
        );
    }
}

impl Default for SystemMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}
