use crate::config::MonitorConfig;
use crate::error::MetricsError;
use crate::metrics::{percent_of, DiskUsage, InterfaceReading, MemoryUsage, Sample, WifiStatus};
use crate::source::MetricsSource;
use std::collections::HashSet;

/// Cumulative counters from the previous read of the selected interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Baseline {
    pub interface: String,
    pub bytes_sent: u64,
    pub bytes_recv: u64,
}

#[derive(Debug, Clone, Default)]
pub struct NetworkDeltaState {
    baseline: Option<Baseline>,
}

impl NetworkDeltaState {
    /// Upload and download rate in KB/s over the nominal one second tick.
    /// The first read for an interface only records the baseline and reports 0.
    pub fn update(&mut self, reading: &InterfaceReading) -> (f64, f64) {
        let rates = match &self.baseline {
            Some(prev) if prev.interface == reading.name => (
                reading.bytes_sent.saturating_sub(prev.bytes_sent) as f64 / 1024.0,
                reading.bytes_recv.saturating_sub(prev.bytes_recv) as f64 / 1024.0,
            ),
            _ => (0.0, 0.0),
        };
        self.baseline = Some(Baseline {
            interface: reading.name.clone(),
            bytes_sent: reading.bytes_sent,
            bytes_recv: reading.bytes_recv,
        });
        rates
    }

    pub fn reset(&mut self) {
        self.baseline = None;
    }

    #[cfg(test)]
    pub fn baseline(&self) -> Option<&Baseline> {
        self.baseline.as_ref()
    }
}

/// First interface whose name contains one of `patterns`, case-insensitively.
pub fn find_wifi<'a>(interfaces: &'a [InterfaceReading], patterns: &[String]) -> Option<&'a InterfaceReading> {
    interfaces.iter().find(|iface| {
        let name = iface.name.to_lowercase();
        patterns.iter().any(|p| name.contains(&p.to_lowercase()))
    })
}

pub struct Sampler {
    wifi_patterns: Vec<String>,
    root_mount: String,
    network: NetworkDeltaState,
    selected: Option<String>,
    warned: HashSet<&'static str>,
    tick: u64,
}

impl Sampler {
    pub fn new(config: &MonitorConfig) -> Self {
        Self {
            wifi_patterns: config.wifi_patterns.clone(),
            root_mount: config.root_mount.clone(),
            network: NetworkDeltaState::default(),
            selected: None,
            warned: HashSet::new(),
            tick: 0,
        }
    }

    #[cfg(test)]
    pub fn network(&self) -> &NetworkDeltaState {
        &self.network
    }

    /// Reads one sample. A failing reading degrades to an absent field.
    pub fn sample<S: MetricsSource + ?Sized>(&mut self, source: &mut S) -> Sample {
        source.refresh();

        let memory = source.memory();
        let memory = MemoryUsage {
            percent: percent_of(memory.used_bytes, memory.total_bytes),
            used_bytes: memory.used_bytes,
            total_bytes: memory.total_bytes,
        };

        let disk = match source.disk(&self.root_mount) {
            Ok(d) => Some(DiskUsage {
                percent: percent_of(d.used_bytes, d.total_bytes),
                mount: d.mount,
                used_bytes: d.used_bytes,
                total_bytes: d.total_bytes,
            }),
            Err(e) => {
                self.degraded("disk", &e);
                None
            }
        };

        let battery = match source.battery() {
            Ok(b) => b,
            Err(e) => {
                self.degraded("battery", &e);
                None
            }
        };

        let wifi = self.sample_wifi(&source.interfaces());

        let mut skipped = 0usize;
        let processes: Vec<_> = source
            .processes()
            .filter_map(|entry| match entry {
                Ok(info) => Some(info),
                Err(_) => {
                    skipped += 1;
                    None
                }
            })
            .collect();
        if skipped > 0 {
            tracing::debug!(skipped, "skipped unreadable processes");
        }

        let sample = Sample {
            tick: self.tick,
            os: source.os_identity(),
            cpu_percent: source.cpu_percent(),
            memory,
            disk,
            battery,
            wifi,
            processes,
        };
        self.tick += 1;
        sample
    }

    fn sample_wifi(&mut self, interfaces: &[InterfaceReading]) -> Option<WifiStatus> {
        let found = find_wifi(interfaces, &self.wifi_patterns).filter(|iface| iface.is_up);
        let name = found.map(|iface| iface.name.clone());

        if name != self.selected {
            match (&self.selected, &name) {
                (None, Some(new)) => tracing::info!(interface = %new, "wireless interface connected"),
                (Some(old), None) => tracing::info!(interface = %old, "wireless interface lost"),
                (Some(old), Some(new)) => tracing::info!(from = %old, to = %new, "wireless interface switched"),
                (None, None) => {}
            }
            self.selected = name;
        }

        let Some(iface) = found else {
            self.network.reset();
            return None;
        };
        let (upload_kbps, download_kbps) = self.network.update(iface);
        Some(WifiStatus {
            interface: iface.name.clone(),
            upload_kbps,
            download_kbps,
        })
    }

    // Warn the first time a metric degrades, then keep quiet.
    fn degraded(&mut self, metric: &'static str, err: &MetricsError) {
        if self.warned.insert(metric) {
            tracing::warn!(metric, error = %err, "metric unavailable");
        } else {
            tracing::debug!(metric, error = %err, "metric unavailable");
        }
    }
}
