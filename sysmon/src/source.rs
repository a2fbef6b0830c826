use crate::error::{MetricsError, Result};
use crate::metrics::{
    round_tenth, BatteryReading, DiskReading, InterfaceReading, MemoryReading, OsIdentity,
    ProcessInfo,
};
use std::collections::HashSet;
use std::io;
use std::path::Path;
use sysinfo::{
    DiskExt, NetworkExt, NetworksExt, PidExt, ProcessExt, ProcessStatus, ProcessorExt, System,
    SystemExt,
};
use systemstat::Platform;

/// The queries a tick makes against the host.
///
/// `refresh` is called once per tick before any reading, so every reading in
/// a tick comes from the same refresh.
pub trait MetricsSource {
    fn refresh(&mut self);
    fn os_identity(&self) -> OsIdentity;
    fn cpu_percent(&self) -> f32;
    fn memory(&self) -> MemoryReading;
    fn disk(&self, mount: &str) -> Result<DiskReading>;
    /// `Ok(None)` when the host has no battery.
    fn battery(&self) -> Result<Option<BatteryReading>>;
    fn interfaces(&self) -> Vec<InterfaceReading>;
    /// Lazily walks the process table. Entries that vanished or cannot be
    /// read come back as errors and the walk continues past them.
    fn processes(&self) -> Box<dyn Iterator<Item = Result<ProcessInfo>> + '_>;
}

pub struct HostSource {
    system: System,
    stats: systemstat::System,
    addressed: HashSet<String>,
}

impl HostSource {
    pub fn new() -> Self {
        // Empty system: the first refresh fills it in. The first CPU reading
        // is 0 since sysinfo needs two refreshes to compute usage.
        Self {
            system: System::new(),
            stats: systemstat::System::new(),
            addressed: HashSet::new(),
        }
    }

    fn link_is_up(&self, name: &str) -> bool {
        link_up(operstate(name).as_deref(), self.addressed.contains(name))
    }
}

/// `operstate` wins unless it is missing or `unknown`; then an interface
/// counts as up when it has an address.
fn link_up(operstate: Option<&str>, addressed: bool) -> bool {
    match operstate {
        Some(state) if state != "unknown" => state == "up",
        _ => addressed,
    }
}

/// Maps systemstat's battery readings. It reports "no battery" as a
/// `NotFound` or `Other` IO error depending on platform.
fn battery_from(capacity: io::Result<f32>, on_ac: io::Result<bool>) -> Result<Option<BatteryReading>> {
    match capacity {
        Ok(capacity) => Ok(Some(BatteryReading {
            percent: round_tenth(capacity as f64 * 100.0),
            plugged: on_ac.unwrap_or(false),
        })),
        Err(e) if matches!(e.kind(), io::ErrorKind::NotFound | io::ErrorKind::Other) => Ok(None),
        Err(e) => Err(MetricsError::Battery(e.to_string())),
    }
}

fn process_entry(pid: u32, name: &str, status: ProcessStatus) -> Result<ProcessInfo> {
    match status {
        ProcessStatus::Zombie | ProcessStatus::Dead => Err(MetricsError::NoSuchProcess(pid)),
        _ => Ok(ProcessInfo { pid, name: name.to_string() }),
    }
}

#[cfg(target_os = "linux")]
fn operstate(name: &str) -> Option<String> {
    std::fs::read_to_string(format!("/sys/class/net/{}/operstate", name))
        .ok()
        .map(|s| s.trim().to_string())
}

#[cfg(not(target_os = "linux"))]
fn operstate(_name: &str) -> Option<String> {
    None
}

impl Default for HostSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsSource for HostSource {
    fn refresh(&mut self) {
        self.system.refresh_cpu();
        self.system.refresh_memory();
        // re-lists mounts and reads their usage in one pass
        self.system.refresh_disks_list();
        self.system.refresh_networks_list();
        self.system.refresh_processes();

        self.addressed.clear();
        if let Ok(networks) = self.stats.networks() {
            for (name, network) in networks {
                let has_addr = network.addrs.iter().any(|a| {
                    matches!(a.addr, systemstat::IpAddr::V4(_) | systemstat::IpAddr::V6(_))
                });
                if has_addr {
                    self.addressed.insert(name);
                }
            }
        }
    }

    fn os_identity(&self) -> OsIdentity {
        let processor = self
            .system
            .processors()
            .first()
            .map(|p| p.brand().trim().to_string())
            .unwrap_or_default();
        OsIdentity {
            system: self.system.name().unwrap_or_else(|| std::env::consts::OS.to_string()),
            release: self.system.kernel_version().unwrap_or_default(),
            version: self.system.os_version().unwrap_or_default(),
            processor,
        }
    }

    fn cpu_percent(&self) -> f32 {
        round_tenth(self.system.global_processor_info().cpu_usage() as f64)
    }

    fn memory(&self) -> MemoryReading {
        // sysinfo 0.23 reports memory in KiB
        MemoryReading {
            used_bytes: self.system.used_memory() * 1024,
            total_bytes: self.system.total_memory() * 1024,
        }
    }

    fn disk(&self, mount: &str) -> Result<DiskReading> {
        let disk = self
            .system
            .disks()
            .iter()
            .find(|d| d.mount_point() == Path::new(mount))
            .ok_or_else(|| MetricsError::DiskNotFound(mount.to_string()))?;
        let total = disk.total_space();
        Ok(DiskReading {
            mount: mount.to_string(),
            used_bytes: total.saturating_sub(disk.available_space()),
            total_bytes: total,
        })
    }

    fn battery(&self) -> Result<Option<BatteryReading>> {
        match self.stats.battery_life() {
            Ok(life) => battery_from(Ok(life.remaining_capacity), self.stats.on_ac_power()),
            Err(e) => battery_from(Err(e), Ok(false)),
        }
    }

    fn interfaces(&self) -> Vec<InterfaceReading> {
        let mut interfaces: Vec<_> = self
            .system
            .networks()
            .iter()
            .map(|(name, data)| InterfaceReading {
                name: name.clone(),
                is_up: self.link_is_up(name),
                bytes_sent: data.total_transmitted(),
                bytes_recv: data.total_received(),
            })
            .collect();
        // stable order so the same interface wins every tick
        interfaces.sort_by(|a, b| a.name.cmp(&b.name));
        interfaces
    }

    fn processes(&self) -> Box<dyn Iterator<Item = Result<ProcessInfo>> + '_> {
        let mut table: Vec<_> = self.system.processes().values().collect();
        table.sort_by_key(|p| p.pid().as_u32());
        Box::new(
            table
                .into_iter()
                .map(|p| process_entry(p.pid().as_u32(), p.name(), p.status())),
        )
    }
}
