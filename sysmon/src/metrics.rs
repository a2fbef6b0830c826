use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OsIdentity {
    pub system: String,
    pub release: String,
    pub version: String,
    pub processor: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MemoryReading {
    pub used_bytes: u64,
    pub total_bytes: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DiskReading {
    pub mount: String,
    pub used_bytes: u64,
    pub total_bytes: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BatteryReading {
    pub percent: f32,
    pub plugged: bool,
}

/// Cumulative counters and link state for one network interface.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InterfaceReading {
    pub name: String,
    pub is_up: bool,
    pub bytes_sent: u64,
    pub bytes_recv: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessInfo {
    pub pid: u32,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MemoryUsage {
    pub percent: f32,
    pub used_bytes: u64,
    pub total_bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiskUsage {
    pub mount: String,
    pub percent: f32,
    pub used_bytes: u64,
    pub total_bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WifiStatus {
    pub interface: String,
    pub upload_kbps: f64,
    pub download_kbps: f64,
}

/// Everything captured in one tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    pub tick: u64,
    pub os: OsIdentity,
    pub cpu_percent: f32,
    pub memory: MemoryUsage,
    pub disk: Option<DiskUsage>,
    pub battery: Option<BatteryReading>,
    /// `None` when no wireless interface is found or its link is down.
    pub wifi: Option<WifiStatus>,
    pub processes: Vec<ProcessInfo>,
}

impl Sample {
    pub fn wifi_download_kbps(&self) -> f64 {
        self.wifi.as_ref().map(|w| w.download_kbps).unwrap_or(0.0)
    }
}

/// Percent of `used` in `total`, rounded to one decimal. Zero when `total` is zero.
pub fn percent_of(used: u64, total: u64) -> f32 {
    if total == 0 {
        return 0.0;
    }
    round_tenth(used as f64 / total as f64 * 100.0)
}

pub fn round_tenth(value: f64) -> f32 {
    ((value * 10.0).round() / 10.0) as f32
}
