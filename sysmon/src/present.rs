use crate::history::TimeSeriesBuffer;
use crate::metrics::{BatteryReading, DiskUsage, MemoryUsage, OsIdentity, ProcessInfo, Sample, WifiStatus};
use crate::theme;
use egui::Color32;

const MB: u64 = 1024 * 1024;
const GB: u64 = 1024 * 1024 * 1024;

pub const BATTERY_UNAVAILABLE: &str = "Battery: Not Available";
pub const WIFI_NOT_CONNECTED: &str = "WiFi Interface: Not Connected or Not Found";
pub const DISK_UNAVAILABLE: &str = "Disk Usage: Not Available";

/// Label text for the two tabs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dashboard {
    pub os: String,
    pub cpu: String,
    pub ram: String,
    pub disk: String,
    pub battery: String,
    pub network: String,
    pub processes: Vec<String>,
}

impl Dashboard {
    pub fn from_sample(sample: &Sample) -> Self {
        Self {
            os: format_os(&sample.os),
            cpu: format_cpu(sample.cpu_percent),
            ram: format_ram(&sample.memory),
            disk: format_disk(sample.disk.as_ref()),
            battery: format_battery(sample.battery.as_ref()),
            network: format_network(sample.wifi.as_ref()),
            processes: sample.processes.iter().map(format_process).collect(),
        }
    }
}

pub fn format_os(os: &OsIdentity) -> String {
    format!(
        "System: {} {} ({})\nProcessor: {}",
        os.system, os.release, os.version, os.processor
    )
}

// Percentages use Debug formatting so whole values keep their ".0".
pub fn format_cpu(percent: f32) -> String {
    format!("CPU Usage: {:?}%", percent)
}

pub fn format_ram(mem: &MemoryUsage) -> String {
    format!(
        "RAM Usage: {:?}% ({} MB / {} MB)",
        mem.percent,
        mem.used_bytes / MB,
        mem.total_bytes / MB
    )
}

pub fn format_disk(disk: Option<&DiskUsage>) -> String {
    match disk {
        Some(d) => format!(
            "Disk Usage ({}): {:?}% ({} GB / {} GB)",
            d.mount,
            d.percent,
            d.used_bytes / GB,
            d.total_bytes / GB
        ),
        None => DISK_UNAVAILABLE.to_string(),
    }
}

pub fn format_battery(battery: Option<&BatteryReading>) -> String {
    match battery {
        Some(b) => {
            let plugged = if b.plugged { "Plugged In" } else { "Not Plugged" };
            format!("Battery: {:?}% - {}", b.percent, plugged)
        }
        None => BATTERY_UNAVAILABLE.to_string(),
    }
}

pub fn format_network(wifi: Option<&WifiStatus>) -> String {
    match wifi {
        Some(w) => format!(
            "WiFi Interface: {} | Upload: {:.2} KB/s | Download: {:.2} KB/s",
            w.interface, w.upload_kbps, w.download_kbps
        ),
        None => WIFI_NOT_CONNECTED.to_string(),
    }
}

pub fn format_process(process: &ProcessInfo) -> String {
    format!("PID: {} - {}", process.pid, process.name)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: &'static str,
    pub color: Color32,
    pub points: Vec<[f64; 2]>,
}

/// Everything the chart needs for one full redraw.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartModel {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub y_min: f64,
    pub y_max: f64,
    pub series: Vec<Series>,
}

impl ChartModel {
    pub fn from_history(history: &TimeSeriesBuffer, floor: f64, headroom: f64) -> Self {
        Self {
            title: "CPU & RAM Usage and WiFi Download Speed Over Time",
            x_label: "Time (s)",
            y_label: "Usage (%) / Speed (KB/s)",
            y_min: 0.0,
            y_max: y_upper_bound(history, floor, headroom),
            series: vec![
                Series { name: "CPU (%)", color: theme::CPU_SERIES, points: history.cpu() },
                Series { name: "RAM (%)", color: theme::RAM_SERIES, points: history.ram() },
                Series {
                    name: "WiFi Download Speed (KB/s)",
                    color: theme::WIFI_SERIES,
                    points: history.wifi_download(),
                },
            ],
        }
    }
}

/// `max(floor, peak download + headroom)`, so percentages and throughput both fit.
pub fn y_upper_bound(history: &TimeSeriesBuffer, floor: f64, headroom: f64) -> f64 {
    floor.max(history.max_wifi_download() + headroom)
}

/// Appends this tick's chart point.
pub fn record(history: &mut TimeSeriesBuffer, sample: &Sample) {
    history.push(
        sample.cpu_percent as f64,
        sample.memory.percent as f64,
        sample.wifi_download_kbps(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mem(used: u64, total: u64) -> MemoryUsage {
        MemoryUsage { percent: 25.0, used_bytes: used, total_bytes: total }
    }

    #[test]
    fn ram_uses_truncating_megabytes() {
        assert_eq!(format_ram(&mem(2 * MB, 8 * MB)), "RAM Usage: 25.0% (2 MB / 8 MB)");
        assert_eq!(format_ram(&mem(2 * MB + MB - 1, 8 * MB)), "RAM Usage: 25.0% (2 MB / 8 MB)");
    }

    #[test]
    fn disk_uses_truncating_gigabytes() {
        let disk = DiskUsage {
            mount: "/".to_string(),
            percent: 37.5,
            used_bytes: 3 * GB + GB / 2,
            total_bytes: 10 * GB,
        };
        assert_eq!(format_disk(Some(&disk)), "Disk Usage (/): 37.5% (3 GB / 10 GB)");
        assert_eq!(format_disk(None), DISK_UNAVAILABLE);
    }

    #[test]
    fn battery_labels() {
        assert_eq!(format_battery(None), "Battery: Not Available");
        let charging = BatteryReading { percent: 81.0, plugged: true };
        assert_eq!(format_battery(Some(&charging)), "Battery: 81.0% - Plugged In");
        let draining = BatteryReading { percent: 42.5, plugged: false };
        assert_eq!(format_battery(Some(&draining)), "Battery: 42.5% - Not Plugged");
    }

    #[test]
    fn network_rates_have_two_decimals() {
        let wifi = WifiStatus { interface: "Wi-Fi".to_string(), upload_kbps: 1.5, download_kbps: 10.0 / 3.0 };
        assert_eq!(
            format_network(Some(&wifi)),
            "WiFi Interface: Wi-Fi | Upload: 1.50 KB/s | Download: 3.33 KB/s"
        );
        assert_eq!(format_network(None), WIFI_NOT_CONNECTED);
    }

    #[test]
    fn os_label_has_two_lines() {
        let os = OsIdentity {
            system: "Linux".to_string(),
            release: "6.1.0".to_string(),
            version: "#1 SMP".to_string(),
            processor: "AMD Ryzen".to_string(),
        };
        assert_eq!(format_os(&os), "System: Linux 6.1.0 (#1 SMP)\nProcessor: AMD Ryzen");
    }

    #[test]
    fn process_line() {
        let p = ProcessInfo { pid: 4242, name: "cargo".to_string() };
        assert_eq!(format_process(&p), "PID: 4242 - cargo");
    }

    #[test]
    fn y_bound_never_below_floor_or_peak_plus_headroom() {
        let mut history = TimeSeriesBuffer::new(60);
        assert_eq!(y_upper_bound(&history, 100.0, 10.0), 100.0);

        history.push(50.0, 50.0, 95.0);
        assert_eq!(y_upper_bound(&history, 100.0, 10.0), 105.0);

        for download in [0.0, 3.5, 720.25, 12.0] {
            history.push(10.0, 20.0, download);
            let bound = y_upper_bound(&history, 100.0, 10.0);
            assert!(bound >= 100.0);
            assert!(bound >= history.max_wifi_download() + 10.0);
        }
        assert_eq!(y_upper_bound(&history, 100.0, 10.0), 730.25);
    }

    #[test]
    fn chart_has_three_aligned_series() {
        let mut history = TimeSeriesBuffer::new(60);
        history.push(1.0, 2.0, 3.0);
        history.push(4.0, 5.0, 6.0);
        let chart = ChartModel::from_history(&history, 100.0, 10.0);
        assert_eq!(chart.series.len(), 3);
        assert!(chart.series.iter().all(|s| s.points.len() == 2));
        assert_eq!(chart.series[2].points, vec![[0.0, 3.0], [1.0, 6.0]]);
        assert_eq!((chart.y_min, chart.y_max), (0.0, 100.0));
    }
}
