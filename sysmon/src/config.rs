use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Clone, Serialize)]
pub struct MonitorConfig {
    pub window_title: String,
    pub window_size: (f32, f32),
    pub icon_path: String,
    pub tick_interval_ms: u64,
    pub history_capacity: usize,
    /// Case-insensitive substrings that mark an interface as wireless.
    pub wifi_patterns: Vec<String>,
    pub root_mount: String,
    pub chart_floor: f64,
    pub chart_headroom: f64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            window_title: "System Monitor - Detailed Info with Graphs".to_string(),
            window_size: (900.0, 700.0),
            icon_path: "sysmon.png".to_string(),
            tick_interval_ms: 1000,
            history_capacity: 60,
            wifi_patterns: vec!["wi-fi".to_string(), "wireless".to_string()],
            root_mount: "/".to_string(),
            chart_floor: 100.0,
            chart_headroom: 10.0,
        }
    }
}

impl MonitorConfig {
    /// Everything is compiled in; there is no file or environment lookup.
    pub fn load() -> Self {
        Self::default()
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_dashboard_constants() {
        let config = MonitorConfig::load();
        assert_eq!(config.tick_interval(), Duration::from_secs(1));
        assert_eq!(config.history_capacity, 60);
        assert_eq!(config.wifi_patterns, vec!["wi-fi", "wireless"]);
        assert_eq!(config.root_mount, "/");
        assert_eq!(config.window_size, (900.0, 700.0));
    }
}
