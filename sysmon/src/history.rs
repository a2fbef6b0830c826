use std::collections::VecDeque;

/// One recorded tick on the chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartPoint {
    pub tick: u64,
    pub cpu: f64,
    pub ram: f64,
    pub wifi_download: f64,
}

/// Bounded CPU / RAM / WiFi-download history.
///
/// The three series share a single deque of points, so they always have the
/// same length and evict together.
#[derive(Debug, Clone)]
pub struct TimeSeriesBuffer {
    points: VecDeque<ChartPoint>,
    capacity: usize,
    counter: u64,
}

impl TimeSeriesBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
            counter: 0,
        }
    }

    pub fn push(&mut self, cpu: f64, ram: f64, wifi_download: f64) {
        while self.points.len() >= self.capacity.max(1) {
            self.points.pop_front();
        }
        self.points.push_back(ChartPoint {
            tick: self.counter,
            cpu,
            ram,
            wifi_download,
        });
        self.counter += 1;
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Total ticks recorded, including evicted ones.
    pub fn ticks(&self) -> u64 {
        self.counter
    }

    #[cfg(test)]
    pub fn points(&self) -> impl Iterator<Item = &ChartPoint> + '_ {
        self.points.iter()
    }

    pub fn cpu(&self) -> Vec<[f64; 2]> {
        self.series(|p| p.cpu)
    }

    pub fn ram(&self) -> Vec<[f64; 2]> {
        self.series(|p| p.ram)
    }

    pub fn wifi_download(&self) -> Vec<[f64; 2]> {
        self.series(|p| p.wifi_download)
    }

    pub fn max_wifi_download(&self) -> f64 {
        self.points.iter().map(|p| p.wifi_download).fold(0.0, f64::max)
    }

    fn series(&self, value: impl Fn(&ChartPoint) -> f64) -> Vec<[f64; 2]> {
        self.points.iter().map(|p| [p.tick as f64, value(p)]).collect()
    }
}
