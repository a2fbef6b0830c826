use crate::config::MonitorConfig;
use crate::history::TimeSeriesBuffer;
use crate::present::{self, ChartModel, Dashboard};
use crate::sampler::Sampler;
use crate::source::MetricsSource;
use std::time::Instant;

/// All state for one window: the metric source, network baseline, chart
/// history and the text currently on screen.
pub struct MonitorSession<S: MetricsSource> {
    source: S,
    sampler: Sampler,
    history: TimeSeriesBuffer,
    chart_floor: f64,
    chart_headroom: f64,
    pub dashboard: Dashboard,
    pub chart: ChartModel,
}

impl<S: MetricsSource> MonitorSession<S> {
    pub fn new(source: S, config: &MonitorConfig) -> Self {
        let history = TimeSeriesBuffer::new(config.history_capacity);
        let chart = ChartModel::from_history(&history, config.chart_floor, config.chart_headroom);
        Self {
            source,
            sampler: Sampler::new(config),
            history,
            chart_floor: config.chart_floor,
            chart_headroom: config.chart_headroom,
            dashboard: Dashboard::default(),
            chart,
        }
    }

    /// One sample-and-present pass. Runs to completion on the calling thread.
    pub fn on_tick(&mut self) {
        let started = Instant::now();
        let sample = self.sampler.sample(&mut self.source);

        present::record(&mut self.history, &sample);
        self.dashboard = Dashboard::from_sample(&sample);
        self.chart = ChartModel::from_history(&self.history, self.chart_floor, self.chart_headroom);

        tracing::debug!(
            tick = sample.tick,
            processes = sample.processes.len(),
            elapsed = ?started.elapsed(),
            "tick"
        );
        if tracing::enabled!(tracing::Level::TRACE) {
            match serde_json::to_string(&sample) {
                Ok(json) => tracing::trace!(sample = %json),
                Err(err) => tracing::trace!("could not serialize sample: {err}"),
            }
        }
    }

    pub fn history(&self) -> &TimeSeriesBuffer {
        &self.history
    }
}
