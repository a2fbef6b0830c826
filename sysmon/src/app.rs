use crate::config::MonitorConfig;
use crate::present::{ChartModel, Dashboard};
use crate::scheduler::{Scheduler, SystemClock};
use crate::session::MonitorSession;
use crate::source::MetricsSource;
use crate::theme::Theme;

use eframe::{egui, epi};
use egui::plot::{Legend, Line, Plot, Value, Values};
use egui::RichText;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    SystemInfo,
    Processes,
}

pub struct MonitorApp<S: MetricsSource> {
    session: MonitorSession<S>,
    scheduler: Scheduler<SystemClock>,
    theme: Theme,
    title: String,
    tab: Tab,
}

impl<S: MetricsSource> MonitorApp<S> {
    pub fn new(source: S, config: &MonitorConfig) -> Self {
        Self {
            session: MonitorSession::new(source, config),
            scheduler: Scheduler::new(SystemClock::new(), config.tick_interval()),
            theme: Theme::dark(),
            title: config.window_title.clone(),
            tab: Tab::SystemInfo,
        }
    }
}

impl<S: MetricsSource> epi::App for MonitorApp<S> {
    fn name(&self) -> &str {
        &self.title
    }

    fn setup(&mut self, ctx: &egui::Context, _frame: &epi::Frame, _storage: Option<&dyn epi::Storage>) {
        self.theme.apply(ctx);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &epi::Frame) {
        // Sampling runs inline on the UI thread; a slow tick just delays the next one.
        if self.scheduler.poll() {
            self.session.on_tick();
            self.scheduler.finished();
            tracing::trace!(next_in = ?self.scheduler.time_until_due(), "tick finished");
        }

        let session = &self.session;
        let tab = &mut self.tab;
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(tab, Tab::SystemInfo, "System Info");
                ui.selectable_value(tab, Tab::Processes, "Processes");
            });
            ui.separator();
            match *tab {
                Tab::SystemInfo => {
                    system_info(ui, &session.dashboard);
                    ui.add_space(8.0);
                    usage_chart(ui, &session.chart);
                }
                Tab::Processes => process_list(ui, &session.dashboard.processes),
            }
        });

        ctx.request_repaint();
    }

    fn on_exit(&mut self) {
        self.scheduler.stop();
        tracing::info!(ticks = self.session.history().ticks(), "window closed");
    }
}

fn system_info(ui: &mut egui::Ui, dashboard: &Dashboard) {
    for text in [
        &dashboard.os,
        &dashboard.cpu,
        &dashboard.ram,
        &dashboard.disk,
        &dashboard.battery,
        &dashboard.network,
    ] {
        ui.label(text.as_str());
    }
}

fn usage_chart(ui: &mut egui::Ui, chart: &ChartModel) {
    ui.vertical_centered(|ui| {
        ui.strong(chart.title);
    });
    ui.label(RichText::new(chart.y_label).small());
    Plot::new("usage_chart")
        .height(260.0)
        .legend(Legend::default())
        .include_y(chart.y_min)
        .include_y(chart.y_max)
        .allow_drag(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            for series in &chart.series {
                let values = series.points.iter().map(|&[x, y]| Value::new(x, y)).collect();
                plot_ui.line(
                    Line::new(Values::from_values(values))
                        .name(series.name)
                        .color(series.color),
                );
            }
        });
    ui.vertical_centered(|ui| {
        ui.label(RichText::new(chart.x_label).small());
    });
}

fn process_list(ui: &mut egui::Ui, lines: &[String]) {
    ui.label(format!("{} processes", lines.len()));
    let row_height = ui.text_style_height(&egui::TextStyle::Body);
    egui::ScrollArea::vertical()
        .auto_shrink([false; 2])
        .show_rows(ui, row_height, lines.len(), |ui, rows| {
            for line in &lines[rows] {
                ui.label(line.as_str());
            }
        });
}
