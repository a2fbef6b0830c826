use egui::{Color32, Stroke};

pub const CPU_SERIES: Color32 = Color32::from_rgb(0x00, 0xaa, 0xff);
pub const RAM_SERIES: Color32 = Color32::from_rgb(0xff, 0xaa, 0x00);
pub const WIFI_SERIES: Color32 = Color32::from_rgb(0x00, 0xff, 0x00);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub background: Color32,
    pub foreground: Color32,
    pub accent: Color32,
    pub panel: Color32,
    pub border: Color32,
    pub tab: Color32,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            background: Color32::from_rgb(0x12, 0x12, 0x12),
            foreground: Color32::from_rgb(0xee, 0xee, 0xee),
            accent: Color32::from_rgb(0x00, 0xaa, 0xff),
            panel: Color32::from_rgb(0x1e, 0x1e, 0x1e),
            border: Color32::from_rgb(0x44, 0x44, 0x44),
            tab: Color32::from_rgb(0x33, 0x33, 0x33),
        }
    }

    pub fn visuals(&self) -> egui::Visuals {
        let mut visuals = egui::Visuals::dark();
        visuals.override_text_color = Some(self.foreground);
        visuals.extreme_bg_color = self.panel;
        visuals.faint_bg_color = self.panel;
        visuals.selection.bg_fill = self.accent;
        visuals.selection.stroke = Stroke::new(1.0, Color32::WHITE);
        visuals.hyperlink_color = self.accent;
        visuals.widgets.noninteractive.bg_fill = self.background;
        visuals.widgets.noninteractive.bg_stroke = Stroke::new(2.0, self.border);
        visuals.widgets.inactive.bg_fill = self.tab;
        visuals.widgets.hovered.bg_fill = self.accent;
        visuals.widgets.active.bg_fill = self.accent;
        visuals
    }

    pub fn apply(&self, ctx: &egui::Context) {
        ctx.set_visuals(self.visuals());
    }
}
