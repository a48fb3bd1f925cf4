//! HUD overlay

use egui::{Align2, Color32, RichText};
use sandfall_core::FallMode;

/// Values shown in the HUD panel
pub struct HudStats {
    pub fps: f32,
    pub grain_count: usize,
    pub brush_size: u32,
    pub fall_mode: FallMode,
    pub paused: bool,
    /// Name of the tool under the held button
    pub tool: Option<String>,
}

impl HudStats {
    /// Label/value pairs in display order
    fn rows(&self) -> Vec<(&'static str, String)> {
        let mode = match self.fall_mode {
            FallMode::Step => "step",
            FallMode::Telescope => "telescope",
        };
        vec![
            ("fps", format!("{:.0}", self.fps)),
            ("grains", self.grain_count.to_string()),
            ("brush", format!("{0}x{0}", self.brush_size)),
            ("fall", mode.to_owned()),
            ("tool", self.tool.clone().unwrap_or_else(|| "-".to_owned())),
        ]
    }
}

pub fn show_hud(ctx: &egui::Context, stats: &HudStats) {
    egui::Window::new("sandfall")
        .title_bar(false)
        .resizable(false)
        .anchor(Align2::LEFT_BOTTOM, [8.0, -8.0])
        .show(ctx, |ui| {
            egui::Grid::new("hud_rows")
                .num_columns(2)
                .spacing([12.0, 2.0])
                .show(ui, |ui| {
                    for (label, value) in stats.rows() {
                        ui.label(RichText::new(label).weak());
                        ui.monospace(value);
                        ui.end_row();
                    }
                });
            if stats.paused {
                ui.separator();
                ui.label(RichText::new("paused (space to resume)").color(Color32::YELLOW));
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_show_idle_tool_as_dash() {
        let stats = HudStats {
            fps: 59.6,
            grain_count: 42,
            brush_size: 5,
            fall_mode: FallMode::Telescope,
            paused: false,
            tool: None,
        };
        let rows = stats.rows();
        assert_eq!(rows[0], ("fps", "60".to_owned()));
        assert_eq!(rows[2], ("brush", "5x5".to_owned()));
        assert_eq!(rows[3], ("fall", "telescope".to_owned()));
        assert_eq!(rows[4], ("tool", "-".to_owned()));
    }
}
