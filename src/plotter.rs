use egui::Color32;
use egui_plot::{Line, Plot, PlotBounds, PlotPoints};

/// 格式化数字为固定宽度的 y 轴标签
fn format_fixed_width_y_label(value: f64) -> String {
    let abs_value = value.abs();
    if abs_value >= 1000.0 {
        format!("{:-6.1e}", value)
    } else if abs_value >= 100.0 {
        format!("{:-6.0}", value)
    } else {
        format!("{:-6.1}", value)
    }
}

/// 最新一行频谱的二维切片视图
#[derive(Debug)]
pub struct SpectrumSlicePlot {
    height: f32,
    color: Color32,
}

impl SpectrumSlicePlot {
    pub fn new(height: f32, color: Color32) -> Self {
        Self { height, color }
    }

    /// 将一行样本转换为 (频率, 功率) 点，频点取单元格中心
    pub fn points(row: &[f64]) -> Vec<[f64; 2]> {
        row.iter()
            .enumerate()
            .map(|(i, &y)| [i as f64 + 0.5, y])
            .collect()
    }

    pub fn ui(&self, ui: &mut egui::Ui, title: &str, latest: Option<&[f64]>, x_max: f64, y_interval: (f64, f64)) {
        Plot::new(title)
            .height(self.height)
            .x_axis_formatter(|v, _| format!("{:.0}", v.value))
            .y_axis_formatter(|v, _| format_fixed_width_y_label(v.value))
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                plot_ui.set_plot_bounds(PlotBounds::from_min_max([0.0, y_interval.0], [x_max, y_interval.1]));

                let Some(row) = latest else {
                    return;
                };
                plot_ui.line(Line::new(title, PlotPoints::from(Self::points(row))).color(self.color).width(1.5));
            });
    }
}
