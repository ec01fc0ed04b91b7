use egui::Color32;

use crate::config::PaletteConfig;

/// 颜色查找表的一个节点
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LutStep {
    pub value: f64,
    pub color: Color32,
}

/// 颜色查找表（LUT）
///
/// 节点按 value 升序排列。低于第一个节点取第一个颜色，高于最后一个节点取最后一个颜色；
/// `interpolate` 为 false 时取不超过该值的最近节点颜色。
#[derive(Debug, Clone)]
pub struct Lut {
    steps: Vec<LutStep>,
    units: String,
    interpolate: bool,
}

impl Lut {
    pub fn new(mut steps: Vec<LutStep>, units: impl Into<String>, interpolate: bool) -> Self {
        steps.sort_by(|a, b| a.value.total_cmp(&b.value));
        Self {
            steps,
            units: units.into(),
            interpolate,
        }
    }

    pub fn from_config(config: &PaletteConfig) -> Self {
        let steps = config
            .steps
            .iter()
            .map(|s| LutStep {
                value: s.value,
                color: Color32::from_rgb(s.color[0], s.color[1], s.color[2]),
            })
            .collect();
        Self::new(steps, config.units.clone(), config.interpolate)
    }

    pub fn units(&self) -> &str {
        &self.units
    }

    pub fn steps(&self) -> &[LutStep] {
        &self.steps
    }

    /// 查找表覆盖的取值范围
    pub fn range(&self) -> Option<(f64, f64)> {
        match (self.steps.first(), self.steps.last()) {
            (Some(first), Some(last)) => Some((first.value, last.value)),
            _ => None,
        }
    }

    pub fn color_for(&self, value: f64) -> Color32 {
        let Some(first) = self.steps.first() else {
            return Color32::GRAY;
        };
        if value.is_nan() || value <= first.value {
            return first.color;
        }

        for pair in self.steps.windows(2) {
            let (lo, hi) = (pair[0], pair[1]);
            if value < hi.value {
                if !self.interpolate {
                    return lo.color;
                }
                let t = ((value - lo.value) / (hi.value - lo.value)) as f32;
                return lerp_color(lo.color, hi.color, t);
            }
        }

        self.steps[self.steps.len() - 1].color
    }
}

fn lerp_color(a: Color32, b: Color32, t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    Color32::from_rgb(mix(a.r(), b.r()), mix(a.g(), b.g()), mix(a.b(), b.b()))
}
