/// 数据超出当前区间时坐标轴的行为
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollStrategy {
    /// 区间固定不变
    Fixed,
    /// 区间只扩展不收缩
    Expansion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStrategy {
    Numeric,
    /// 不画刻度和刻度标签，只保留标题
    Empty,
}

#[derive(Debug, Clone)]
pub struct Axis {
    title: String,
    interval: (f64, f64),
    scroll: ScrollStrategy,
    ticks: TickStrategy,
}

impl Axis {
    pub fn new(title: &str, interval: (f64, f64)) -> Self {
        Self {
            title: title.to_string(),
            interval,
            scroll: ScrollStrategy::Fixed,
            ticks: TickStrategy::Numeric,
        }
    }

    pub fn with_scroll_strategy(mut self, scroll: ScrollStrategy) -> Self {
        self.scroll = scroll;
        self
    }

    pub fn with_tick_strategy(mut self, ticks: TickStrategy) -> Self {
        self.ticks = ticks;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn interval(&self) -> (f64, f64) {
        self.interval
    }

    pub fn scroll_strategy(&self) -> ScrollStrategy {
        self.scroll
    }

    pub fn tick_strategy(&self) -> TickStrategy {
        self.ticks
    }

    /// 按滚动策略让区间容纳 [min, max]，返回区间是否改变
    pub fn fit(&mut self, min: f64, max: f64) -> bool {
        if self.scroll != ScrollStrategy::Expansion || !min.is_finite() || !max.is_finite() {
            return false;
        }
        let (mut start, mut end) = self.interval;
        if min < start {
            start = min;
        }
        if max > end {
            end = max;
        }
        let changed = (start, end) != self.interval;
        self.interval = (start, end);
        changed
    }

    /// 数据值映射到 [0, 1]（区间外的值会超出该范围）
    pub fn normalize(&self, value: f64) -> f64 {
        let (start, end) = self.interval;
        let span = end - start;
        if span.abs() < f64::EPSILON {
            return 0.5;
        }
        (value - start) / span
    }

    /// 刻度值，目标数量大约为 `target`
    pub fn tick_values(&self, target: usize) -> Vec<f64> {
        if self.ticks == TickStrategy::Empty || target == 0 {
            return Vec::new();
        }
        let (start, end) = self.interval;
        let step = nice_step((end - start) / target as f64);
        if step <= 0.0 || !step.is_finite() {
            return Vec::new();
        }

        let mut values = Vec::new();
        let mut v = (start / step).ceil() * step;
        while v <= end + step * 1e-9 {
            values.push(v);
            v += step;
        }
        values
    }
}

/// 取 1、2、5 乘以 10 的幂中不小于 raw 的最小值
fn nice_step(raw: f64) -> f64 {
    if raw <= 0.0 || !raw.is_finite() {
        return 0.0;
    }
    let magnitude = 10f64.powf(raw.log10().floor());
    let residual = raw / magnitude;
    let nice = if residual <= 1.0 {
        1.0
    } else if residual <= 2.0 {
        2.0
    } else if residual <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expansion_only_grows() {
        let mut axis = Axis::new("P", (0.0, 100.0)).with_scroll_strategy(ScrollStrategy::Expansion);
        assert!(!axis.fit(10.0, 80.0));
        assert_eq!(axis.interval(), (0.0, 100.0));

        assert!(axis.fit(0.0, 120.0));
        assert_eq!(axis.interval(), (0.0, 120.0));

        assert!(!axis.fit(0.0, 50.0));
        assert_eq!(axis.interval(), (0.0, 120.0));
    }

    #[test]
    fn fixed_axis_ignores_fit() {
        let mut axis = Axis::new("f", (0.0, 60.0));
        assert!(!axis.fit(-5.0, 500.0));
        assert_eq!(axis.interval(), (0.0, 60.0));
    }

    #[test]
    fn numeric_ticks_use_nice_steps() {
        let axis = Axis::new("P", (0.0, 100.0));
        assert_eq!(axis.tick_values(5), vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);

        let axis = Axis::new("f", (0.0, 60.0));
        assert_eq!(axis.tick_values(6), vec![0.0, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0]);
    }

    #[test]
    fn empty_strategy_has_no_ticks() {
        let axis = Axis::new("Time", (0.0, 50.0)).with_tick_strategy(TickStrategy::Empty);
        assert!(axis.tick_values(5).is_empty());
    }

    #[test]
    fn normalize_handles_degenerate_interval() {
        let axis = Axis::new("x", (3.0, 3.0));
        assert_eq!(axis.normalize(10.0), 0.5);
        let axis = Axis::new("x", (0.0, 50.0));
        assert_eq!(axis.normalize(25.0), 0.5);
    }
}
