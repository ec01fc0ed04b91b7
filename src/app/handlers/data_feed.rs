use log::{debug, warn};

use crate::app::app_core::SpectrogramApp;
use crate::types::SampleBatch;

/// 数据流适配：缩放样本，并按历史计数和无限流开关决定是否接收
#[derive(Debug, Clone)]
pub struct DataFeed {
    history_count: u64,
    history_length: u64,
    scale: f64,
    dropped: u64,
}

impl DataFeed {
    pub fn new(history_length: usize, scale: f64) -> Self {
        Self {
            history_count: 0,
            history_length: history_length as u64,
            scale,
            dropped: 0,
        }
    }

    /// 已接收的批次数
    pub fn history_count(&self) -> u64 {
        self.history_count
    }

    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// 无限流开启，或历史计数未满时接收；接收后计数加一
    pub fn accept(&mut self, batch: SampleBatch, streaming_enabled: bool) -> Option<SampleBatch> {
        let batch = batch.scaled(self.scale);
        if streaming_enabled || self.history_count < self.history_length {
            self.history_count += 1;
            Some(batch)
        } else {
            self.dropped += 1;
            None
        }
    }
}

pub struct DataFeedHandler;

impl DataFeedHandler {
    /// 取出通道中所有批次，接收的批次作为新行加入曲面
    pub fn handle_stream(app: &mut SpectrogramApp) {
        let streaming_enabled = app.state.streaming_toggle.is_on();

        while let Ok(batch) = app.state.channels.sample_receiver.try_recv() {
            let sequence = batch.sequence;
            let Some(accepted) = app.state.feed.accept(batch, streaming_enabled) else {
                continue;
            };

            if let Err(e) = app.state.surface.add_row(1, &accepted.values) {
                warn!("Failed to add sample #{} to surface: {}", sequence, e);
                continue;
            }

            if let Some((min, max)) = app.state.surface.value_range() {
                if app.state.chart.axis_y.fit(min, max) {
                    debug!("Axis Y expanded to {:?}", app.state.chart.axis_y.interval());
                }
            }
        }
    }
}
