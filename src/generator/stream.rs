use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{Sender, TrySendError};
use log::{debug, info, warn};

use crate::config::StreamConfig;
use crate::types::SampleBatch;

/// 数据流推送参数
#[derive(Debug, Clone)]
pub struct StreamOptions {
    pub interval: Duration,
    pub batch_size: usize,
    pub repeat: bool,
}

impl Default for StreamOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs_f64(1.0 / 60.0),
            batch_size: 1,
            repeat: true,
        }
    }
}

impl From<&StreamConfig> for StreamOptions {
    fn from(config: &StreamConfig) -> Self {
        Self {
            interval: Duration::from_secs_f64(config.interval_ms / 1000.0),
            batch_size: config.batch_size,
            repeat: config.repeat,
        }
    }
}

/// 数据流结束的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamExit {
    Shutdown,
    Disconnected,
    Exhausted,
}

/// 按固定间隔推送样本，直到收到关闭信号、通道断开，或（非重复模式下）数据用尽
///
/// 通道已满时直接丢弃该批次，不做重试。
pub fn run_stream(
    data: Vec<Vec<f64>>,
    options: StreamOptions,
    sender: Sender<SampleBatch>,
    shutdown_signal: Arc<AtomicBool>,
) -> StreamExit {
    if data.is_empty() {
        warn!("Stream started without data");
        return StreamExit::Exhausted;
    }

    info!(
        "Spectrum stream started: {} samples, interval {:?}, batch size {}, repeat {}",
        data.len(),
        options.interval,
        options.batch_size,
        options.repeat
    );

    let mut cursor = 0usize;
    let mut sequence = 0u64;
    let mut dropped = 0u64;
    let mut next_tick = Instant::now();

    loop {
        // 检查关闭信号
        if shutdown_signal.load(Ordering::Relaxed) {
            info!("Stream thread received shutdown signal, exiting gracefully");
            return StreamExit::Shutdown;
        }

        for _ in 0..options.batch_size {
            if cursor >= data.len() {
                if !options.repeat {
                    info!("Spectrum stream exhausted after {} batches", sequence);
                    return StreamExit::Exhausted;
                }
                cursor = 0;
            }

            let batch = SampleBatch::new(data[cursor].clone(), sequence);
            cursor += 1;
            sequence += 1;

            match sender.try_send(batch) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    dropped += 1;
                    if dropped % 600 == 1 {
                        debug!("Sample channel full, dropped {} batches so far", dropped);
                    }
                }
                Err(TrySendError::Disconnected(_)) => {
                    // 通道断开表示GUI已关闭
                    info!("Sample channel disconnected, stream thread exiting");
                    return StreamExit::Disconnected;
                }
            }
        }

        next_tick += options.interval;
        let now = Instant::now();
        if next_tick > now {
            thread::sleep(next_tick - now);
        } else {
            // 落后太多时不追帧
            next_tick = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;

    fn fast_options(repeat: bool, batch_size: usize) -> StreamOptions {
        StreamOptions {
            interval: Duration::from_millis(1),
            batch_size,
            repeat,
        }
    }

    #[test]
    fn non_repeating_stream_sends_each_sample_once() {
        let data = vec![vec![0.1; 4], vec![0.2; 4], vec![0.3; 4]];
        let (tx, rx) = bounded(16);
        let exit = run_stream(data.clone(), fast_options(false, 1), tx, Arc::new(AtomicBool::new(false)));

        assert_eq!(exit, StreamExit::Exhausted);
        let received: Vec<SampleBatch> = rx.try_iter().collect();
        assert_eq!(received.len(), 3);
        for (i, batch) in received.iter().enumerate() {
            assert_eq!(batch.values, data[i]);
            assert_eq!(batch.sequence, i as u64);
        }
    }

    #[test]
    fn repeating_stream_cycles_until_disconnect() {
        let data = vec![vec![1.0; 2], vec![2.0; 2]];
        let (tx, rx) = bounded(64);
        let shutdown = Arc::new(AtomicBool::new(false));

        let handle = thread::spawn(move || run_stream(data, fast_options(true, 1), tx, shutdown));

        let first: Vec<f64> = (0..5).map(|_| rx.recv().unwrap().values[0]).collect();
        assert_eq!(first, vec![1.0, 2.0, 1.0, 2.0, 1.0]);

        drop(rx);
        assert_eq!(handle.join().unwrap(), StreamExit::Disconnected);
    }

    #[test]
    fn shutdown_signal_stops_stream() {
        let (tx, _rx) = bounded(4);
        let shutdown = Arc::new(AtomicBool::new(true));
        let exit = run_stream(vec![vec![0.0; 3]], fast_options(true, 1), tx, shutdown);
        assert_eq!(exit, StreamExit::Shutdown);
    }

    #[test]
    fn full_channel_drops_batches() {
        let data = vec![vec![0.5; 2]; 10];
        let (tx, rx) = bounded(2);
        let exit = run_stream(data, fast_options(false, 5), tx, Arc::new(AtomicBool::new(false)));

        assert_eq!(exit, StreamExit::Exhausted);
        assert_eq!(rx.try_iter().count(), 2);
    }

    #[test]
    fn empty_data_exits_immediately() {
        let (tx, _rx) = bounded(1);
        let exit = run_stream(Vec::new(), StreamOptions::default(), tx, Arc::new(AtomicBool::new(false)));
        assert_eq!(exit, StreamExit::Exhausted);
    }
}
