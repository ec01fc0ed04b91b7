mod app;
mod chart;
mod config;
mod generator;
mod logger;
mod palette;
mod plotter;
mod surface;
mod types;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use crossbeam_channel::bounded;
use eframe::egui;
use log::{error, info};

use app::SpectrogramApp;
use config::{ConfigManager, DEFAULT_CONFIG_PATH};
use generator::{run_stream, SpectrumDataGenerator, StreamOptions};

fn main() {
    logger::init_logger();
    info!("Application starting");

    let config = ConfigManager::load_or_default(DEFAULT_CONFIG_PATH);
    let app_config = config.get_config().clone();

    let (sample_sender, sample_receiver) = bounded(app_config.channels.sample_channel_capacity);
    let shutdown_signal = Arc::new(AtomicBool::new(false));

    // 生成一轮合成频谱，之后由数据流线程循环推送
    let stream_config = app_config.stream.clone();
    let stream_shutdown = Arc::clone(&shutdown_signal);
    let stream_handle = thread::spawn(move || {
        let data = SpectrumDataGenerator::new()
            .set_sample_size(stream_config.sample_size)
            .set_number_of_samples(stream_config.history_length)
            .set_variation(stream_config.variation)
            .set_seed(stream_config.seed)
            .generate();
        run_stream(data, StreamOptions::from(&stream_config), sample_sender, stream_shutdown)
    });

    let window = &app_config.window;
    let options = eframe::NativeOptions {
        vsync: window.vsync,
        hardware_acceleration: if window.hardware_acceleration {
            eframe::HardwareAcceleration::Preferred
        } else {
            eframe::HardwareAcceleration::Off
        },
        renderer: eframe::Renderer::Glow,
        viewport: egui::ViewportBuilder::default()
            .with_title(window.title.clone())
            .with_inner_size([window.width, window.height])
            .with_resizable(window.resizable),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        &window.title,
        options,
        Box::new(move |_cc| Ok(Box::new(SpectrogramApp::new(sample_receiver, config)))),
    ) {
        error!("GUI failed: {}", e);
        shutdown_signal.store(true, Ordering::Relaxed);
        std::process::exit(1);
    }

    // GUI 关闭后，通知数据流线程退出
    info!("GUI closed, signaling stream thread to shutdown");
    shutdown_signal.store(true, Ordering::Relaxed);

    match stream_handle.join() {
        Ok(exit) => info!("Stream thread finished: {:?}", exit),
        Err(e) => error!("Stream thread panicked: {:?}", e),
    }
}
