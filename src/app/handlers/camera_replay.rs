use std::path::{Path, PathBuf};
use std::thread;

use crossbeam_channel::{bounded, Receiver};
use log::{info, warn};

use crate::app::app_core::SpectrogramApp;
use crate::types::{CameraAnimationData, CameraLocation};

/// 相机动画数据加载错误
#[derive(Debug, thiserror::Error)]
pub enum CameraDataError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed camera animation data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("camera animation data has no frames")]
    Empty,
    #[error("camera loader thread exited without a result")]
    LoaderExited,
}

/// 读取并解析相机动画文件；没有帧也视为无数据
pub fn load_camera_animation(path: &Path) -> Result<CameraAnimationData, CameraDataError> {
    let content = std::fs::read_to_string(path).map_err(|source| CameraDataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_camera_animation(&content)
}

pub fn parse_camera_animation(content: &str) -> Result<CameraAnimationData, CameraDataError> {
    let data: CameraAnimationData = serde_json::from_str(content)?;
    if data.frames.is_empty() {
        return Err(CameraDataError::Empty);
    }
    Ok(data)
}

/// 在后台线程加载动画文件，结果通过通道返回
pub fn spawn_camera_loader(path: PathBuf) -> Receiver<Result<CameraAnimationData, CameraDataError>> {
    let (sender, receiver) = bounded(1);
    thread::spawn(move || {
        let result = load_camera_animation(&path);
        // 接收端已释放说明界面已经关闭
        let _ = sender.send(result);
    });
    receiver
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayState {
    /// 数据尚未加载完成，不做任何事
    Loading,
    /// 没有可用数据，之后一直空转
    NoData,
    Animating,
    /// 用户拖动图表后暂停，只有切换动画开关才会恢复
    Paused,
}

/// 相机回放循环
#[derive(Debug, Clone)]
pub struct CameraReplay {
    state: ReplayState,
    data: Option<CameraAnimationData>,
    frame: f64,
    frame_step: f64,
    /// 最近一次应用的帧下标
    last_index: Option<usize>,
}

impl CameraReplay {
    pub fn new(frame_step: f64) -> Self {
        Self {
            state: ReplayState::Loading,
            data: None,
            frame: 0.0,
            frame_step,
            last_index: None,
        }
    }

    pub fn state(&self) -> ReplayState {
        self.state
    }

    pub fn last_frame_index(&self) -> Option<usize> {
        self.last_index
    }

    pub fn frame_count(&self) -> usize {
        self.data.as_ref().map_or(0, |d| d.frames.len())
    }

    /// 加载完成后调用一次
    pub fn on_loaded(&mut self, result: Result<CameraAnimationData, CameraDataError>) {
        if self.state != ReplayState::Loading {
            return;
        }
        match result {
            Ok(data) if !data.frames.is_empty() => {
                info!("Loaded Camera animation data. ({} frames)", data.frames.len());
                self.data = Some(data);
                self.state = ReplayState::Animating;
            }
            Ok(_) => {
                info!("No Camera animation data.");
                self.state = ReplayState::NoData;
            }
            Err(e) => {
                info!("No Camera animation data. ({})", e);
                self.state = ReplayState::NoData;
            }
        }
    }

    /// 每次显示刷新调用一次，返回本帧要应用的相机位置
    pub fn tick(&mut self, animation_enabled: bool) -> Option<CameraLocation> {
        if self.state != ReplayState::Animating || !animation_enabled {
            return None;
        }
        let frames = &self.data.as_ref()?.frames;
        if frames.is_empty() {
            return None;
        }

        let index = (self.frame.floor() as usize) % frames.len();
        self.frame += self.frame_step;
        self.last_index = Some(index);
        Some(frames[index].camera_location)
    }

    /// 图表背景被拖动
    pub fn on_background_drag(&mut self) {
        if self.state == ReplayState::Animating {
            info!("Camera animation paused by user drag");
            self.state = ReplayState::Paused;
        }
    }

    /// 动画开关被切换（用户或代码），解除拖动暂停
    pub fn on_toggle_switched(&mut self) {
        if self.state == ReplayState::Paused {
            self.state = ReplayState::Animating;
        }
    }
}

pub struct CameraReplayHandler;

impl CameraReplayHandler {
    /// 检查后台加载结果
    pub fn handle_loading(app: &mut SpectrogramApp) {
        let Some(receiver) = &app.state.camera_loader else {
            return;
        };
        match receiver.try_recv() {
            Ok(result) => {
                app.state.camera_replay.on_loaded(result);
                app.state.camera_loader = None;
            }
            Err(crossbeam_channel::TryRecvError::Empty) => {}
            Err(crossbeam_channel::TryRecvError::Disconnected) => {
                warn!("Camera loader thread exited without a result");
                app.state.camera_replay.on_loaded(Err(CameraDataError::LoaderExited));
                app.state.camera_loader = None;
            }
        }
    }

    /// 每次显示刷新推进一帧
    pub fn handle_refresh(app: &mut SpectrogramApp) {
        let enabled = app.state.camera_toggle.is_on();
        if let Some(location) = app.state.camera_replay.tick(enabled) {
            app.state.chart.set_camera_location(location);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::camera::CameraFrame;

    fn data(n: usize) -> CameraAnimationData {
        CameraAnimationData {
            frames: (0..n)
                .map(|i| CameraFrame {
                    camera_location: CameraLocation::new(i as f32, 1.0, 1.0),
                })
                .collect(),
        }
    }

    fn animating(n: usize) -> CameraReplay {
        let mut replay = CameraReplay::new(4.0);
        replay.on_loaded(Ok(data(n)));
        replay
    }

    #[test]
    fn inert_until_loaded() {
        let mut replay = CameraReplay::new(4.0);
        assert_eq!(replay.state(), ReplayState::Loading);
        assert!(replay.tick(true).is_none());
        assert_eq!(replay.last_frame_index(), None);
    }

    #[test]
    fn frame_index_sequence_is_step_times_k_mod_n() {
        let n = 10;
        let mut replay = animating(n);
        for k in 0..25 {
            let location = replay.tick(true).unwrap();
            assert_eq!(location.x as usize, (4 * k) % n);
            assert_eq!(replay.last_frame_index(), Some((4 * k) % n));
        }
    }

    #[test]
    fn fractional_step_uses_floor() {
        let mut replay = CameraReplay::new(1.5);
        replay.on_loaded(Ok(data(100)));
        let indices: Vec<usize> = (0..4).map(|_| replay.tick(true).unwrap().x as usize).collect();
        assert_eq!(indices, vec![0, 1, 3, 4]);
        assert_eq!(replay.last_frame_index(), Some(4));
    }

    #[test]
    fn disabled_toggle_does_not_advance() {
        let mut replay = animating(5);
        assert!(replay.tick(false).is_none());
        assert_eq!(replay.last_frame_index(), None);
        assert_eq!(replay.tick(true).unwrap().x as usize, 0);
    }

    #[test]
    fn failed_or_empty_load_is_degraded_mode() {
        let mut replay = CameraReplay::new(4.0);
        replay.on_loaded(Err(CameraDataError::Empty));
        assert_eq!(replay.state(), ReplayState::NoData);
        assert!(replay.tick(true).is_none());

        let mut replay = CameraReplay::new(4.0);
        replay.on_loaded(Ok(CameraAnimationData::default()));
        assert_eq!(replay.state(), ReplayState::NoData);
        assert!(replay.tick(true).is_none());
    }

    #[test]
    fn drag_pauses_until_toggle_switched() {
        let mut replay = animating(8);
        replay.tick(true);
        replay.on_background_drag();
        assert_eq!(replay.state(), ReplayState::Paused);
        assert!(replay.tick(true).is_none());

        replay.on_toggle_switched();
        assert_eq!(replay.state(), ReplayState::Animating);
        assert_eq!(replay.tick(true).unwrap().x as usize, 4);
    }

    #[test]
    fn drag_without_data_stays_degraded() {
        let mut replay = CameraReplay::new(4.0);
        replay.on_loaded(Err(CameraDataError::Empty));
        replay.on_background_drag();
        replay.on_toggle_switched();
        assert_eq!(replay.state(), ReplayState::NoData);
    }

    #[test]
    fn parses_camel_case_frames() {
        let json = r#"{"frames":[{"cameraLocation":{"x":1.0,"y":0.5,"z":2.0}}]}"#;
        let data = parse_camera_animation(json).unwrap();
        assert_eq!(data.frames[0].camera_location, CameraLocation::new(1.0, 0.5, 2.0));
    }

    #[test]
    fn malformed_or_empty_json_is_error() {
        assert!(matches!(parse_camera_animation("not json"), Err(CameraDataError::Parse(_))));
        assert!(matches!(parse_camera_animation(r#"{"frames":[]}"#), Err(CameraDataError::Empty)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = load_camera_animation(Path::new("does/not/exist.json"));
        assert!(matches!(result, Err(CameraDataError::Io { .. })));
    }

    #[test]
    fn bundled_asset_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/camera_animation.json");
        let data = load_camera_animation(&path).unwrap();
        assert!(!data.frames.is_empty());
        assert!(data.frames.iter().all(|f| f.camera_location.length() > 1.0));
    }

    #[test]
    fn loader_exiting_without_result_is_degraded_mode() {
        use crate::app::state::AppState;
        use crate::config::{AppConfig, ConfigManager};

        let (loader_tx, loader_rx) = bounded::<Result<CameraAnimationData, CameraDataError>>(1);
        drop(loader_tx);
        let (_sample_tx, sample_rx) = bounded(1);
        let mut app = SpectrogramApp {
            state: AppState::new(sample_rx, Some(loader_rx), &AppConfig::default()),
            config: ConfigManager::new(),
        };

        CameraReplayHandler::handle_loading(&mut app);

        assert_eq!(app.state.camera_replay.state(), ReplayState::NoData);
        assert!(app.state.camera_loader.is_none());
        assert_eq!(
            CameraDataError::LoaderExited.to_string(),
            "camera loader thread exited without a result"
        );
    }

    #[test]
    fn loader_thread_delivers_result() {
        let receiver = spawn_camera_loader(PathBuf::from("does/not/exist.json"));
        let result = receiver.recv().unwrap();
        assert!(result.is_err());
    }
}
