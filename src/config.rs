use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 应用配置管理模块
/// 集中管理所有配置项，提供默认值和配置验证

/// 默认配置文件路径
pub const DEFAULT_CONFIG_PATH: &str = "spectro_surface.toml";

/// 主配置结构
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub stream: StreamConfig,
    pub chart: ChartConfig,
    pub palette: PaletteConfig,
    pub camera: CameraConfig,
    pub controls: ControlsConfig,
    pub channels: ChannelConfig,
}

/// 窗口配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
    pub resizable: bool,
    pub vsync: bool,
    pub hardware_acceleration: bool,
    /// 显示刷新间隔（毫秒），相当于每帧回调
    pub refresh_interval_ms: u64,
}

/// 数据流配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// 单个样本的长度（频点数）
    pub sample_size: usize,
    /// 历史长度（时间轴上的行数）
    pub history_length: usize,
    /// 生成器相邻样本间的变化幅度
    pub variation: f64,
    pub interval_ms: f64,
    pub batch_size: usize,
    pub repeat: bool,
    /// [0, 1] 缩放到功率值的系数
    pub scale: f64,
    /// 固定随机种子，便于复现
    pub seed: Option<u64>,
}

/// 图表配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub title: String,
    pub bounding_box: [f32; 3],
    pub series_name: String,
    pub axis_x_title: String,
    pub axis_y_title: String,
    pub axis_z_title: String,
    pub axis_y_interval: [f64; 2],
    pub pixelate: bool,
    pub show_legend: bool,
    pub show_spectrum_slice: bool,
    pub slice_height: f32,
    pub initial_camera_location: [f32; 3],
}

/// 颜色查找表配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    pub units: String,
    pub interpolate: bool,
    pub steps: Vec<PaletteStepConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaletteStepConfig {
    pub value: f64,
    pub color: [u8; 3],
}

/// 相机动画配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub animation_file: String,
    /// 每次刷新帧计数器前进的步长
    pub frame_step: f64,
}

/// 控制面板配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    pub infinite_streaming: bool,
    pub camera_animation: bool,
    /// 面板相对图表左上角的位置
    pub position: [f32; 2],
    pub margin: f32,
    pub padding: f32,
}

/// 通道配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelConfig {
    pub sample_channel_capacity: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            title: "SpectroSurface - 3D Spectrogram".to_string(),
            resizable: true,
            vsync: true,
            hardware_acceleration: true,
            refresh_interval_ms: 16,
        }
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            sample_size: 60,
            history_length: 50,
            variation: 3.0,
            interval_ms: 1000.0 / 60.0,
            batch_size: 1,
            repeat: true,
            scale: 80.0,
            seed: None,
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: "3D Surface Grid Spectrogram".to_string(),
            bounding_box: [1.0, 1.0, 2.0],
            series_name: "Spectrogram".to_string(),
            axis_x_title: "Frequency (Hz)".to_string(),
            axis_y_title: "Power spectrum P(f)".to_string(),
            axis_z_title: "Time".to_string(),
            axis_y_interval: [0.0, 100.0],
            pixelate: true,
            show_legend: true,
            show_spectrum_slice: true,
            slice_height: 140.0,
            initial_camera_location: [1.2, 0.9, 1.6],
        }
    }
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            units: "dB".to_string(),
            interpolate: true,
            steps: vec![
                PaletteStepConfig { value: 15.0, color: [4, 11, 125] },   // 深蓝
                PaletteStepConfig { value: 30.0, color: [4, 130, 5] },    // 绿色
                PaletteStepConfig { value: 60.0, color: [132, 15, 4] },   // 红色
                PaletteStepConfig { value: 100.0, color: [255, 255, 0] }, // 黄色
            ],
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            animation_file: "assets/camera_animation.json".to_string(),
            frame_step: 4.0,
        }
    }
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            infinite_streaming: true,
            camera_animation: true,
            position: [0.0, 0.0],
            margin: 10.0,
            padding: 4.0,
        }
    }
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            sample_channel_capacity: 256,
        }
    }
}

impl AppConfig {
    /// 从文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 从 TOML 文本解析配置，缺省字段使用默认值
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content).map_err(ConfigError::ParseError)?;
        config.validate()?;
        Ok(config)
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(ConfigError::SerializeError)?;
        std::fs::write(path, content).map_err(ConfigError::IoError)?;
        Ok(())
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            return Err(ConfigError::ValidationError("Window dimensions must be positive".to_string()));
        }

        if self.stream.sample_size < 2 {
            return Err(ConfigError::ValidationError("Sample size must be at least 2".to_string()));
        }

        if self.stream.history_length < 2 {
            return Err(ConfigError::ValidationError("History length must be at least 2".to_string()));
        }

        if self.stream.interval_ms <= 0.0 || self.stream.batch_size == 0 {
            return Err(ConfigError::ValidationError("Stream interval and batch size must be positive".to_string()));
        }

        if self.chart.axis_y_interval[0] >= self.chart.axis_y_interval[1] {
            return Err(ConfigError::ValidationError("Axis Y interval must be increasing".to_string()));
        }

        if self.chart.bounding_box.iter().any(|v| *v <= 0.0) {
            return Err(ConfigError::ValidationError("Bounding box dimensions must be positive".to_string()));
        }

        if self.palette.steps.is_empty() {
            return Err(ConfigError::ValidationError("Palette needs at least one step".to_string()));
        }

        if self.palette.steps.windows(2).any(|w| w[0].value >= w[1].value) {
            return Err(ConfigError::ValidationError("Palette step values must be strictly increasing".to_string()));
        }

        if self.camera.frame_step <= 0.0 {
            return Err(ConfigError::ValidationError("Camera frame step must be positive".to_string()));
        }

        if self.channels.sample_channel_capacity == 0 {
            return Err(ConfigError::ValidationError("Sample channel capacity must be positive".to_string()));
        }

        Ok(())
    }

    /// 获取相机动画文件路径
    pub fn get_animation_path(&self) -> PathBuf {
        PathBuf::from(&self.camera.animation_file)
    }
}

/// 配置错误类型
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(std::io::Error),
    #[error("Parse error: {0}")]
    ParseError(toml::de::Error),
    #[error("Serialize error: {0}")]
    SerializeError(toml::ser::Error),
    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// 配置管理器
pub struct ConfigManager {
    config: AppConfig,
}

impl ConfigManager {
    /// 创建使用默认配置的管理器
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    /// 从文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config = AppConfig::load_from_file(path)?;
        Ok(Self { config })
    }

    /// 文件存在时加载，否则（或加载失败时）退回默认配置。
    /// 文件不存在时顺带写出一份默认配置，方便手动修改；已有但无效的文件不会被覆盖。
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No config file at {}, using defaults", path.display());
            let manager = Self::new();
            match manager.save_to_file(path) {
                Ok(()) => log::info!("Wrote default config to {}", path.display()),
                Err(e) => log::warn!("Failed to write default config to {}: {}", path.display(), e),
            }
            return manager;
        }

        match Self::load_from_file(path) {
            Ok(manager) => {
                log::info!("Loaded config from {}", path.display());
                manager
            }
            Err(e) => {
                log::warn!("Failed to load config from {}: {}, using defaults", path.display(), e);
                Self::new()
            }
        }
    }

    /// 获取当前配置
    pub fn get_config(&self) -> &AppConfig {
        &self.config
    }

    /// 保存配置到指定文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        self.config.save_to_file(path)
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.stream.sample_size, 60);
        assert_eq!(config.stream.history_length, 50);
        assert_eq!(config.stream.scale, 80.0);
        assert_eq!(config.camera.frame_step, 4.0);
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            [stream]
            history_length = 20

            [controls]
            infinite_streaming = false
            "#,
        )
        .unwrap();

        assert_eq!(config.stream.history_length, 20);
        assert_eq!(config.stream.sample_size, 60);
        assert!(!config.controls.infinite_streaming);
        assert!(config.controls.camera_animation);
        assert_eq!(config.palette.steps.len(), 4);
    }

    #[test]
    fn rejects_unordered_palette() {
        let mut config = AppConfig::default();
        config.palette.steps.swap(0, 1);
        assert!(matches!(config.validate(), Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn rejects_inverted_y_interval() {
        let mut config = AppConfig::default();
        config.chart.axis_y_interval = [100.0, 0.0];
        assert!(config.validate().is_err());
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let result = AppConfig::from_toml_str("[stream\nsample_size = ");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    fn temp_config_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("spectro_surface_{}_{}.toml", name, std::process::id()))
    }

    #[test]
    fn save_and_reload_through_file() {
        let path = temp_config_path("roundtrip");
        let mut config = AppConfig::default();
        config.stream.history_length = 24;
        config.controls.camera_animation = false;
        config.chart.title = "Saved".to_string();

        config.save_to_file(&path).unwrap();
        let manager = ConfigManager::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        let loaded = manager.get_config();
        assert_eq!(loaded.stream.history_length, 24);
        assert!(!loaded.controls.camera_animation);
        assert_eq!(loaded.chart.title, "Saved");
        assert_eq!(loaded.palette.steps.len(), 4);
    }

    #[test]
    fn missing_file_gets_default_template() {
        let path = temp_config_path("template");
        let _ = std::fs::remove_file(&path);

        let manager = ConfigManager::load_or_default(&path);
        assert_eq!(manager.get_config().stream.sample_size, 60);

        let written = AppConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(written.stream.sample_size, 60);
        assert_eq!(written.controls.position, [0.0, 0.0]);
    }

    #[test]
    fn invalid_file_is_not_overwritten() {
        let path = temp_config_path("invalid");
        std::fs::write(&path, "[stream\nsample_size = ").unwrap();

        let manager = ConfigManager::load_or_default(&path);
        let content = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(manager.get_config().stream.sample_size, 60);
        assert_eq!(content, "[stream\nsample_size = ");
    }

    #[test]
    fn missing_file_uses_defaults() {
        let manager = ConfigManager::load_or_default("does/not/exist.toml");
        assert_eq!(manager.get_config().stream.sample_size, 60);
    }

    #[test]
    fn serializes_back_to_toml() {
        let config = AppConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed = AppConfig::from_toml_str(&text).unwrap();
        assert_eq!(parsed.chart.title, config.chart.title);
        assert_eq!(parsed.palette.units, "dB");
    }
}
