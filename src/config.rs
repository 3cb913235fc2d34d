use serde::{Deserialize, Serialize};

/// 应用配置管理模块
/// 集中管理所有配置项，提供默认值和配置验证

/// 主配置结构
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub mqtt: MqttConfig,
    pub filter: FilterConfig,
    pub game: GameConfig,
    pub spectrum: SpectrumConfig,
    pub analysis: AnalysisConfig,
    pub channels: ChannelConfig,
}

/// 窗口配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
    pub resizable: bool,
    pub vsync: bool,
}

/// MQTT配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MqttConfig {
    pub broker: String,
    pub port: u16,
    pub client_id: String,
    pub topics: MqttTopics,
    pub keep_alive: u16,
}

/// MQTT主题配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MqttTopics {
    pub motion: String,
    pub audio: String,
    pub location: String,
}

/// 信号调理配置（低通滤波 + 有界缓冲 + 图表限流）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// 平滑因子，越大越灵敏、噪声越多；越小越平滑、滞后越大
    pub alpha: f64,
    pub buffer_capacity: usize,
    pub chart_capacity: usize,
    pub gate_period_ms: i64,
    pub gate_window_ms: i64,
    pub snapshot_len: usize,
}

/// 游戏物理配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub accel_gain: f64,
    pub damping: f64,
    /// 撞边后速度反向并衰减到的比例
    pub bounce_damping: f64,
    pub player_radius: f64,
    pub target_radius: f64,
    pub obstacle_count: usize,
    pub obstacle_min_size: f64,
    pub obstacle_max_size: f64,
    pub spawn_margin: f64,
    pub proximity_range: f64,
}

/// 频谱显示配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpectrumConfig {
    pub fft_size: usize,
    pub smoothing: f64,
}

/// 分析网关配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub model: String,
    pub request_topic: String,
    pub response_topic: String,
    pub timeout_secs: u64,
}

/// 通道配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelConfig {
    pub motion_channel_capacity: usize,
    pub audio_channel_capacity: usize,
    pub geo_channel_capacity: usize,
    pub analysis_channel_capacity: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            mqtt: MqttConfig::default(),
            filter: FilterConfig::default(),
            game: GameConfig::default(),
            spectrum: SpectrumConfig::default(),
            analysis: AnalysisConfig::default(),
            channels: ChannelConfig::default(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            title: "SensorFusion - Device Integration Demo".to_string(),
            resizable: true,
            vsync: true,
        }
    }
}

impl Default for MqttConfig {
    fn default() -> Self {
        Self {
            broker: "localhost".to_string(),
            port: 1883,
            client_id: "sensorfusion_client".to_string(),
            topics: MqttTopics::default(),
            keep_alive: 5,
        }
    }
}

impl Default for MqttTopics {
    fn default() -> Self {
        Self {
            motion: "sensor/accelerometer".to_string(),
            audio: "sensor/audio".to_string(),
            location: "sensor/location".to_string(),
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            alpha: 0.2,
            buffer_capacity: 50,
            chart_capacity: 40,
            gate_period_ms: 60,
            gate_window_ms: 20,
            snapshot_len: 15,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            accel_gain: 0.5,
            damping: 0.95,
            bounce_damping: 0.5,
            player_radius: 8.0,
            target_radius: 12.0,
            obstacle_count: 5,
            obstacle_min_size: 20.0,
            obstacle_max_size: 60.0,
            spawn_margin: 30.0,
            proximity_range: 250.0,
        }
    }
}

impl Default for SpectrumConfig {
    fn default() -> Self {
        Self {
            fft_size: 128,
            smoothing: 0.8,
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            model: "deepseek-chat".to_string(),
            request_topic: "analysis/request".to_string(),
            response_topic: "analysis/response".to_string(),
            timeout_secs: 20,
        }
    }
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            motion_channel_capacity: 5000,
            audio_channel_capacity: 1000,
            geo_channel_capacity: 16,
            analysis_channel_capacity: 8,
        }
    }
}

impl AppConfig {
    /// 从文件加载配置
    pub fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::IoError)?;

        let config: AppConfig = toml::from_str(&content).map_err(ConfigError::ParseError)?;

        config.validate()?;
        Ok(config)
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            return Err(ConfigError::ValidationError(
                "Window dimensions must be positive".to_string(),
            ));
        }

        if self.filter.alpha <= 0.0 || self.filter.alpha > 1.0 {
            return Err(ConfigError::ValidationError(
                "Filter alpha must be in (0, 1]".to_string(),
            ));
        }

        if self.filter.buffer_capacity == 0 || self.filter.chart_capacity == 0 {
            return Err(ConfigError::ValidationError(
                "Filter buffer capacities must be positive".to_string(),
            ));
        }

        if self.filter.gate_window_ms <= 0 || self.filter.gate_window_ms >= self.filter.gate_period_ms {
            return Err(ConfigError::ValidationError(
                "Chart gate window must be positive and shorter than the period".to_string(),
            ));
        }

        if self.filter.snapshot_len == 0 || self.filter.snapshot_len > self.filter.buffer_capacity {
            return Err(ConfigError::ValidationError(
                "Snapshot length must fit inside the sample buffer".to_string(),
            ));
        }

        if self.game.damping <= 0.0 || self.game.damping >= 1.0 {
            return Err(ConfigError::ValidationError(
                "Game damping must be in (0, 1)".to_string(),
            ));
        }

        // 边距小于最大半径时目标可能贴边生成
        if self.game.spawn_margin < self.game.player_radius.max(self.game.target_radius) {
            return Err(ConfigError::ValidationError(
                "Spawn margin must be at least the largest body radius".to_string(),
            ));
        }

        if self.game.obstacle_min_size <= 0.0 || self.game.obstacle_max_size <= self.game.obstacle_min_size {
            return Err(ConfigError::ValidationError(
                "Obstacle size range is invalid".to_string(),
            ));
        }

        if self.spectrum.fft_size == 0 || self.spectrum.fft_size % 2 != 0 {
            return Err(ConfigError::ValidationError(
                "Spectrum FFT size must be a positive even number".to_string(),
            ));
        }

        if self.spectrum.smoothing < 0.0 || self.spectrum.smoothing >= 1.0 {
            return Err(ConfigError::ValidationError(
                "Spectrum smoothing must be in [0, 1)".to_string(),
            ));
        }

        if self.analysis.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "Analysis timeout must be positive".to_string(),
            ));
        }

        if self.channels.motion_channel_capacity == 0 {
            return Err(ConfigError::ValidationError(
                "Motion channel capacity must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

/// 配置错误类型
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(std::io::Error),
    #[error("Parse error: {0}")]
    ParseError(toml::de::Error),
    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// 配置管理器
pub struct ConfigManager {
    config: AppConfig,
}

impl ConfigManager {
    /// 创建配置管理器（使用默认配置）
    pub fn new() -> Self {
        Self { config: AppConfig::default() }
    }

    /// 从文件加载配置
    pub fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let config = AppConfig::load_from_file(&path)?;
        Ok(Self { config })
    }

    /// 获取当前配置
    pub fn get_config(&self) -> &AppConfig {
        &self.config
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
    fn default_config_is_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_bad_alpha() {
        let mut config = AppConfig::default();
        config.filter.alpha = 0.0;
        assert!(config.validate().is_err());
        config.filter.alpha = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_gate_window_wider_than_period() {
        let mut config = AppConfig::default();
        config.filter.gate_window_ms = 60;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_spawn_margin_below_radius() {
        let mut config = AppConfig::default();
        config.game.spawn_margin = 5.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn config_roundtrips_through_toml() {
        let config = AppConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.filter.buffer_capacity, config.filter.buffer_capacity);
        assert_eq!(parsed.game.obstacle_count, config.game.obstacle_count);
        assert_eq!(parsed.analysis.model, config.analysis.model);
    }
}
