/// 界面语言切换模块
/// 所有面向用户的文案集中在这里，按语言提供静态翻译表

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Language {
    En,
    Zh,
}

impl Language {
    pub fn toggled(&self) -> Self {
        match self {
            Language::En => Language::Zh,
            Language::Zh => Language::En,
        }
    }
}

pub struct Translations {
    pub app_title: &'static str,
    pub nav_motion: &'static str,
    pub nav_audio: &'static str,
    pub nav_location: &'static str,
    pub nav_game: &'static str,

    pub motion_live_feed: &'static str,
    pub motion_waiting: &'static str,
    pub motion_start_btn: &'static str,
    pub motion_stop_btn: &'static str,
    pub motion_analyze_btn: &'static str,
    pub motion_analyzing: &'static str,
    pub motion_placeholder: &'static str,

    pub audio_start_btn: &'static str,
    pub audio_stop_btn: &'static str,
    pub audio_description: &'static str,

    pub location_get_btn: &'static str,
    pub location_waiting: &'static str,
    pub location_acquired: &'static str,
    pub location_lat: &'static str,
    pub location_lon: &'static str,
    pub location_accuracy: &'static str,
    pub location_error: &'static str,

    pub game_score: &'static str,
    pub game_start_btn: &'static str,
    pub game_retry_btn: &'static str,
    pub game_over_title: &'static str,
    pub game_instructions: &'static str,

    // 分析失败时的本地化兜底文案
    pub unable_to_analyze_motion: &'static str,
    pub unable_to_analyze_location: &'static str,
    pub image_not_supported: &'static str,
}

static EN: Translations = Translations {
    app_title: "SensorFusion",
    nav_motion: "Motion",
    nav_audio: "Audio",
    nav_location: "Location",
    nav_game: "Game",

    motion_live_feed: "Live Feed",
    motion_waiting: "Waiting for accelerometer data...",
    motion_start_btn: "Start Sensors",
    motion_stop_btn: "Stop Sensors",
    motion_analyze_btn: "Identify Motion",
    motion_analyzing: "Analyzing...",
    motion_placeholder: "Perform a motion (shake, tilt, walk) and ask AI to identify it.",

    audio_start_btn: "Start Microphone",
    audio_stop_btn: "Stop Microphone",
    audio_description: "Real-time frequency spectrum of the microphone input stream.",

    location_get_btn: "Get Location",
    location_waiting: "Waiting for a position fix...",
    location_acquired: "GPS SIGNAL ACQUIRED",
    location_lat: "Latitude",
    location_lon: "Longitude",
    location_accuracy: "Accuracy",
    location_error: "Geolocation source is not available.",

    game_score: "Score",
    game_start_btn: "Start Game",
    game_retry_btn: "Retry",
    game_over_title: "CRITICAL FAILURE",
    game_instructions: "Tilt the device to steer the core. Reach the green zone, avoid the red blocks.",

    unable_to_analyze_motion: "Unable to analyze data.",
    unable_to_analyze_location: "Unable to analyze location.",
    image_not_supported: "The current DeepSeek API model does not support image analysis.",
};

static ZH: Translations = Translations {
    app_title: "传感器融合",
    nav_motion: "运动",
    nav_audio: "音频",
    nav_location: "定位",
    nav_game: "游戏",

    motion_live_feed: "实时数据",
    motion_waiting: "等待加速度计数据...",
    motion_start_btn: "启动传感器",
    motion_stop_btn: "停止传感器",
    motion_analyze_btn: "识别运动",
    motion_analyzing: "分析中...",
    motion_placeholder: "做一个动作（摇晃、倾斜、走动），让 AI 识别它。",

    audio_start_btn: "开启麦克风",
    audio_stop_btn: "关闭麦克风",
    audio_description: "麦克风输入流的实时频谱。",

    location_get_btn: "获取位置",
    location_waiting: "等待定位结果...",
    location_acquired: "已获取 GPS 信号",
    location_lat: "纬度",
    location_lon: "经度",
    location_accuracy: "精度",
    location_error: "定位数据源不可用。",

    game_score: "得分",
    game_start_btn: "开始游戏",
    game_retry_btn: "重试",
    game_over_title: "严重故障",
    game_instructions: "倾斜设备控制小球，抵达绿色目标区，避开红色障碍。",

    unable_to_analyze_motion: "无法分析数据。",
    unable_to_analyze_location: "无法分析位置。",
    image_not_supported: "当前 DeepSeek API 模型暂不支持图像分析功能。",
};

pub fn translations(language: Language) -> &'static Translations {
    match language {
        Language::En => &EN,
        Language::Zh => &ZH,
    }
}
