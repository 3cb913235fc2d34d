use crate::i18n::Language;
use crate::types::DataPoint;

/// 各分析任务的提示词模板。system 指令决定回复语言，
/// user 内容携带 JSON 序列化的样本数组或一对经纬度。

pub fn motion_system_prompt(language: Language) -> &'static str {
    match language {
        Language::Zh => "你是一个传感器数据分析专家。请用简体中文回答。",
        Language::En => "You are a sensor data expert. Please reply in English.",
    }
}

pub fn motion_user_prompt(samples: &[DataPoint]) -> String {
    let serialized = serde_json::to_string(samples).unwrap_or_else(|_| "[]".to_string());
    format!(
        "Analyze this accelerometer data (x,y,z,timestamp) over 2 seconds:\n{}\n\
         Briefly describe the likely physical motion (e.g., resting, shaking, tilting). \
         Keep it under 30 words.",
        serialized
    )
}

pub fn location_system_prompt(language: Language) -> &'static str {
    match language {
        Language::Zh => "你是一个地理学家。请用简体中文回答。",
        Language::En => "You are a geographer. Please reply in English.",
    }
}

pub fn location_user_prompt(latitude: f64, longitude: f64) -> String {
    format!(
        "I am at Latitude: {}, Longitude: {}.\n\
         Without giving the exact address, describe the general geographical context, \
         climate zone, or interesting facts about this region.\n\
         Keep it educational and under 50 words.",
        latitude, longitude
    )
}
