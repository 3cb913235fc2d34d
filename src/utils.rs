use chrono::{Local, LocalResult, TimeZone};

/// 将毫秒时间戳格式化为标准时间格式 HH:MM:SS.mmm
pub fn format_timestamp(timestamp_ms: i64) -> String {
    match Local.timestamp_millis_opt(timestamp_ms) {
        LocalResult::Single(dt) => dt.format("%H:%M:%S%.3f").to_string(),
        _ => format!("Invalid timestamp: {}", timestamp_ms),
    }
}

/// 当前墙钟时间（毫秒）
pub fn now_millis() -> i64 {
    Local::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_has_millisecond_precision() {
        let formatted = format_timestamp(1_700_000_000_123);
        // HH:MM:SS.mmm
        assert_eq!(formatted.len(), 12);
        assert!(formatted.ends_with("123"));
    }
}
