/// 单次定位结果（不是流，设备按请求发布一次）
#[derive(serde::Deserialize, Clone, Copy, Debug)]
pub struct GeoFix {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: f64,
    pub timestamp: i64,
}
