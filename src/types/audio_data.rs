/// 音频话题的消息体：Base64 编码的 16bit PCM 块
#[derive(serde::Deserialize, Clone, Debug)]
pub struct AudioData {
    pub audio_data: String,
    pub sample_rate: u32,
    pub channels: u8,
    pub format: String,
    pub samples: usize,
    pub timestamp: i64,
}
