use serde::{Deserialize, Serialize};

/// 聊天补全接口的线上契约：角色标记的提示对进，纯文本出。
/// 传输方式（HTTP 直连还是经网关转发）藏在 ChatEndpoint 后面。

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("request timed out")]
    Timeout,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub stream: bool,
}

impl ChatRequest {
    /// system 指令 + user 内容的标准两段式请求
    pub fn new(model: &str, system_prompt: String, user_prompt: String) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![
                ChatMessage { role: "system".to_string(), content: system_prompt },
                ChatMessage { role: "user".to_string(), content: user_prompt },
            ],
            stream: false,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponseMessage {
    pub content: Option<String>,
}

impl ChatResponse {
    pub fn text(&self) -> String {
        self.choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .unwrap_or_default()
    }
}

/// 文本生成协作方。实现者负责把请求送到模型并取回正文；
/// 调用方保证在后台线程调用，不阻塞帧循环和传感器处理。
pub trait ChatEndpoint: Send {
    fn complete(&self, request: &ChatRequest) -> Result<String, AnalysisError>;
}
