/// 面板侧的分析请求状态
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    pub is_loading: bool,
    pub text: String,
    pub timestamp: Option<i64>,
}

impl AnalysisResult {
    /// 初始状态：还没有发起过任何请求
    pub fn idle() -> Self {
        Self {
            is_loading: false,
            text: String::new(),
            timestamp: None,
        }
    }

    pub fn loading() -> Self {
        Self {
            is_loading: true,
            text: String::new(),
            timestamp: None,
        }
    }

    pub fn finished(text: String, timestamp: i64) -> Self {
        Self {
            is_loading: false,
            text,
            timestamp: Some(timestamp),
        }
    }

    /// 请求完成但结果为空串，即调用边界吞掉了一次失败
    pub fn is_failed(&self) -> bool {
        !self.is_loading && self.timestamp.is_some() && self.text.is_empty()
    }
}

impl Default for AnalysisResult {
    fn default() -> Self {
        Self::idle()
    }
}
