use std::thread;

use crossbeam_channel::{Receiver, Sender};
use log::{info, warn};

use crate::i18n::{translations, Language};
use crate::types::{AnalysisResult, DataPoint};
use crate::utils::now_millis;

use super::client::{ChatEndpoint, ChatRequest};
use super::prompts;

/// 分析任务：由各面板投递，在后台工作线程中执行
pub enum AnalysisTask {
    Motion {
        samples: Vec<DataPoint>,
        language: Language,
    },
    Location {
        latitude: f64,
        longitude: f64,
        language: Language,
    },
    Image {
        language: Language,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisKind {
    Motion,
    Location,
    Image,
}

/// 工作线程回传给 UI 的结果。text 为空串表示调用边界吞掉了一次失败。
#[derive(Debug)]
pub struct AnalysisOutcome {
    pub kind: AnalysisKind,
    pub text: String,
    pub timestamp: i64,
}

/// 启动分析工作线程。任务逐个执行，结果经通道回传；
/// 通道断开即 UI 已退出，线程随之结束。
pub fn spawn_worker(
    endpoint: Box<dyn ChatEndpoint>,
    model: String,
    tasks: Receiver<AnalysisTask>,
    outcomes: Sender<AnalysisOutcome>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        for task in tasks.iter() {
            let outcome = run_task(endpoint.as_ref(), &model, task);
            if outcomes.send(outcome).is_err() {
                info!("Analysis outcome channel disconnected, worker exiting");
                break;
            }
        }
    })
}

/// 执行一个分析任务。端点的任何失败都在这里归一化成空串，
/// 没有重试；图像分析是固定文案的占位实现，不会有载荷出程。
pub fn run_task(endpoint: &dyn ChatEndpoint, model: &str, task: AnalysisTask) -> AnalysisOutcome {
    let (kind, text) = match task {
        AnalysisTask::Motion { samples, language } => {
            let request = ChatRequest::new(
                model,
                prompts::motion_system_prompt(language).to_string(),
                prompts::motion_user_prompt(&samples),
            );
            (AnalysisKind::Motion, complete_or_empty(endpoint, &request))
        }
        AnalysisTask::Location { latitude, longitude, language } => {
            let request = ChatRequest::new(
                model,
                prompts::location_system_prompt(language).to_string(),
                prompts::location_user_prompt(latitude, longitude),
            );
            (AnalysisKind::Location, complete_or_empty(endpoint, &request))
        }
        AnalysisTask::Image { language } => (
            AnalysisKind::Image,
            translations(language).image_not_supported.to_string(),
        ),
    };

    AnalysisOutcome { kind, text, timestamp: now_millis() }
}

fn complete_or_empty(endpoint: &dyn ChatEndpoint, request: &ChatRequest) -> String {
    match endpoint.complete(request) {
        Ok(text) => text,
        Err(e) => {
            warn!("Analysis request failed: {}", e);
            String::new()
        }
    }
}

/// 面板展示文案：完成但为空串的结果替换成本地化兜底提示
pub fn resolve_display_text<'a>(
    kind: AnalysisKind,
    result: &'a AnalysisResult,
    language: Language,
) -> &'a str {
    if result.is_failed() {
        let t = translations(language);
        return match kind {
            AnalysisKind::Motion => t.unable_to_analyze_motion,
            AnalysisKind::Location => t.unable_to_analyze_location,
            AnalysisKind::Image => t.image_not_supported,
        };
    }
    &result.text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::client::AnalysisError;
    use std::time::Duration;

    struct FailingEndpoint;

    impl ChatEndpoint for FailingEndpoint {
        fn complete(&self, _request: &ChatRequest) -> Result<String, AnalysisError> {
            Err(AnalysisError::Transport("connection refused".to_string()))
        }
    }

    struct EchoEndpoint;

    impl ChatEndpoint for EchoEndpoint {
        fn complete(&self, request: &ChatRequest) -> Result<String, AnalysisError> {
            Ok(format!("echo: {}", request.messages[1].content.len()))
        }
    }

    struct PanickingEndpoint;

    impl ChatEndpoint for PanickingEndpoint {
        fn complete(&self, _request: &ChatRequest) -> Result<String, AnalysisError> {
            panic!("image analysis must never reach the endpoint");
        }
    }

    fn fifteen_samples() -> Vec<DataPoint> {
        (0..15).map(|i| DataPoint::new(0.1, 0.2, 9.8, i)).collect()
    }

    #[test]
    fn endpoint_failure_normalizes_to_empty_string() {
        let outcome = run_task(
            &FailingEndpoint,
            "deepseek-chat",
            AnalysisTask::Motion { samples: fifteen_samples(), language: Language::Zh },
        );

        assert_eq!(outcome.kind, AnalysisKind::Motion);
        assert_eq!(outcome.text, "");
    }

    #[test]
    fn failed_motion_analysis_displays_localized_fallback() {
        let outcome = run_task(
            &FailingEndpoint,
            "deepseek-chat",
            AnalysisTask::Motion { samples: fifteen_samples(), language: Language::Zh },
        );

        // 面板状态 {is_loading:false, text:""}，随后显示本地化兜底文案
        let result = AnalysisResult::finished(outcome.text, outcome.timestamp);
        assert!(!result.is_loading);
        assert_eq!(result.text, "");
        assert_eq!(
            resolve_display_text(AnalysisKind::Motion, &result, Language::Zh),
            "无法分析数据。"
        );
        assert_eq!(
            resolve_display_text(AnalysisKind::Motion, &result, Language::En),
            "Unable to analyze data."
        );
    }

    #[test]
    fn successful_text_passes_through_unchanged() {
        let outcome = run_task(
            &EchoEndpoint,
            "deepseek-chat",
            AnalysisTask::Location { latitude: 1.0, longitude: 2.0, language: Language::En },
        );

        assert!(outcome.text.starts_with("echo: "));
        let result = AnalysisResult::finished(outcome.text.clone(), outcome.timestamp);
        assert_eq!(
            resolve_display_text(AnalysisKind::Location, &result, Language::En),
            outcome.text
        );
    }

    #[test]
    fn image_analysis_is_a_stub_and_never_calls_the_endpoint() {
        let outcome = run_task(
            &PanickingEndpoint,
            "deepseek-chat",
            AnalysisTask::Image { language: Language::Zh },
        );

        assert_eq!(outcome.kind, AnalysisKind::Image);
        assert_eq!(outcome.text, "当前 DeepSeek API 模型暂不支持图像分析功能。");
    }

    #[test]
    fn idle_result_shows_empty_text_not_fallback() {
        let result = AnalysisResult::idle();
        assert_eq!(resolve_display_text(AnalysisKind::Motion, &result, Language::Zh), "");
    }

    #[test]
    fn worker_executes_tasks_and_reports_over_channel() {
        let (task_sender, task_receiver) = crossbeam_channel::bounded(8);
        let (outcome_sender, outcome_receiver) = crossbeam_channel::bounded(8);

        let handle = spawn_worker(
            Box::new(FailingEndpoint),
            "deepseek-chat".to_string(),
            task_receiver,
            outcome_sender,
        );

        task_sender
            .send(AnalysisTask::Motion { samples: fifteen_samples(), language: Language::En })
            .unwrap();

        let outcome = outcome_receiver.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(outcome.kind, AnalysisKind::Motion);
        assert_eq!(outcome.text, "");

        drop(task_sender);
        handle.join().unwrap();
    }
}
