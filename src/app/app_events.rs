use base64::{engine::general_purpose, Engine as _};
use crossbeam_channel::TryRecvError;
use log::{debug, error, info, warn};

use crate::analysis::{AnalysisKind, AnalysisTask};
use crate::types::{AnalysisResult, AudioData, GeoFix};
use crate::utils::{format_timestamp, now_millis};

use super::sensor_app::SensorFusionApp;

impl SensorFusionApp {
    /// 排空三条传感器通道。两个实时消费者（信号调理器和游戏引擎）
    /// 在同一事件队列上逐条处理，各自内部决定是否还在监听。
    pub fn handle_sensor_events(&mut self) {
        while let Ok(data) = self.state.channels.motion_receiver.try_recv() {
            self.state.conditioner.on_sample(&data);
            self.state.engine.apply_input(&data);
        }

        while let Ok(audio_data) = self.state.channels.audio_receiver.try_recv() {
            if self.state.audio_active {
                self.process_audio_data(&audio_data);
            }
        }

        loop {
            match self.state.channels.geo_receiver.try_recv() {
                Ok(fix) => {
                    if self.state.geo_waiting {
                        self.accept_geo_fix(fix);
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    // 传感器链路已断，挂起的定位请求不可能再完成
                    if self.state.geo_waiting {
                        warn!("Geo channel disconnected while waiting for a fix");
                        self.state.geo_waiting = false;
                        self.state.geo_error = "unavailable".to_string();
                    }
                    break;
                }
            }
        }
    }

    /// 接收后台分析线程的结果
    pub fn handle_analysis_outcomes(&mut self) {
        while let Ok(outcome) = self.state.analysis.outcome_receiver.try_recv() {
            let result = AnalysisResult::finished(outcome.text, outcome.timestamp);
            match outcome.kind {
                AnalysisKind::Motion => self.state.motion_analysis = result,
                AnalysisKind::Location => self.state.location_analysis = result,
                AnalysisKind::Image => {}
            }
        }
    }

    /// 把最近的平滑样本快照交给分析协作方（对帧循环免阻塞）
    pub fn request_motion_analysis(&mut self) {
        let samples = self.state.conditioner.snapshot();
        if samples.is_empty() {
            return;
        }

        self.state.motion_analysis = AnalysisResult::loading();
        let task = AnalysisTask::Motion { samples, language: self.state.language };
        if let Err(e) = self.state.analysis.task_sender.try_send(task) {
            error!("Failed to queue motion analysis: {}", e);
            self.state.motion_analysis = AnalysisResult::finished(String::new(), now_millis());
        }
    }

    /// 定位是单次请求：标记等待，下一条到达的定位结果被采纳
    pub fn request_location_fix(&mut self) {
        self.state.geo_waiting = true;
        self.state.geo_error.clear();
    }

    fn accept_geo_fix(&mut self, fix: GeoFix) {
        info!(
            "Location fix {:.5}, {:.5} (±{:.1} m), time: {}",
            fix.latitude,
            fix.longitude,
            fix.accuracy,
            format_timestamp(fix.timestamp)
        );
        self.state.geo_fix = Some(fix);
        self.state.geo_waiting = false;

        // 拿到定位后自动发起上下文分析
        self.state.location_analysis = AnalysisResult::loading();
        let task = AnalysisTask::Location {
            latitude: fix.latitude,
            longitude: fix.longitude,
            language: self.state.language,
        };
        if let Err(e) = self.state.analysis.task_sender.try_send(task) {
            error!("Failed to queue location analysis: {}", e);
            self.state.location_analysis = AnalysisResult::finished(String::new(), now_millis());
        }
    }

    fn process_audio_data(&mut self, audio_data: &AudioData) {
        debug!(
            "Audio chunk - {} samples, {} Hz, {}ch {}, time: {}",
            audio_data.samples,
            audio_data.sample_rate,
            audio_data.channels,
            audio_data.format,
            format_timestamp(audio_data.timestamp)
        );

        // 解码 Base64 音频数据
        match general_purpose::STANDARD.decode(&audio_data.audio_data) {
            Ok(decoded_bytes) => {
                // 将字节数据转换为 i16 样本
                let samples: Vec<i16> = decoded_bytes
                    .chunks_exact(2)
                    .map(|chunk| i16::from_le_bytes([chunk[0], chunk[1]]))
                    .collect();

                if !samples.is_empty() {
                    self.state.spectrum.process(&samples);
                }
            }
            Err(e) => {
                warn!("Failed to decode audio data: {}", e);
            }
        }
    }
}
