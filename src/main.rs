mod analysis;
mod app;
mod config;
mod game;
mod i18n;
mod logger;
mod motion;
mod mqtt;
mod spectrum;
mod types;
mod utils;

use std::env;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use crossbeam_channel::bounded;
use dotenv::dotenv;
use eframe::egui;
use log::{error, info, warn};

use analysis::MqttChatGateway;
use app::state::{AnalysisChannels, DataChannels};
use app::SensorFusionApp;
use config::ConfigManager;

fn main() {
    logger::init_logger();
    dotenv().ok(); // 加载 .env 文件
    info!("Application starting");

    // 配置文件可选，缺省时落回内置默认值
    let config_manager = match ConfigManager::load_from_file("config.toml") {
        Ok(manager) => {
            info!("Loaded configuration from config.toml");
            manager
        }
        Err(e) => {
            warn!("Using default configuration: {}", e);
            ConfigManager::new()
        }
    };
    let app_config = config_manager.get_config().clone();

    let mut mqtt_config = app_config.mqtt.clone();
    // 主机和端口允许环境变量覆盖配置文件
    if let Ok(host) = env::var("MQTT_HOST") {
        mqtt_config.broker = host;
    }
    if let Ok(port) = env::var("MQTT_PORT").map(|p| p.parse::<u16>()) {
        match port {
            Ok(port) => mqtt_config.port = port,
            Err(e) => warn!("Invalid MQTT_PORT, keeping {}: {}", mqtt_config.port, e),
        }
    }

    let (motion_sender, motion_receiver) = bounded(app_config.channels.motion_channel_capacity);
    let (audio_sender, audio_receiver) = bounded(app_config.channels.audio_channel_capacity);
    let (geo_sender, geo_receiver) = bounded(app_config.channels.geo_channel_capacity);
    let (task_sender, task_receiver) = bounded(app_config.channels.analysis_channel_capacity);
    let (outcome_sender, outcome_receiver) = bounded(app_config.channels.analysis_channel_capacity);

    let shutdown_signal = Arc::new(AtomicBool::new(false));

    let mqtt_shutdown = Arc::clone(&shutdown_signal);
    let sensor_mqtt_config = mqtt_config.clone();
    let mqtt_handle = thread::spawn(move || {
        if let Err(e) = mqtt::run_mqtt_client(
            sensor_mqtt_config,
            motion_sender,
            audio_sender,
            geo_sender,
            mqtt_shutdown,
        ) {
            error!("MQTT thread failed: {}", e);
        }
    });

    // 分析线程：任务通道断开后自行退出
    let gateway = MqttChatGateway::new(&mqtt_config, &app_config.analysis);
    let analysis_handle = analysis::spawn_worker(
        Box::new(gateway),
        app_config.analysis.model.clone(),
        task_receiver,
        outcome_sender,
    );

    let options = eframe::NativeOptions {
        vsync: app_config.window.vsync,
        hardware_acceleration: eframe::HardwareAcceleration::Preferred,
        renderer: eframe::Renderer::Glow,
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([app_config.window.width, app_config.window.height])
            .with_resizable(app_config.window.resizable),
        ..Default::default()
    };

    let channels = DataChannels { motion_receiver, audio_receiver, geo_receiver };
    let analysis_channels = AnalysisChannels { task_sender, outcome_receiver };

    if let Err(e) = eframe::run_native(
        &app_config.window.title,
        options,
        Box::new(move |_cc| {
            Ok(Box::new(SensorFusionApp::new(config_manager, channels, analysis_channels)))
        }),
    ) {
        error!("GUI failed: {}", e);
        std::process::exit(1);
    }

    // GUI 关闭后，发送关闭信号给后台线程
    info!("GUI closed, signaling background threads to shutdown");
    shutdown_signal.store(true, Ordering::Relaxed);

    match mqtt_handle.join() {
        Ok(()) => info!("MQTT thread shut down gracefully"),
        Err(e) => error!("MQTT thread panicked: {:?}", e),
    }

    // SensorFusionApp 随 GUI 一起析构，任务通道断开，分析线程随之退出
    match analysis_handle.join() {
        Ok(()) => info!("Analysis thread shut down gracefully"),
        Err(e) => error!("Analysis thread panicked: {:?}", e),
    }
}
