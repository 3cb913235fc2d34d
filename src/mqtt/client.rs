use std::env;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::Sender;
use log::{error, info, warn};
use rumqttc::{Client, Event, LastWill, MqttOptions, Packet, QoS};

use crate::config::MqttConfig;
use crate::types::{AudioData, DataPoint, GeoFix};

/// 传感器链路：设备把加速度/音频/定位以 JSON 发布到各自话题，
/// 这里在专用线程上消费并推进有界通道。通道断开说明 GUI 已退出。
pub fn run_mqtt_client(
    config: MqttConfig,
    motion_sender: Sender<DataPoint>,
    audio_sender: Sender<AudioData>,
    geo_sender: Sender<GeoFix>,
    shutdown_signal: Arc<AtomicBool>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut mqtt_options = MqttOptions::new(&config.client_id, &config.broker, config.port);

    // 凭据从 .env 读取，主机端口允许环境变量覆盖配置文件
    if let (Ok(user), Ok(pass)) = (env::var("MQTT_USER"), env::var("MQTT_PASS")) {
        mqtt_options.set_credentials(user, pass);
    }

    mqtt_options
        .set_keep_alive(Duration::from_secs(config.keep_alive as u64))
        .set_last_will(LastWill::new(
            &config.topics.motion,
            "offline",
            QoS::AtLeastOnce,
            false,
        ));

    let (client, mut connection) = Client::new(mqtt_options, 10);
    client.subscribe(&config.topics.motion, QoS::AtLeastOnce)?;
    client.subscribe(&config.topics.audio, QoS::AtLeastOnce)?;
    client.subscribe(&config.topics.location, QoS::AtLeastOnce)?;

    for event in connection.iter() {
        if shutdown_signal.load(Ordering::Relaxed) {
            info!("MQTT thread received shutdown signal, exiting gracefully");
            break;
        }

        match event {
            Ok(Event::Incoming(Packet::Publish(publish))) => {
                if publish.topic == config.topics.motion {
                    match parse_payload::<DataPoint>(&publish.payload) {
                        Ok(data) => {
                            if motion_sender.send(data).is_err() {
                                info!("Motion channel disconnected, MQTT thread exiting");
                                break;
                            }
                        }
                        Err(e) => warn!("Invalid motion data: {}", e),
                    }
                } else if publish.topic == config.topics.audio {
                    match parse_payload::<AudioData>(&publish.payload) {
                        Ok(data) => {
                            if audio_sender.send(data).is_err() {
                                info!("Audio channel disconnected, MQTT thread exiting");
                                break;
                            }
                        }
                        Err(e) => warn!("Invalid audio data: {}", e),
                    }
                } else if publish.topic == config.topics.location {
                    match parse_payload::<GeoFix>(&publish.payload) {
                        Ok(fix) => {
                            if geo_sender.send(fix).is_err() {
                                info!("Geo channel disconnected, MQTT thread exiting");
                                break;
                            }
                        }
                        Err(e) => warn!("Invalid location data: {}", e),
                    }
                }
            }
            Ok(Event::Incoming(_)) => {}
            Err(e) => {
                error!("MQTT connection error: {}", e);
                return Err(e.into());
            }
            _ => {}
        }
    }

    Ok(())
}

fn parse_payload<T: serde::de::DeserializeOwned>(payload: &[u8]) -> Result<T, String> {
    let payload_str =
        std::str::from_utf8(payload).map_err(|e| format!("Invalid UTF-8: {}", e))?;

    serde_json::from_str::<T>(payload_str).map_err(|e| format!("JSON parsing error: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_motion_payload() {
        let payload = br#"{"x":0.12,"y":-0.3,"z":9.81,"timestamp":1700000000000}"#;
        let data: DataPoint = parse_payload(payload).unwrap();
        assert_eq!(data.x, 0.12);
        assert_eq!(data.timestamp, 1_700_000_000_000);
    }

    #[test]
    fn parses_location_payload() {
        let payload =
            br#"{"latitude":39.9,"longitude":116.4,"accuracy":12.5,"timestamp":1700000000000}"#;
        let fix: GeoFix = parse_payload(payload).unwrap();
        assert_eq!(fix.latitude, 39.9);
        assert_eq!(fix.accuracy, 12.5);
    }

    #[test]
    fn rejects_malformed_payloads() {
        assert!(parse_payload::<DataPoint>(b"not json").is_err());
        assert!(parse_payload::<DataPoint>(&[0xff, 0xfe]).is_err());
    }
}
