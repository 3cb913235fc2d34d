use std::env;
use std::time::{Duration, Instant};

use log::{debug, warn};
use rand::Rng;
use rumqttc::{Client, Event, MqttOptions, Packet, QoS};

use crate::config::{AnalysisConfig, MqttConfig};
use crate::utils::now_millis;

use super::client::{AnalysisError, ChatEndpoint, ChatRequest, ChatResponse};

/// 经 MQTT 网关转发的聊天补全端点
///
/// 请求发布到 request_topic/<id>，在 response_topic/<id> 上等待
/// 网关回发的补全结果；<id> 是每次请求生成的关联号。
/// 请求之间互不共享连接，一次失败只终结这一次请求。
pub struct MqttChatGateway {
    broker: String,
    port: u16,
    client_id: String,
    request_topic: String,
    response_topic: String,
    timeout: Duration,
    credentials: Option<(String, String)>,
}

impl MqttChatGateway {
    pub fn new(mqtt: &MqttConfig, analysis: &AnalysisConfig) -> Self {
        // 凭据与传感器链路共用 .env 配置
        let credentials = match (env::var("MQTT_USER"), env::var("MQTT_PASS")) {
            (Ok(user), Ok(pass)) => Some((user, pass)),
            _ => None,
        };

        Self {
            broker: mqtt.broker.clone(),
            port: mqtt.port,
            client_id: mqtt.client_id.clone(),
            request_topic: analysis.request_topic.clone(),
            response_topic: analysis.response_topic.clone(),
            timeout: Duration::from_secs(analysis.timeout_secs),
            credentials,
        }
    }
}

impl ChatEndpoint for MqttChatGateway {
    fn complete(&self, request: &ChatRequest) -> Result<String, AnalysisError> {
        let payload = serde_json::to_vec(request)
            .map_err(|e| AnalysisError::Malformed(e.to_string()))?;

        let correlation_id = format!("{}-{:08x}", now_millis(), rand::rng().random::<u32>());
        let request_topic = format!("{}/{}", self.request_topic, correlation_id);
        let response_topic = format!("{}/{}", self.response_topic, correlation_id);

        let mut options = MqttOptions::new(
            format!("{}-analysis-{}", self.client_id, correlation_id),
            self.broker.clone(),
            self.port,
        );
        options.set_keep_alive(Duration::from_secs(5));
        if let Some((user, pass)) = &self.credentials {
            options.set_credentials(user.clone(), pass.clone());
        }

        let (client, mut connection) = Client::new(options, 10);
        client
            .subscribe(&response_topic, QoS::AtLeastOnce)
            .map_err(|e| AnalysisError::Transport(e.to_string()))?;
        client
            .publish(&request_topic, QoS::AtLeastOnce, false, payload)
            .map_err(|e| AnalysisError::Transport(e.to_string()))?;

        debug!("Analysis request published to {}", request_topic);

        let deadline = Instant::now() + self.timeout;
        loop {
            let remaining = match deadline.checked_duration_since(Instant::now()) {
                Some(remaining) if !remaining.is_zero() => remaining,
                _ => {
                    warn!("Analysis request {} timed out", correlation_id);
                    return Err(AnalysisError::Timeout);
                }
            };

            match connection.recv_timeout(remaining) {
                Ok(Ok(Event::Incoming(Packet::Publish(publish))))
                    if publish.topic == response_topic =>
                {
                    let response: ChatResponse = serde_json::from_slice(&publish.payload)
                        .map_err(|e| AnalysisError::Malformed(e.to_string()))?;
                    let _ = client.disconnect();
                    return Ok(response.text());
                }
                Ok(Ok(_)) => {}
                Ok(Err(e)) => return Err(AnalysisError::Transport(e.to_string())),
                Err(_) => return Err(AnalysisError::Timeout),
            }
        }
    }
}
