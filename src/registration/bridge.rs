use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tracing::{debug, error, warn};

use crate::registration::types::RegistrationRecord;

/// 宿主桥通道名
pub const PUSH_BRIDGE_CHANNEL: &str = "__PUSH_BRIDGE__";
/// 注册记录的入口方法名
pub const ON_REGISTER_PUSH: &str = "OnRegisterPush";
/// 通知点击数据的入口方法名
pub const ON_GET_LAUNCH_DATA: &str = "OnGetLaunchData";

/// 宿主边界的单向出口
///
/// fire-and-forget：无返回值、无重试、无背压，假定宿主随时可收。
/// 宿主未就绪导致的投递失败在这一层不可观测（已知空白，刻意不加确认机制）。
pub trait BridgeSink: Send + Sync {
    fn deliver(&self, channel: &str, entry_point: &str, json: &str);
}

/// 投递给宿主的一条消息
#[derive(Debug, Clone)]
pub struct BridgeMessage {
    pub channel: String,
    pub entry_point: String,
    pub json: String,
    pub emitted_at: DateTime<Utc>,
}

/// 进程内通道实现的宿主桥
///
/// 二进制和测试用它观察出站消息；发送失败（接收端已关闭）被忽略，
/// 语义与真实宿主边界一致。
pub struct ChannelBridge {
    tx: mpsc::UnboundedSender<BridgeMessage>,
}

impl ChannelBridge {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<BridgeMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl BridgeSink for ChannelBridge {
    fn deliver(&self, channel: &str, entry_point: &str, json: &str) {
        let _ = self.tx.send(BridgeMessage {
            channel: channel.to_string(),
            entry_point: entry_point.to_string(),
            json: json.to_string(),
            emitted_at: Utc::now(),
        });
    }
}

/// 注册记录发射器
///
/// 唯一职责：序列化 + 一次性投递到固定的通道 / 入口。
#[derive(Clone)]
pub struct BridgeEmitter {
    sink: Arc<dyn BridgeSink>,
}

impl BridgeEmitter {
    pub fn new(sink: Arc<dyn BridgeSink>) -> Self {
        Self { sink }
    }

    /// 投递一条注册记录
    ///
    /// 不变量：token 为空的记录一律不出站
    pub fn emit(&self, record: &RegistrationRecord) {
        if record.registration_id.is_empty() {
            warn!(
                "[BRIDGE] dropping {} record with empty registration id",
                record.vendor
            );
            return;
        }

        match serde_json::to_string(record) {
            Ok(json) => {
                debug!("[BRIDGE] {} -> {}", ON_REGISTER_PUSH, json);
                self.sink.deliver(PUSH_BRIDGE_CHANNEL, ON_REGISTER_PUSH, &json);
            }
            Err(e) => {
                error!("[BRIDGE] failed to serialize record: {}", e);
            }
        }
    }

    /// 投递一条通知点击数据
    pub fn emit_launch_data(&self, json: &str) {
        self.sink
            .deliver(PUSH_BRIDGE_CHANNEL, ON_GET_LAUNCH_DATA, json);
    }
}
