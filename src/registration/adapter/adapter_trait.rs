use tracing::warn;

use crate::registration::types::{CredentialField, LaunchPayloadMode, PushVendor};

/// 厂商注册回调的翻译接口
///
/// 每家厂商一个实现，差异只在三处：成功码约定、注册前是否需要
/// 能力探测、点击数据走结构化字段还是整包兜底。适配器本身无状态。
pub trait RegistrationAdapter: Send + Sync {
    fn vendor(&self) -> PushVendor;

    /// 该厂商回调的成功码约定
    fn success_code(&self) -> i32 {
        0
    }

    /// 注册前是否需要先探测设备支持
    fn requires_probe(&self) -> bool {
        false
    }

    /// token 获取是否放到后台任务（华为的 getToken 是阻塞调用）
    fn background_fetch(&self) -> bool {
        false
    }

    /// 注册前必须非空的凭证字段
    fn required_credentials(&self) -> &'static [CredentialField] {
        &[]
    }

    /// 通知点击数据的提取模式
    fn launch_payload_mode(&self) -> LaunchPayloadMode {
        LaunchPayloadMode::Structured
    }

    /// 回调翻译：成功码且 token 非空才产出，其余情况只记日志
    fn on_token(&self, code: i32, token: Option<&str>) -> Option<String> {
        if code != self.success_code() {
            warn!("[{}] register callback code: {}", self.vendor(), code);
            return None;
        }

        match token {
            Some(t) if !t.is_empty() => Some(t.to_string()),
            _ => {
                warn!("[{}] register succeeded but token is empty", self.vendor());
                None
            }
        }
    }
}
