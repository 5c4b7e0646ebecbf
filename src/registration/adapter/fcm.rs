use tracing::warn;

use crate::registration::adapter::adapter_trait::RegistrationAdapter;
use crate::registration::types::PushVendor;

/// FCM (Firebase Cloud Messaging) 适配器
///
/// FCM 的 token 获取没有结果码，拿到非空 token 即成功；
/// 凭证走 google-services 配置文件，不从本配置取。
pub struct FcmAdapter;

impl RegistrationAdapter for FcmAdapter {
    fn vendor(&self) -> PushVendor {
        PushVendor::Fcm
    }

    fn on_token(&self, _code: i32, token: Option<&str>) -> Option<String> {
        match token {
            Some(t) if !t.is_empty() => Some(t.to_string()),
            _ => {
                warn!("[fcm] token fetch returned empty token");
                None
            }
        }
    }
}
