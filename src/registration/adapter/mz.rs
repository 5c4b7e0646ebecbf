use crate::registration::adapter::adapter_trait::RegistrationAdapter;
use crate::registration::types::{CredentialField, PushVendor};

/// 魅族 Flyme 推送适配器
///
/// 魅族的注册状态回调用 200 表示成功，pushId 即 token。
pub struct MzAdapter;

impl RegistrationAdapter for MzAdapter {
    fn vendor(&self) -> PushVendor {
        PushVendor::Mz
    }

    fn success_code(&self) -> i32 {
        200
    }

    fn required_credentials(&self) -> &'static [CredentialField] {
        &[CredentialField::AppId, CredentialField::AppKey]
    }
}
