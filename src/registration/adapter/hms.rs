use crate::registration::adapter::adapter_trait::RegistrationAdapter;
use crate::registration::types::PushVendor;

/// 华为 HMS 适配器
///
/// HMS 的 getToken 是阻塞调用，token 获取放到后台任务执行，
/// 避免卡住调用方；app id 由 SDK 自己的 agconnect 配置提供，
/// 这里不要求任何凭证。拿到 token 后还需要显式打开推送开关。
pub struct HmsAdapter;

impl RegistrationAdapter for HmsAdapter {
    fn vendor(&self) -> PushVendor {
        PushVendor::Hms
    }

    fn background_fetch(&self) -> bool {
        true
    }
}
