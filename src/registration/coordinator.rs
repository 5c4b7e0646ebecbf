use std::sync::Arc;

use dashmap::DashMap;
use tracing::{info, warn};

use crate::config::{PushConfig, VendorCredentials};
use crate::error::BridgeError;
use crate::registration::adapter::{adapter_for, RegistrationAdapter};
use crate::registration::bridge::{BridgeEmitter, BridgeSink};
use crate::registration::intent::{
    IntentParser, IntentParserSlot, IntentPayloadExtractor, LaunchIntent, OpaqueBundleParser,
};
use crate::registration::normalizer;
use crate::registration::sdk::VendorSdk;
use crate::registration::types::{LaunchPayloadMode, PushVendor, VendorPhase};

/// 注册协调器
///
/// 职责：
/// - 对每个启用的厂商走 凭证校验 → 初始化 → 能力探测 → 注册 的流程
/// - 把厂商回调经 Adapter / Normalizer 翻译后交给 BridgeEmitter
/// - 持有兜底解析器的覆盖槽（非全局单例）
/// - 用 DashMap 跟踪各厂商独立的状态机，厂商之间无共享状态
///
/// 任何一家的失败都只影响自己：`register` 不向调用方返回错误，
/// 失败只体现为该厂商落入终态且不产生注册事件。终态不自动重试，
/// 重试策略归调用方。
#[derive(Clone)]
pub struct RegistrationCoordinator {
    config: Arc<PushConfig>,
    emitter: BridgeEmitter,
    parser_slot: Arc<IntentParserSlot>,
    phases: Arc<DashMap<PushVendor, VendorPhase>>,
}

impl RegistrationCoordinator {
    pub fn new(config: PushConfig, sink: Arc<dyn BridgeSink>) -> Self {
        Self {
            config: Arc::new(config),
            emitter: BridgeEmitter::new(sink),
            parser_slot: Arc::new(IntentParserSlot::new()),
            phases: Arc::new(DashMap::new()),
        }
    }

    /// 当前厂商状态
    pub fn phase(&self, vendor: PushVendor) -> VendorPhase {
        self.phases
            .get(&vendor)
            .map(|p| *p)
            .unwrap_or(VendorPhase::Uninitialized)
    }

    fn set_phase(&self, vendor: PushVendor, phase: VendorPhase) {
        self.phases.insert(vendor, phase);
    }

    /// 为一个厂商发起注册
    ///
    /// 返回发起后的状态；华为走后台任务时返回的是进行中的状态。
    /// 上一次注册仍在进行中时视为重复发起，直接跳过。
    /// 终态后的再次调用视为调用方主动重试，状态机重新开始。
    pub async fn register(
        &self,
        adapter: Arc<dyn RegistrationAdapter>,
        sdk: Arc<dyn VendorSdk>,
    ) -> VendorPhase {
        let vendor = adapter.vendor();

        let current = self.phase(vendor);
        if current.is_in_flight() {
            warn!(
                "[COORDINATOR] {} registration already in flight, skipping duplicate",
                vendor
            );
            return current;
        }
        self.set_phase(vendor, VendorPhase::Initializing);

        // 凭证校验在任何 SDK 调用之前；缺失只影响该厂商
        let credentials = self.config.credentials(vendor).clone();
        for field in adapter.required_credentials() {
            if credentials.get(*field).map_or(true, |v| v.is_empty()) {
                warn!(
                    "[COORDINATOR] {}",
                    BridgeError::CredentialMissing {
                        vendor,
                        field: *field,
                    }
                );
                self.set_phase(vendor, VendorPhase::Failed);
                return VendorPhase::Failed;
            }
        }

        if adapter.background_fetch() {
            // 华为的 token 获取是阻塞调用，放后台任务，不卡住调用方
            let coordinator = self.clone();
            tokio::spawn(async move {
                coordinator.run_registration(adapter, sdk, &credentials).await;
            });
            return self.phase(vendor);
        }

        self.run_registration(adapter, sdk, &credentials).await
    }

    /// 为所有给定的 (Adapter, SDK) 对依次发起注册
    pub async fn register_all(
        &self,
        pairs: Vec<(Arc<dyn RegistrationAdapter>, Arc<dyn VendorSdk>)>,
    ) {
        for (adapter, sdk) in pairs {
            self.register(adapter, sdk).await;
        }
    }

    /// 配置启用的厂商适配器列表
    pub fn enabled_adapters(&self) -> Vec<Arc<dyn RegistrationAdapter>> {
        self.config
            .enabled()
            .into_iter()
            .map(adapter_for)
            .collect()
    }

    async fn run_registration(
        &self,
        adapter: Arc<dyn RegistrationAdapter>,
        sdk: Arc<dyn VendorSdk>,
        credentials: &VendorCredentials,
    ) -> VendorPhase {
        let vendor = adapter.vendor();
        let phase = match self.try_register(&*adapter, &*sdk, credentials).await {
            Ok(()) => VendorPhase::Registered,
            Err(BridgeError::UnsupportedDevice(v)) => {
                warn!("[COORDINATOR] {}", BridgeError::UnsupportedDevice(v));
                VendorPhase::Unsupported
            }
            Err(e) => {
                warn!("[COORDINATOR] {}", e);
                VendorPhase::Failed
            }
        };
        self.set_phase(vendor, phase);
        phase
    }

    async fn try_register(
        &self,
        adapter: &dyn RegistrationAdapter,
        sdk: &dyn VendorSdk,
        credentials: &VendorCredentials,
    ) -> crate::error::Result<()> {
        let vendor = adapter.vendor();

        sdk.init(credentials).await?;

        if adapter.requires_probe() {
            self.set_phase(vendor, VendorPhase::Probing);
            if !sdk.is_supported().await {
                return Err(BridgeError::UnsupportedDevice(vendor));
            }
        }

        // opaque 厂商一旦进入注册就安装自己的兜底解析器（后写覆盖先写）
        if adapter.launch_payload_mode() == LaunchPayloadMode::OpaqueBundle {
            self.parser_slot
                .set(Arc::new(OpaqueBundleParser::new(opaque_parser_name(vendor))));
        }

        self.set_phase(vendor, VendorPhase::Registering);
        let result = sdk.request_token().await;
        let token = adapter
            .on_token(result.code, result.token.as_deref())
            .ok_or(BridgeError::RegistrationFailed {
                vendor,
                code: result.code,
            })?;

        let record = normalizer::normalize(vendor, &token);
        self.emitter.emit(&record);
        info!(
            "[COORDINATOR] {} registered, installation id {}",
            vendor, record.installation_id
        );

        // 部分厂商拿到 token 后要显式打开推送开关，结果只记日志
        if let Err(e) = sdk.turn_on().await {
            warn!("[COORDINATOR] {} turn on push failed: {}", vendor, e);
        }

        Ok(())
    }

    /// 查询通知点击数据（宿主按需调用）
    pub fn launch_data(&self, intent: Option<&LaunchIntent>) -> Option<String> {
        self.extractor().launch_data(intent)
    }

    /// 显式替换兜底解析器（与注册时的自动安装同一个槽位）
    pub fn set_intent_parser(&self, parser: Arc<dyn IntentParser>) {
        self.parser_slot.set(parser);
    }

    /// 当前生效的兜底解析器名称
    pub fn active_parser_name(&self) -> Option<&'static str> {
        self.extractor().active_parser_name()
    }

    pub fn extractor(&self) -> IntentPayloadExtractor {
        IntentPayloadExtractor::new(Arc::clone(&self.parser_slot))
    }

    pub fn emitter(&self) -> &BridgeEmitter {
        &self.emitter
    }
}

fn opaque_parser_name(vendor: PushVendor) -> &'static str {
    match vendor {
        PushVendor::Vivo => "vivo-opaque",
        PushVendor::Oppo => "oppo-opaque",
        // 其余厂商不会装兜底解析器
        _ => "opaque",
    }
}
