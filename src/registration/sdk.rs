use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tracing::info;

use crate::config::VendorCredentials;
use crate::error::Result;

/// 厂商 SDK 的注册回调结果
///
/// 各家回调形态不同（结果码 + regId、命令消息、异常……），
/// 统一收敛为「结果码 + 可空 token」，由对应的 Adapter 解释。
#[derive(Debug, Clone)]
pub struct TokenResult {
    pub code: i32,
    pub token: Option<String>,
}

impl TokenResult {
    pub fn new(code: i32, token: impl Into<Option<String>>) -> Self {
        Self {
            code,
            token: token.into(),
        }
    }
}

/// 闭源厂商 SDK 的边界接口
///
/// 真实实现由各厂商的 native 库承担，不在本仓库范围内；
/// 这里只约定聚合器需要的最小能力集。回调线程由 SDK 自己决定。
#[async_trait]
pub trait VendorSdk: Send + Sync {
    /// 初始化 SDK
    async fn init(&self, credentials: &VendorCredentials) -> Result<()>;

    /// 能力探测：设备是否支持该厂商通道
    async fn is_supported(&self) -> bool {
        true
    }

    /// 发起注册并等待回调结果
    async fn request_token(&self) -> TokenResult;

    /// 打开推送开关（部分厂商在拿到 token 后需要显式开启）
    /// 结果只记日志，不影响注册流程
    async fn turn_on(&self) -> Result<()> {
        Ok(())
    }
}

/// 模拟 SDK（用于本地运行和测试）
///
/// 不调用真实厂商 API，返回预置的回调结果，并用计数器
/// 记录各接口被调用的次数，方便断言「凭证缺失时从未触碰 SDK」。
pub struct SimulatedSdk {
    code: i32,
    token: Option<String>,
    supported: bool,
    init_calls: AtomicUsize,
    register_calls: AtomicUsize,
}

impl SimulatedSdk {
    /// 注册成功、返回给定 token 的模拟 SDK
    pub fn succeeding(token: &str) -> Self {
        Self {
            code: 0,
            token: Some(token.to_string()),
            supported: true,
            init_calls: AtomicUsize::new(0),
            register_calls: AtomicUsize::new(0),
        }
    }

    /// 回调返回指定结果码和 token 的模拟 SDK
    pub fn with_result(code: i32, token: Option<&str>) -> Self {
        Self {
            code,
            token: token.map(|t| t.to_string()),
            supported: true,
            init_calls: AtomicUsize::new(0),
            register_calls: AtomicUsize::new(0),
        }
    }

    /// 能力探测失败的模拟 SDK
    pub fn unsupported() -> Self {
        Self {
            code: 0,
            token: None,
            supported: false,
            init_calls: AtomicUsize::new(0),
            register_calls: AtomicUsize::new(0),
        }
    }

    pub fn init_calls(&self) -> usize {
        self.init_calls.load(Ordering::SeqCst)
    }

    pub fn register_calls(&self) -> usize {
        self.register_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VendorSdk for SimulatedSdk {
    async fn init(&self, _credentials: &VendorCredentials) -> Result<()> {
        self.init_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn is_supported(&self) -> bool {
        self.supported
    }

    async fn request_token(&self) -> TokenResult {
        self.register_calls.fetch_add(1, Ordering::SeqCst);
        TokenResult::new(self.code, self.token.clone())
    }

    async fn turn_on(&self) -> Result<()> {
        info!("[SIM SDK] turn on push");
        Ok(())
    }
}
