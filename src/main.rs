use std::fs;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use pushbridge::{
    cli::{Cli, Commands},
    config::{self, PushConfig},
    logging,
    registration::{ChannelBridge, RegistrationCoordinator, SimulatedSdk, VendorSdk},
};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载 .env 文件（如果存在）
    let _ = dotenvy::dotenv();

    // 解析命令行参数
    let cli = Cli::parse();

    // 处理子命令
    if let Some(command) = &cli.command {
        match command {
            Commands::GenerateConfig { path } => {
                return generate_config(path);
            }
            Commands::ValidateConfig { path } => {
                return validate_config(path);
            }
            Commands::ShowConfig => {
                return show_config(&cli);
            }
        }
    }

    // 快速读取配置文件的 [logging] 段（不加载完整配置）
    let early_log = config::load_early_logging_config(cli.config_file.as_deref());

    // 合并日志配置（优先级：CLI > 配置文件 > 默认值）
    let log_level = cli
        .get_log_level()
        .or(early_log.level)
        .unwrap_or_else(|| "info".to_string());
    let log_format = cli.get_log_format().or(early_log.format);
    let log_file = cli.log_file.as_deref().or(early_log.file.as_deref());

    logging::init_logging(&log_level, log_format.as_deref(), log_file, cli.quiet)?;

    tracing::info!("🚀 pushbridge starting...");

    // 加载配置（按优先级：命令行 > 环境变量 > 配置文件 > 默认值）
    let config = PushConfig::load(&cli).context("加载配置失败")?;
    config.validate().context("配置校验失败")?;

    let enabled = config.enabled();
    tracing::info!("📊 Enabled vendors: {:?}", enabled);
    if enabled.is_empty() {
        tracing::warn!("⚠️ no vendors enabled, nothing to register");
        return Ok(());
    }

    // 进程内桥通道：真实部署里这一端是宿主运行时
    let (bridge, mut rx) = ChannelBridge::new();
    let coordinator = RegistrationCoordinator::new(config, Arc::new(bridge));

    // 没有真实厂商 SDK 可链接时用模拟 SDK 跑一轮注册流程
    let pairs = coordinator
        .enabled_adapters()
        .into_iter()
        .map(|adapter| {
            let sdk: Arc<dyn VendorSdk> = Arc::new(SimulatedSdk::succeeding(&format!(
                "sim-token-{}",
                adapter.vendor()
            )));
            (adapter, sdk)
        })
        .collect();
    coordinator.register_all(pairs).await;

    // 收出站消息（华为走后台任务，给它留一点时间）
    loop {
        match tokio::time::timeout(Duration::from_millis(500), rx.recv()).await {
            Ok(Some(msg)) => {
                tracing::info!("📨 {} {} {}", msg.channel, msg.entry_point, msg.json);
            }
            _ => break,
        }
    }

    for vendor in enabled {
        tracing::info!("  - {}: {:?}", vendor, coordinator.phase(vendor));
    }

    Ok(())
}

/// 生成默认配置文件
fn generate_config(path: &str) -> Result<()> {
    fs::write(path, PushConfig::default_toml())
        .with_context(|| format!("无法写入配置文件: {}", path))?;
    println!("✅ 配置文件已生成: {}", path);
    Ok(())
}

/// 验证配置文件
fn validate_config(path: &str) -> Result<()> {
    let config = PushConfig::from_file(path)?;
    config.validate()?;
    println!("✅ 配置文件有效: {}", path);
    println!("  enabled vendors: {:?}", config.enabled());
    Ok(())
}

/// 显示合并后的最终配置
fn show_config(cli: &Cli) -> Result<()> {
    let config = PushConfig::load(cli)?;
    let toml = toml::to_string_pretty(&config).context("序列化配置失败")?;
    println!("{}", toml);
    Ok(())
}
