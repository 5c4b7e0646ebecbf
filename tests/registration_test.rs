use std::sync::Arc;

use pushbridge::config::PushConfig;
use pushbridge::registration::{
    adapter_for, ChannelBridge, IntentParser, LaunchIntent, PushVendor, RegistrationCoordinator,
    SimulatedSdk, VendorPhase, VendorSdk,
};
use tokio::sync::mpsc::UnboundedReceiver;
use uuid::Uuid;

// 带凭证的测试配置（所有厂商都能过凭证校验）
fn full_config() -> PushConfig {
    toml::from_str(
        r#"
        enabled_vendors = ["fcm", "hms", "mi", "mz", "oppo", "vivo", "honor"]

        [mi]
        app_id = "mi-id"
        app_key = "mi-key"

        [mz]
        app_id = "mz-id"
        app_key = "mz-key"

        [oppo]
        app_key = "oppo-key"
        app_secret = "oppo-secret"

        [vivo]
        app_id = "vivo-id"
        app_key = "vivo-key"

        [honor]
        app_id = "honor-id"
        "#,
    )
    .unwrap()
}

fn coordinator() -> (
    RegistrationCoordinator,
    UnboundedReceiver<pushbridge::BridgeMessage>,
) {
    let (bridge, rx) = ChannelBridge::new();
    (
        RegistrationCoordinator::new(full_config(), Arc::new(bridge)),
        rx,
    )
}

#[tokio::test]
async fn success_callback_emits_one_record_per_vendor() {
    for vendor in PushVendor::ALL {
        let (coordinator, mut rx) = coordinator();
        let adapter = adapter_for(vendor);
        let code = adapter.success_code();
        let sdk = Arc::new(SimulatedSdk::with_result(code, Some("tok-xyz")));

        coordinator.register(adapter, sdk).await;

        let msg = rx.recv().await.unwrap();
        let json: serde_json::Value = serde_json::from_str(&msg.json).unwrap();
        assert_eq!(json["vendor"], vendor.as_str(), "vendor {}", vendor);
        assert_eq!(json["registrationId"], "tok-xyz");

        // 每家成功回调恰好产生一条记录
        assert!(rx.try_recv().is_err(), "vendor {} emitted twice", vendor);
    }
}

#[tokio::test]
async fn failure_code_or_empty_token_emits_nothing() {
    for vendor in PushVendor::ALL {
        // FCM 不看结果码，空 token 对它才是失败
        let failing: Vec<Arc<SimulatedSdk>> = if vendor == PushVendor::Fcm {
            vec![
                Arc::new(SimulatedSdk::with_result(0, Some(""))),
                Arc::new(SimulatedSdk::with_result(0, None)),
            ]
        } else {
            vec![
                Arc::new(SimulatedSdk::with_result(-1, Some("tok"))),
                Arc::new(SimulatedSdk::with_result(
                    adapter_for(vendor).success_code(),
                    Some(""),
                )),
            ]
        };

        for sdk in failing {
            let (coordinator, mut rx) = coordinator();
            coordinator.register(adapter_for(vendor), sdk).await;

            // 华为走后台任务，等它收敛到终态
            wait_terminal(&coordinator, vendor).await;
            assert!(rx.try_recv().is_err(), "vendor {} emitted a record", vendor);
            assert_eq!(coordinator.phase(vendor), VendorPhase::Failed);
        }
    }
}

async fn wait_terminal(coordinator: &RegistrationCoordinator, vendor: PushVendor) {
    for _ in 0..100 {
        if coordinator.phase(vendor).is_terminal() {
            return;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    panic!("{} never reached a terminal phase", vendor);
}

#[tokio::test]
async fn installation_id_regenerated_per_registration() {
    let (coordinator, mut rx) = coordinator();
    let adapter = adapter_for(PushVendor::Mi);

    // 相同厂商相同 token 连续注册两次（终态后的再次调用是调用方重试）
    for _ in 0..2 {
        let sdk = Arc::new(SimulatedSdk::succeeding("abc123"));
        coordinator.register(Arc::clone(&adapter), sdk).await;
    }

    let a: serde_json::Value = serde_json::from_str(&rx.recv().await.unwrap().json).unwrap();
    let b: serde_json::Value = serde_json::from_str(&rx.recv().await.unwrap().json).unwrap();
    assert_eq!(a["registrationId"], b["registrationId"]);
    assert_ne!(a["installationId"], b["installationId"]);
}

#[tokio::test]
async fn missing_credential_never_touches_sdk() {
    let (bridge, mut rx) = ChannelBridge::new();
    // 空配置：小米的 app_id / app_key 都缺失
    let coordinator = RegistrationCoordinator::new(PushConfig::default(), Arc::new(bridge));

    let sdk = Arc::new(SimulatedSdk::succeeding("abc123"));
    let phase = coordinator
        .register(adapter_for(PushVendor::Mi), Arc::clone(&sdk) as Arc<dyn VendorSdk>)
        .await;

    assert_eq!(phase, VendorPhase::Failed);
    assert_eq!(sdk.init_calls(), 0);
    assert_eq!(sdk.register_calls(), 0);
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn unsupported_device_aborts_without_emission() {
    let (coordinator, mut rx) = coordinator();
    let sdk = Arc::new(SimulatedSdk::unsupported());

    let phase = coordinator.register(adapter_for(PushVendor::Vivo), sdk).await;

    assert_eq!(phase, VendorPhase::Unsupported);
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn one_vendor_failure_does_not_block_others() {
    let (coordinator, mut rx) = coordinator();

    // OPPO 回调失败码 -1，小米正常
    coordinator
        .register(
            adapter_for(PushVendor::Oppo),
            Arc::new(SimulatedSdk::with_result(-1, Some("oppo-tok"))),
        )
        .await;
    coordinator
        .register(
            adapter_for(PushVendor::Mi),
            Arc::new(SimulatedSdk::succeeding("mi-tok")),
        )
        .await;

    assert_eq!(coordinator.phase(PushVendor::Oppo), VendorPhase::Failed);
    assert_eq!(coordinator.phase(PushVendor::Mi), VendorPhase::Registered);

    let msg = rx.recv().await.unwrap();
    let json: serde_json::Value = serde_json::from_str(&msg.json).unwrap();
    assert_eq!(json["vendor"], "mi");
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn mi_success_scenario_full_record() {
    let (coordinator, mut rx) = coordinator();

    coordinator
        .register(
            adapter_for(PushVendor::Mi),
            Arc::new(SimulatedSdk::with_result(0, Some("abc123"))),
        )
        .await;

    let msg = rx.recv().await.unwrap();
    assert_eq!(msg.entry_point, "OnRegisterPush");

    let json: serde_json::Value = serde_json::from_str(&msg.json).unwrap();
    assert_eq!(json["deviceType"], "android");
    assert_eq!(json["vendor"], "mi");
    assert_eq!(json["registrationId"], "abc123");
    assert!(Uuid::parse_str(json["installationId"].as_str().unwrap()).is_ok());
    assert!(!json["timeZone"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn hms_registers_on_background_task() {
    let (coordinator, mut rx) = coordinator();

    let phase = coordinator
        .register(
            adapter_for(PushVendor::Hms),
            Arc::new(SimulatedSdk::succeeding("hms-tok")),
        )
        .await;
    // 发起时还在进行中，不阻塞调用方
    assert!(phase.is_in_flight());

    let msg = rx.recv().await.unwrap();
    let json: serde_json::Value = serde_json::from_str(&msg.json).unwrap();
    assert_eq!(json["vendor"], "hms");

    wait_terminal(&coordinator, PushVendor::Hms).await;
    assert_eq!(coordinator.phase(PushVendor::Hms), VendorPhase::Registered);
}

#[tokio::test]
async fn opaque_parser_slot_is_last_writer_wins() {
    let (coordinator, mut rx) = coordinator();

    // 注册前：结构化模式
    assert_eq!(coordinator.active_parser_name(), None);

    coordinator
        .register(
            adapter_for(PushVendor::Vivo),
            Arc::new(SimulatedSdk::succeeding("vivo-tok")),
        )
        .await;
    assert_eq!(coordinator.active_parser_name(), Some("vivo-opaque"));

    coordinator
        .register(
            adapter_for(PushVendor::Oppo),
            Arc::new(SimulatedSdk::succeeding("oppo-tok")),
        )
        .await;
    // 两家先后注册，后写覆盖先写，之后的查询都由 OPPO 的解析器回答
    assert_eq!(coordinator.active_parser_name(), Some("oppo-opaque"));

    let intent = LaunchIntent::new()
        .with_extra("title", "A")
        .with_extra("body", "B");
    let json: serde_json::Value =
        serde_json::from_str(&coordinator.launch_data(Some(&intent)).unwrap()).unwrap();
    assert_eq!(json["title"], "A");
    assert_eq!(json["body"], "B");

    // 两条注册记录照常出站
    assert!(rx.recv().await.is_some());
    assert!(rx.recv().await.is_some());
}

#[tokio::test]
async fn structured_vendors_leave_slot_untouched() {
    let (coordinator, _rx) = coordinator();

    coordinator
        .register(
            adapter_for(PushVendor::Mi),
            Arc::new(SimulatedSdk::succeeding("mi-tok")),
        )
        .await;

    assert_eq!(coordinator.active_parser_name(), None);

    // 结构化模式读约定的 content 字段
    let intent = LaunchIntent::new().with_extra("content", "hello");
    assert_eq!(
        coordinator.launch_data(Some(&intent)),
        Some("hello".to_string())
    );
}

#[tokio::test]
async fn explicit_parser_replaces_registered_one() {
    struct FixedParser;
    impl IntentParser for FixedParser {
        fn name(&self) -> &'static str {
            "fixed"
        }
        fn parse(&self, _intent: &LaunchIntent) -> Option<String> {
            Some("{\"fixed\":true}".to_string())
        }
    }

    let (coordinator, _rx) = coordinator();
    coordinator
        .register(
            adapter_for(PushVendor::Vivo),
            Arc::new(SimulatedSdk::succeeding("vivo-tok")),
        )
        .await;

    coordinator.set_intent_parser(Arc::new(FixedParser));
    assert_eq!(coordinator.active_parser_name(), Some("fixed"));

    let intent = LaunchIntent::new().with_extra("anything", 1);
    assert_eq!(
        coordinator.launch_data(Some(&intent)),
        Some("{\"fixed\":true}".to_string())
    );
}
