use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;
use tracing::{debug, warn};

/// 应用启动 / 通知点击携带的 Intent extras
///
/// 单次读取后即丢弃，没有生命周期管理。
#[derive(Debug, Clone, Default)]
pub struct LaunchIntent {
    extras: HashMap<String, Value>,
}

impl LaunchIntent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_extra(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.extras.insert(key.to_string(), value.into());
        self
    }

    pub fn has_extra(&self, key: &str) -> bool {
        self.extras.contains_key(key)
    }

    pub fn string_extra(&self, key: &str) -> Option<&str> {
        self.extras.get(key).and_then(|v| v.as_str())
    }

    pub fn extras(&self) -> &HashMap<String, Value> {
        &self.extras
    }

    pub fn is_empty(&self) -> bool {
        self.extras.is_empty()
    }
}

/// 通知点击数据的兜底解析器
pub trait IntentParser: Send + Sync {
    /// 解析器名称（用于日志和覆盖可观测性）
    fn name(&self) -> &'static str;

    fn parse(&self, intent: &LaunchIntent) -> Option<String>;
}

/// 整包 extras 序列化解析器（vivo / OPPO 用）
///
/// 这两家的点击数据不放在约定字段下，只能把 extras 全量
/// 序列化成一个 JSON 对象。无 schema，对任意键值类型都不报错。
pub struct OpaqueBundleParser {
    name: &'static str,
}

impl OpaqueBundleParser {
    pub fn new(name: &'static str) -> Self {
        Self { name }
    }
}

impl IntentParser for OpaqueBundleParser {
    fn name(&self) -> &'static str {
        self.name
    }

    fn parse(&self, intent: &LaunchIntent) -> Option<String> {
        if intent.is_empty() {
            return None;
        }

        match serde_json::to_string(intent.extras()) {
            Ok(json) => {
                debug!("[INTENT] opaque bundle: {}", json);
                Some(json)
            }
            Err(e) => {
                warn!("[INTENT] failed to serialize extras: {}", e);
                None
            }
        }
    }
}

/// 兜底解析器的覆盖槽
///
/// 全局只有一个槽位，后写覆盖先写：同一构建里预期只集成一家
/// opaque-bundle 厂商，两家同时集成时只有最后注册的一家生效。
/// 这是已知约束，不在这里悄悄修掉。
pub struct IntentParserSlot {
    inner: RwLock<Option<Arc<dyn IntentParser>>>,
}

impl IntentParserSlot {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(None),
        }
    }

    /// 安装兜底解析器（后写覆盖先写）
    pub fn set(&self, parser: Arc<dyn IntentParser>) {
        let mut slot = self.inner.write();
        if let Some(prev) = slot.as_ref() {
            warn!(
                "[INTENT] fallback parser `{}` replaced by `{}`",
                prev.name(),
                parser.name()
            );
        }
        *slot = Some(parser);
    }

    pub fn get(&self) -> Option<Arc<dyn IntentParser>> {
        self.inner.read().clone()
    }
}

impl Default for IntentParserSlot {
    fn default() -> Self {
        Self::new()
    }
}

/// 启动数据提取器
///
/// 两种模式：
/// - 结构化模式：Intent 带约定的 `content` 字段时原样返回
/// - 兜底模式：覆盖槽里装了解析器时优先走解析器
pub struct IntentPayloadExtractor {
    slot: Arc<IntentParserSlot>,
}

impl IntentPayloadExtractor {
    pub fn new(slot: Arc<IntentParserSlot>) -> Self {
        Self { slot }
    }

    /// 提取通知点击数据，无 Intent 或无数据时返回 None
    pub fn launch_data(&self, intent: Option<&LaunchIntent>) -> Option<String> {
        let intent = intent?;

        if let Some(parser) = self.slot.get() {
            return parser.parse(intent);
        }

        intent.string_extra("content").map(|s| s.to_string())
    }

    /// 当前生效的兜底解析器名称（未安装时为 None）
    pub fn active_parser_name(&self) -> Option<&'static str> {
        self.slot.get().map(|p| p.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_mode() {
        let extractor = IntentPayloadExtractor::new(Arc::new(IntentParserSlot::new()));

        let intent = LaunchIntent::new().with_extra("content", "{\"k\":1}");
        assert_eq!(
            extractor.launch_data(Some(&intent)),
            Some("{\"k\":1}".to_string())
        );

        // 无约定字段且无兜底解析器
        let intent = LaunchIntent::new().with_extra("title", "A");
        assert_eq!(extractor.launch_data(Some(&intent)), None);

        // 无 Intent
        assert_eq!(extractor.launch_data(None), None);
    }

    #[test]
    fn test_opaque_bundle_roundtrip() {
        let intent = LaunchIntent::new()
            .with_extra("title", "A")
            .with_extra("body", "B");

        let parser = OpaqueBundleParser::new("test-opaque");
        let json = parser.parse(&intent).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["title"], "A");
        assert_eq!(value["body"], "B");
    }

    #[test]
    fn test_opaque_bundle_arbitrary_types() {
        let intent = LaunchIntent::new()
            .with_extra("count", 3)
            .with_extra("silent", true)
            .with_extra("nested", serde_json::json!({"a": [1, 2]}));

        let parser = OpaqueBundleParser::new("test-opaque");
        let json = parser.parse(&intent).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["count"], 3);
        assert_eq!(value["silent"], true);
        assert_eq!(value["nested"]["a"][1], 2);
    }

    #[test]
    fn test_slot_last_writer_wins() {
        let slot = Arc::new(IntentParserSlot::new());
        let extractor = IntentPayloadExtractor::new(Arc::clone(&slot));

        slot.set(Arc::new(OpaqueBundleParser::new("first")));
        slot.set(Arc::new(OpaqueBundleParser::new("second")));

        assert_eq!(extractor.active_parser_name(), Some("second"));
    }
}
