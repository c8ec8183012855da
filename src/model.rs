use serde::Deserialize;
use serde_json::value::RawValue;

/// 投递协议（只支持这两个）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protocol {
    /// 请求/响应式 HTTP 投递
    Http,
    /// 长连接 XMPP（CCS）投递
    Xmpp,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Http => "http",
            Protocol::Xmpp => "xmpp",
        }
    }

    /// 大小写不敏感解析；不认识的值返回 None，由调用方映射为 400
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "http" => Some(Protocol::Http),
            "xmpp" => Some(Protocol::Xmpp),
            _ => None,
        }
    }
}

/// 请求外层信封
///
/// `message` 在协议确定之前保持原始 JSON，不提前解析
#[derive(Debug, Deserialize)]
pub struct MessageEnvelope {
    /// 缺省为空串，与未知协议走同一个 400 分支
    #[serde(default)]
    pub protocol: String,
    pub message: Box<RawValue>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_from_str_case_insensitive() {
        assert_eq!(Protocol::from_str("http"), Some(Protocol::Http));
        assert_eq!(Protocol::from_str("HTTP"), Some(Protocol::Http));
        assert_eq!(Protocol::from_str("xmpp"), Some(Protocol::Xmpp));
        assert_eq!(Protocol::from_str("XmPp"), Some(Protocol::Xmpp));
    }

    #[test]
    fn test_protocol_from_str_rejects_unknown() {
        assert_eq!(Protocol::from_str("carrier-pigeon"), None);
        assert_eq!(Protocol::from_str(""), None);
        assert_eq!(Protocol::from_str("https"), None);
    }

    #[test]
    fn test_envelope_protocol_defaults_to_empty() {
        let envelope: MessageEnvelope =
            serde_json::from_str(r#"{"message":{"to":"abc"}}"#).unwrap();
        assert_eq!(envelope.protocol, "");
        assert_eq!(Protocol::from_str(&envelope.protocol), None);
    }

    #[test]
    fn test_envelope_keeps_message_raw() {
        let envelope: MessageEnvelope =
            serde_json::from_str(r#"{"protocol":"HTTP","message":{"to":"abc","data":{"k":"v"}}}"#)
                .unwrap();
        assert_eq!(envelope.protocol, "HTTP");
        // 内层 payload 原样保留，后续按协议再解析
        assert_eq!(
            envelope.message.get(),
            r#"{"to":"abc","data":{"k":"v"}}"#
        );
    }
}
