//! Tracing setup and helpers that keep personal data out of the logs.

use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Field names whose values are never written to the logs
const SENSITIVE_KEYS: &[&str] = &["ip", "email", "password", "token", "apiKey", "api_key", "key"];

const REDACTED: &str = "[REDACTED]";

/// Install the global subscriber (RUST_LOG overrides the default filter)
pub fn init() {
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "verb_adventure=debug,tower_http=debug".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();
}

/// Keep the first two octets of an IPv4 address ("1.2.3.4" -> "1.2.x.x").
/// IPv6 keeps its first two groups; anything else is fully redacted.
pub fn mask_ip(ip: &str) -> String {
  let ip = ip.trim();
  if ip == "unknown" {
    return ip.to_string();
  }

  let v4: Vec<&str> = ip.split('.').collect();
  if v4.len() == 4 && v4.iter().all(|part| part.parse::<u8>().is_ok()) {
    return format!("{}.{}.x.x", v4[0], v4[1]);
  }

  if ip.contains(':') {
    let groups: Vec<&str> = ip.split(':').filter(|g| !g.is_empty()).take(2).collect();
    if !groups.is_empty() {
      return format!("{}:x:x", groups.join(":"));
    }
  }

  REDACTED.to_string()
}

/// Replace sensitive values in a JSON document, recursing into objects and arrays
pub fn redact_json(value: &mut Value) {
  match value {
    Value::Object(map) => {
      for (key, inner) in map.iter_mut() {
        if SENSITIVE_KEYS.contains(&key.as_str()) {
          *inner = Value::String(REDACTED.to_string());
        } else {
          redact_json(inner);
        }
      }
    }
    Value::Array(items) => items.iter_mut().for_each(redact_json),
    _ => {}
  }
}

/// Redact an upstream response body for logging; non-JSON bodies are truncated
pub fn redact_body(body: &str) -> String {
  match serde_json::from_str::<Value>(body) {
    Ok(mut json) => {
      redact_json(&mut json);
      json.to_string()
    }
    Err(_) => body.chars().take(200).collect(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_mask_ipv4() {
    assert_eq!(mask_ip("1.2.3.4"), "1.2.x.x");
    assert_eq!(mask_ip(" 192.168.10.20 "), "192.168.x.x");
  }

  #[test]
  fn test_mask_ipv6_and_garbage() {
    assert_eq!(mask_ip("2001:db8::1"), "2001:db8:x:x");
    assert_eq!(mask_ip("not-an-ip"), "[REDACTED]");
    assert_eq!(mask_ip("unknown"), "unknown");
  }

  #[test]
  fn test_redact_nested() {
    let mut value = json!({
      "message": "failed",
      "ip": "1.2.3.4",
      "details": { "token": "abc", "status": 500 },
      "items": [{ "password": "hunter2" }]
    });
    redact_json(&mut value);
    assert_eq!(value["ip"], "[REDACTED]");
    assert_eq!(value["details"]["token"], "[REDACTED]");
    assert_eq!(value["details"]["status"], 500);
    assert_eq!(value["items"][0]["password"], "[REDACTED]");
    assert_eq!(value["message"], "failed");
  }

  #[test]
  fn test_redact_body_plain_text_is_truncated() {
    let body = "x".repeat(500);
    assert_eq!(redact_body(&body).len(), 200);
    assert!(redact_body(r#"{"apiKey":"k"}"#).contains("[REDACTED]"));
  }
}
