//! Turning a raw model reply into displayable hint text.
//!
//! The model is asked for `{"hint": "..."}` but often wraps it in prose or
//! code fences, so the outermost braces are cut out before parsing.

use serde::Serialize;
use serde_json::Value;

/// Keys a reply may carry the sentence under, in order of preference
const HINT_KEYS: [&str; 3] = ["hint", "rhyme", "present"];

/// Styling of one piece of hint text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
  Plain,
  /// `**text**`, used for the verb forms
  Bold,
  /// `*text*`
  Emphasis,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HintSegment {
  pub kind: SegmentKind,
  pub text: String,
}

/// Pull the hint sentence out of a reply, falling back to the raw text
pub fn extract_hint_text(raw: &str) -> String {
  json_object(raw)
    .and_then(|value| {
      HINT_KEYS
        .iter()
        .find_map(|key| value.get(key).and_then(Value::as_str).map(str::to_string))
    })
    .unwrap_or_else(|| raw.trim().to_string())
}

/// The span from the first `{` to the last `}`, parsed as JSON
fn json_object(raw: &str) -> Option<Value> {
  let start = raw.find('{')?;
  let end = raw.rfind('}')?;
  if end <= start {
    return None;
  }
  serde_json::from_str(&raw[start..=end]).ok()
}

/// Split text on `**bold**` and `*emphasis*` markers.
/// Unterminated markers are kept as plain text.
pub fn segments(text: &str) -> Vec<HintSegment> {
  let mut out: Vec<HintSegment> = Vec::new();
  let mut plain = String::new();
  let mut rest = text;

  while let Some(pos) = rest.find('*') {
    let (before, marked) = rest.split_at(pos);
    let (marker, kind) = if marked.starts_with("**") {
      ("**", SegmentKind::Bold)
    } else {
      ("*", SegmentKind::Emphasis)
    };
    let body = &marked[marker.len()..];

    match body.find(marker) {
      Some(close) if close > 0 => {
        plain.push_str(before);
        push_segment(&mut out, SegmentKind::Plain, std::mem::take(&mut plain));
        push_segment(&mut out, kind, body[..close].to_string());
        rest = &body[close + marker.len()..];
      }
      _ => {
        plain.push_str(before);
        plain.push_str(marker);
        rest = body;
      }
    }
  }

  plain.push_str(rest);
  push_segment(&mut out, SegmentKind::Plain, plain);
  out
}

fn push_segment(out: &mut Vec<HintSegment>, kind: SegmentKind, text: String) {
  if !text.is_empty() {
    out.push(HintSegment { kind, text });
  }
}
