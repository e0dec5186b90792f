//! Message dispatch — parse s-expressions and route to engine operations.

use lexpr::Value;
use tracing::{debug, warn};

use crate::gesture::config::CONFIG_KEYS;
use crate::gesture::{PointerAction, PointerEngine, ScreenGeometry};
use crate::tracking::{HandFrame, Landmark};

/// Outcome of one message: actions for the injector, then a response line.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub actions: Vec<PointerAction>,
    pub response: String,
    /// The message was rejected; `response` carries the reason.
    pub is_error: bool,
}

impl Reply {
    fn response(response: String) -> Self {
        Self {
            actions: Vec::new(),
            response,
            is_error: false,
        }
    }

    fn error(id: i64, reason: &str) -> Self {
        Self {
            actions: Vec::new(),
            response: error_response(id, reason),
            is_error: true,
        }
    }
}

/// Parse an s-expression message and dispatch to the appropriate handler.
pub fn handle_message(engine: &mut PointerEngine, raw: &str) -> Reply {
    let value = match lexpr::from_str(raw) {
        Ok(v) => v,
        Err(e) => {
            warn!("malformed s-expression: {}", e);
            return Reply::error(0, &format!("malformed s-expression: {e}"));
        }
    };

    let msg_type = get_keyword(&value, "type");
    let msg_id = get_int(&value, "id").unwrap_or(0);

    match msg_type.as_deref() {
        Some("frame") => handle_frame(engine, msg_id, &value),
        Some("config") => handle_config(engine, msg_id, &value),
        Some("screen") => handle_screen(engine, msg_id, &value),
        Some("reset") => handle_reset(engine, msg_id),
        Some("status") => handle_status(engine, msg_id),
        Some("stats") => handle_stats(engine, msg_id),
        Some(other) => Reply::error(msg_id, &format!("unknown message type: {other}")),
        None => Reply::error(msg_id, "missing :type"),
    }
}

// ── Handlers ────────────────────────────────────────────────

fn handle_frame(engine: &mut PointerEngine, msg_id: i64, value: &Value) -> Reply {
    let hand = match parse_primary_hand(value) {
        Ok(h) => h,
        Err(reason) => return Reply::error(msg_id, &reason),
    };

    let actions = engine.process_frame(hand.as_ref());
    let response = format!(
        "(:type :response :id {} :status :ok :actions {})",
        msg_id,
        actions.len()
    );
    Reply {
        actions,
        response,
        is_error: false,
    }
}

fn handle_config(engine: &mut PointerEngine, msg_id: i64, value: &Value) -> Reply {
    for key in CONFIG_KEYS {
        let parsed = if key == "drag-mode-enabled" {
            get_flag(value, key).map(|b| if b { 1.0 } else { 0.0 })
        } else {
            get_float(value, key)
        };
        if let Some(v) = parsed {
            engine.config.set_by_name(key, v);
        }
    }
    for fix in engine.config.clamp_to_bounds() {
        warn!(%fix, "config value out of range");
    }

    Reply::response(format!(
        "(:type :response :id {} :status :ok :config {})",
        msg_id,
        engine.config.config_sexp()
    ))
}

fn handle_screen(engine: &mut PointerEngine, msg_id: i64, value: &Value) -> Reply {
    let width = get_int(value, "width").unwrap_or(0);
    let height = get_int(value, "height").unwrap_or(0);
    if width <= 0 || height <= 0 || width > u32::MAX as i64 || height > u32::MAX as i64 {
        return Reply::error(msg_id, &format!("invalid screen size: {width}x{height}"));
    }
    engine.set_screen_geometry(ScreenGeometry::new(width as u32, height as u32));
    Reply::response(ok_response(msg_id))
}

fn handle_reset(engine: &mut PointerEngine, msg_id: i64) -> Reply {
    let actions = engine.reset();
    Reply {
        actions,
        response: ok_response(msg_id),
        is_error: false,
    }
}

fn handle_status(engine: &mut PointerEngine, msg_id: i64) -> Reply {
    Reply::response(format!(
        "(:type :response :id {} :status :ok :engine {} :config {})",
        msg_id,
        engine.status_sexp(),
        engine.config.config_sexp()
    ))
}

fn handle_stats(engine: &mut PointerEngine, msg_id: i64) -> Reply {
    Reply::response(format!(
        "(:type :response :id {} :status :ok :timing {})",
        msg_id,
        engine.timing().stats_sexp()
    ))
}

// ── Frame parsing ──────────────────────────────────────────

/// Extract the primary hand from `:hands`.  Missing, `nil` or empty means
/// no hand.  Only the first hand is parsed; the rest are ignored.
fn parse_primary_hand(value: &Value) -> Result<Option<HandFrame>, String> {
    let hands = match get_value(value, "hands") {
        Some(v) if !is_nil(v) => v,
        _ => return Ok(None),
    };
    let hands = list_items(hands).ok_or_else(|| ":hands must be a list".to_string())?;
    if hands.len() > 1 {
        debug!(count = hands.len(), "multiple hands, using the first");
    }
    match hands.first() {
        Some(first) => parse_hand(first).map(Some),
        None => Ok(None),
    }
}

/// Parse one hand: a list of `(x y)` or `(x y z)` number lists.
fn parse_hand(value: &Value) -> Result<HandFrame, String> {
    if is_nil(value) {
        return Ok(HandFrame::default());
    }
    let points = list_items(value).ok_or_else(|| "hand must be a list of points".to_string())?;
    let mut landmarks = Vec::with_capacity(points.len());
    for (i, point) in points.iter().enumerate() {
        let coords = list_items(point)
            .filter(|c| c.len() == 2 || c.len() == 3)
            .ok_or_else(|| format!("landmark {i} must be (x y) or (x y z)"))?;
        let nums: Option<Vec<f64>> = coords.iter().map(|c| as_number(c)).collect();
        let nums = nums.ok_or_else(|| format!("landmark {i} has a non-numeric coordinate"))?;
        landmarks.push(Landmark::new(
            nums[0] as f32,
            nums[1] as f32,
            nums.get(2).copied().unwrap_or(0.0) as f32,
        ));
    }
    Ok(HandFrame::new(landmarks))
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}

// ── Helpers ────────────────────────────────────────────────

fn ok_response(id: i64) -> String {
    format!("(:type :response :id {} :status :ok)", id)
}

fn error_response(id: i64, reason: &str) -> String {
    format!(
        "(:type :response :id {} :status :error :reason \"{}\")",
        id,
        escape_string(reason)
    )
}

/// Escape a string for s-expression output.
fn escape_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Whether a value is an empty list or `nil`.
fn is_nil(value: &Value) -> bool {
    match value {
        Value::Null | Value::Nil => true,
        Value::Symbol(s) => &**s == "nil",
        _ => false,
    }
}

/// Items of a proper list, or None for anything else.
fn list_items(value: &Value) -> Option<Vec<&Value>> {
    let mut items = Vec::new();
    let mut current = value;
    loop {
        match current {
            Value::Cons(pair) => {
                items.push(pair.car());
                current = pair.cdr();
            }
            Value::Null | Value::Nil => return Some(items),
            _ => return None,
        }
    }
}

/// Find the value following `:key` in an s-expression plist.
/// Handles both `Value::Keyword("key")` (elisp parser) and
/// `Value::Symbol(":key")` (default parser) forms.
fn get_value<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    let prefixed = format!(":{}", key);
    let mut current = value;
    while let Value::Cons(pair) = current {
        let is_key = match pair.car() {
            Value::Keyword(k) => &**k == key,
            Value::Symbol(s) => **s == *prefixed,
            _ => false,
        };
        if is_key {
            return match pair.cdr() {
                Value::Cons(next) => Some(next.car()),
                _ => None,
            };
        }
        current = pair.cdr();
    }
    None
}

/// Extract a keyword value from an s-expression plist as a string.
fn get_keyword(value: &Value, key: &str) -> Option<String> {
    let val = get_value(value, key)?;
    match val {
        Value::Keyword(v) => Some(v.to_string()),
        Value::Symbol(v) => {
            let s = v.to_string();
            Some(s.strip_prefix(':').unwrap_or(&s).to_string())
        }
        Value::String(v) => Some(v.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(if *b { "t" } else { "nil" }.to_string()),
        Value::Null | Value::Nil => Some("nil".to_string()),
        _ => Some(val.to_string()),
    }
}

/// Extract an integer value from an s-expression plist.
fn get_int(value: &Value, key: &str) -> Option<i64> {
    get_keyword(value, key).and_then(|s| s.parse().ok())
}

/// Extract a boolean value from an s-expression plist.
/// Treats "nil" as false, anything else as true.
fn get_bool(value: &Value, key: &str) -> Option<bool> {
    get_keyword(value, key).map(|s| s != "nil")
}

/// Extract a flag that may be written as a number (`0` is false) or as
/// `t`/`nil`.
fn get_flag(value: &Value, key: &str) -> Option<bool> {
    match get_value(value, key)? {
        Value::Number(n) => n.as_f64().map(|v| v != 0.0),
        _ => get_bool(value, key),
    }
}

/// Extract a floating-point value from an s-expression plist.
fn get_float(value: &Value, key: &str) -> Option<f64> {
    get_keyword(value, key).and_then(|s| s.parse().ok())
}

/// Format an event s-expression.
pub fn format_event(event_type: &str, fields: &[(&str, &str)]) -> String {
    let mut s = format!("(:type :event :event :{}", event_type);
    for (key, val) in fields {
        s.push_str(&format!(" :{} {}", key, val));
    }
    s.push(')');
    s
}

/// Event line for one pointer action.
pub fn action_event(action: &PointerAction) -> String {
    let fields = action.fields();
    let borrowed: Vec<(&str, &str)> = fields.iter().map(|(k, v)| (*k, v.as_str())).collect();
    format_event(action.as_str(), &borrowed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::EngineConfig;
    use crate::tracking::LandmarkIndex;

    fn engine() -> PointerEngine {
        PointerEngine::new(ScreenGeometry::new(1000, 1000), EngineConfig::default())
    }

    /// 21-point hand as protocol text, with index tip at (x, y) and thumb far away.
    fn hand_sexp(x: f32, y: f32) -> String {
        let mut s = String::from("(");
        for i in 0..21 {
            let (px, py) = match i {
                4 => (0.1, 0.9),
                8 => (x, y),
                12 => (x + 0.1, y),
                _ => (0.0, 0.0),
            };
            s.push_str(&format!("({} {} 0.0)", px, py));
        }
        s.push(')');
        s
    }

    // ── ok_response / error_response ────────────────────────

    #[test]
    fn test_ok_response_format() {
        let r = ok_response(42);
        assert!(r.contains(":type :response"));
        assert!(r.contains(":id 42"));
        assert!(r.contains(":status :ok"));
    }

    #[test]
    fn test_error_response_escapes_quotes() {
        let r = error_response(1, "say \"hello\"");
        assert!(r.contains("say \\\"hello\\\""));
        assert!(lexpr::from_str(&r).is_ok());
    }

    #[test]
    fn test_escape_string_backslash() {
        assert_eq!(escape_string("a\\b"), "a\\\\b");
    }

    // ── plist helpers ───────────────────────────────────────

    #[test]
    fn test_get_keyword_from_plist() {
        let v = lexpr::from_str("(:type :frame :id 7)").unwrap();
        assert_eq!(get_keyword(&v, "type"), Some("frame".to_string()));
        assert_eq!(get_int(&v, "id"), Some(7));
        assert_eq!(get_keyword(&v, "missing"), None);
    }

    #[test]
    fn test_get_float_and_bool() {
        let v = lexpr::from_str("(:sensitivity 1.5 :drag-mode-enabled nil)").unwrap();
        assert_eq!(get_float(&v, "sensitivity"), Some(1.5));
        assert_eq!(get_bool(&v, "drag-mode-enabled"), Some(false));
    }

    #[test]
    fn test_list_items() {
        let v = lexpr::from_str("(1 2 3)").unwrap();
        assert_eq!(list_items(&v).map(|i| i.len()), Some(3));
        let empty = lexpr::from_str("()").unwrap();
        assert_eq!(list_items(&empty).map(|i| i.len()), Some(0));
        let atom = lexpr::from_str("5").unwrap();
        assert!(list_items(&atom).is_none());
    }

    // ── Frame parsing ───────────────────────────────────────

    #[test]
    fn test_parse_primary_hand_missing_is_none() {
        let v = lexpr::from_str("(:type :frame)").unwrap();
        assert_eq!(parse_primary_hand(&v), Ok(None));
        let v = lexpr::from_str("(:type :frame :hands nil)").unwrap();
        assert_eq!(parse_primary_hand(&v), Ok(None));
        let v = lexpr::from_str("(:type :frame :hands ())").unwrap();
        assert_eq!(parse_primary_hand(&v), Ok(None));
    }

    #[test]
    fn test_parse_primary_hand_uses_first() {
        let v = lexpr::from_str("(:type :frame :hands (((0.1 0.2 0.3) (0.4 0.5)) ((0.9 0.9 0.9))))")
            .unwrap();
        let hand = parse_primary_hand(&v).unwrap().unwrap();
        assert_eq!(hand.len(), 2);
        assert_eq!(
            hand.get(LandmarkIndex::ThumbCmc),
            Ok(&Landmark::new(0.4, 0.5, 0.0))
        );
    }

    #[test]
    fn test_parse_hand_rejects_bad_point() {
        let v = lexpr::from_str("(:type :frame :hands (((0.1))))").unwrap();
        assert!(parse_primary_hand(&v).is_err());
        let v = lexpr::from_str("(:type :frame :hands (((0.1 \"y\"))))").unwrap();
        assert!(parse_primary_hand(&v).is_err());
    }

    // ── Dispatch ────────────────────────────────────────────

    #[test]
    fn test_malformed_message() {
        let mut e = engine();
        let reply = handle_message(&mut e, "(:type :frame");
        assert!(reply.is_error);
        assert!(reply.response.contains(":status :error"));
        assert!(reply.actions.is_empty());
    }

    #[test]
    fn test_unknown_type() {
        let mut e = engine();
        let reply = handle_message(&mut e, "(:type :teleport :id 3)");
        assert!(reply.is_error);
        assert!(reply.response.contains(":id 3"));
        assert!(reply.response.contains("unknown message type: teleport"));
    }

    #[test]
    fn test_frame_message_moves_cursor() {
        let mut e = engine();
        let msg = format!("(:type :frame :id 1 :hands ({}))", hand_sexp(0.5, 0.5));
        let reply = handle_message(&mut e, &msg);
        assert_eq!(reply.actions, vec![PointerAction::MoveTo { x: 500, y: 500 }]);
        assert!(reply.response.contains(":actions 1"));
        assert!(!reply.is_error);
    }

    #[test]
    fn test_empty_frame_message() {
        let mut e = engine();
        let reply = handle_message(&mut e, "(:type :frame :id 2 :hands nil)");
        assert!(reply.actions.is_empty());
        assert!(reply.response.contains(":status :ok"));
        assert_eq!(e.frames_processed(), 1);
    }

    #[test]
    fn test_config_message_clamps() {
        let mut e = engine();
        let reply = handle_message(
            &mut e,
            "(:type :config :id 4 :sensitivity 2.5 :pinch-threshold 0.9 :drag-mode-enabled nil)",
        );
        assert!(reply.response.contains(":status :ok"));
        assert_eq!(e.config.sensitivity, 2.5);
        assert!((e.config.pinch_threshold - 0.2).abs() < f32::EPSILON);
        assert!(!e.config.drag_mode_enabled);
        assert!(reply.response.contains(":pinch-threshold 0.200"));
    }

    #[test]
    fn test_config_drag_mode_numeric() {
        let mut e = engine();
        handle_message(&mut e, "(:type :config :drag-mode-enabled 0)");
        assert!(!e.config.drag_mode_enabled);
        handle_message(&mut e, "(:type :config :drag-mode-enabled 1)");
        assert!(e.config.drag_mode_enabled);
        handle_message(&mut e, "(:type :config :drag-mode-enabled nil)");
        assert!(!e.config.drag_mode_enabled);
        handle_message(&mut e, "(:type :config :drag-mode-enabled t)");
        assert!(e.config.drag_mode_enabled);
    }

    #[test]
    fn test_screen_message() {
        let mut e = engine();
        let reply = handle_message(&mut e, "(:type :screen :id 5 :width 2560 :height 1440)");
        assert!(reply.response.contains(":status :ok"));
        assert_eq!(e.screen_geometry(), ScreenGeometry::new(2560, 1440));

        let reply = handle_message(&mut e, "(:type :screen :id 6 :width 0 :height 1440)");
        assert!(reply.is_error);
        assert!(reply.response.contains(":status :error"));
        assert_eq!(e.screen_geometry(), ScreenGeometry::new(2560, 1440));
    }

    #[test]
    fn test_reset_message_releases_drag() {
        let mut e = engine();
        let mut points = String::from("(");
        for i in 0..21 {
            let (x, y) = match i {
                4 => (0.5, 0.5),
                8 => (0.51, 0.5),
                12 => (0.9, 0.1),
                _ => (0.0, 0.0),
            };
            points.push_str(&format!("({} {})", x, y));
        }
        points.push(')');
        let reply = handle_message(&mut e, &format!("(:type :frame :hands ({}))", points));
        assert!(reply.actions.contains(&PointerAction::DragStart));

        let reply = handle_message(&mut e, "(:type :reset :id 9)");
        assert_eq!(reply.actions, vec![PointerAction::DragEnd]);
        assert!(reply.response.contains(":id 9"));
    }

    #[test]
    fn test_status_and_stats_are_valid_sexp() {
        let mut e = engine();
        handle_message(&mut e, "(:type :frame :hands nil)");
        let status = handle_message(&mut e, "(:type :status :id 1)").response;
        assert!(status.contains(":engine (:hand-present nil"));
        assert!(lexpr::from_str(&status).is_ok());
        let stats = handle_message(&mut e, "(:type :stats :id 2)").response;
        assert!(stats.contains(":total-frames 1"));
        assert!(lexpr::from_str(&stats).is_ok());
    }

    // ── Events ──────────────────────────────────────────────

    #[test]
    fn test_format_event_no_fields() {
        assert_eq!(format_event("drag-start", &[]), "(:type :event :event :drag-start)");
    }

    #[test]
    fn test_action_event() {
        let e = action_event(&PointerAction::MoveTo { x: 12, y: 34 });
        assert_eq!(e, "(:type :event :event :move-to :x 12 :y 34)");
        let e = action_event(&PointerAction::ScrollBy { amount: -3 });
        assert_eq!(e, "(:type :event :event :scroll-by :amount -3)");
        let parsed = lexpr::from_str(&e).unwrap();
        assert_eq!(get_int(&parsed, "amount"), Some(-3));
    }
}
