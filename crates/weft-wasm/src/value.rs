// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Conversion between JavaScript values and [`Value`].

use js_sys::Uint8Array;
use wasm_bindgen::{JsCast, JsValue};
use weft_registry_api::Value;

/// Largest integer a JavaScript number represents exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Integral numbers inside the safe range become [`Value::Int`].
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn number_value(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        Value::Int(n as i64)
    } else {
        Value::Float(n)
    }
}

pub(crate) fn from_js(value: &JsValue) -> Result<Value, String> {
    if value.is_null() || value.is_undefined() {
        return Ok(Value::None);
    }
    if let Some(b) = value.as_bool() {
        return Ok(Value::Bool(b));
    }
    if let Some(n) = value.as_f64() {
        return Ok(number_value(n));
    }
    if let Some(s) = value.as_string() {
        return Ok(Value::Str(s));
    }
    if let Some(bytes) = value.dyn_ref::<Uint8Array>() {
        return Ok(Value::Bytes(bytes.to_vec()));
    }
    Err(format!("unsupported argument {value:?}"))
}

#[allow(clippy::cast_precision_loss)]
pub(crate) fn to_js(value: Value) -> JsValue {
    match value {
        Value::None => JsValue::UNDEFINED,
        Value::Bool(b) => JsValue::from_bool(b),
        Value::Int(i) => JsValue::from_f64(i as f64),
        Value::Float(f) => JsValue::from_f64(f),
        Value::Bytes(bytes) => Uint8Array::from(bytes.as_slice()).into(),
        Value::Str(s) => JsValue::from_str(&s),
    }
}
