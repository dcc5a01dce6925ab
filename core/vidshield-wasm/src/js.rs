//! Reflection helpers over untyped JS values.

use js_sys::{Array, Function, Reflect};
use vidshield_device::{ProbeError, ProbeResult};
use wasm_bindgen::{JsCast, JsValue};

/// Renders a thrown JS value as a message.
pub(crate) fn describe(error: &JsValue) -> String {
    error
        .as_string()
        .or_else(|| {
            Reflect::get(error, &JsValue::from_str("message"))
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| format!("{error:?}"))
}

fn blocked(what: &str, error: &JsValue) -> ProbeError {
    ProbeError::Blocked(format!("{what}: {}", describe(error)))
}

/// Reads `target[name]`, treating `undefined` and `null` as absent.
pub(crate) fn optional(target: &JsValue, name: &str) -> ProbeResult<Option<JsValue>> {
    let value = Reflect::get(target, &JsValue::from_str(name)).map_err(|e| blocked(name, &e))?;
    Ok((!value.is_undefined() && !value.is_null()).then_some(value))
}

/// Reads `target[name]`, failing with `Unsupported` when absent.
pub(crate) fn property(target: &JsValue, name: &'static str) -> ProbeResult<JsValue> {
    optional(target, name)?.ok_or(ProbeError::Unsupported(name))
}

pub(crate) fn string(target: &JsValue, name: &'static str) -> ProbeResult<String> {
    property(target, name)?
        .as_string()
        .ok_or(ProbeError::Unsupported(name))
}

pub(crate) fn number(target: &JsValue, name: &'static str) -> ProbeResult<f64> {
    property(target, name)?
        .as_f64()
        .ok_or(ProbeError::Unsupported(name))
}

pub(crate) fn optional_number(target: &JsValue, name: &str) -> ProbeResult<Option<f64>> {
    Ok(optional(target, name)?.and_then(|v| v.as_f64()))
}

/// Writes `target[name] = value`.
pub(crate) fn set(target: &JsValue, name: &str, value: &JsValue) -> ProbeResult<()> {
    Reflect::set(target, &JsValue::from_str(name), value)
        .map(drop)
        .map_err(|e| blocked(name, &e))
}

/// Calls `target[method](...args)` with `target` bound as `this`.
pub(crate) fn call(target: &JsValue, method: &'static str, args: &[JsValue]) -> ProbeResult<JsValue> {
    let function: Function = property(target, method)?
        .dyn_into()
        .map_err(|_| ProbeError::Unsupported(method))?;
    let args: Array = args.iter().collect();
    function.apply(target, &args).map_err(|e| blocked(method, &e))
}

/// Evaluates `new target[name](...args)`.
pub(crate) fn construct(
    target: &JsValue,
    name: &'static str,
    args: &[JsValue],
) -> ProbeResult<JsValue> {
    let constructor: Function = property(target, name)?
        .dyn_into()
        .map_err(|_| ProbeError::Unsupported(name))?;
    let args: Array = args.iter().collect();
    Reflect::construct(&constructor, &args).map_err(|e| blocked(name, &e))
}
