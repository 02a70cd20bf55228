// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! wasm-bindgen bindings for the weft codec registry.
//!
//! Exposes the registry catalog (type names, CBOR type descriptors, registry
//! info) plus two classes: [`WeftFactory`], created by exposed factory name,
//! and [`WeftCoder`], the codec it builds. Coder methods are invoked by name
//! with positional arguments; `Uint8Array` arguments and results carry raw
//! bytes.
#![deny(missing_docs)]

mod value;

use js_sys::{Array, Uint8Array};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use weft_bindings::{HostFactory, Instance, Registry};
use weft_registry_api::RegistryProvider;

use crate::value::{from_js, to_js};

fn registry() -> Result<&'static Registry, JsError> {
    Ok(weft_bindings::global()?)
}

fn encode_cbor<T: Serialize>(value: &T) -> Result<Vec<u8>, String> {
    let mut out = Vec::new();
    ciborium::into_writer(value, &mut out).map_err(|e| e.to_string())?;
    Ok(out)
}

fn type_description(registry: &dyn RegistryProvider, name: &str) -> Result<Vec<u8>, String> {
    let def = registry
        .type_by_name(name)
        .ok_or_else(|| format!("unknown type {name}"))?;
    encode_cbor(def)
}

fn info_bytes(registry: &dyn RegistryProvider) -> Result<Vec<u8>, String> {
    encode_cbor(&registry.info())
}

#[cfg(feature = "console-panic")]
fn report(context: &str, err: &str) {
    web_sys::console::error_1(&format!("{context}: {err}").into());
}

#[cfg(not(feature = "console-panic"))]
fn report(_context: &str, _err: &str) {}

#[cfg(feature = "console-panic")]
#[wasm_bindgen(start)]
/// Initialize console panic hook for better error messages in browser.
pub fn init_console_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Exposed type names in registration order.
#[wasm_bindgen]
pub fn registry_type_names() -> Result<Array, JsError> {
    Ok(registry()?.type_names().map(JsValue::from_str).collect())
}

/// Exposed factory names in registration order.
#[wasm_bindgen]
pub fn registry_factory_names() -> Result<Array, JsError> {
    Ok(registry()?.factory_names().map(JsValue::from_str).collect())
}

/// CBOR-encoded descriptor (capabilities and methods) of an exposed type.
///
/// Throws when `name` is not exposed.
#[wasm_bindgen]
pub fn describe_type(name: &str) -> Result<Uint8Array, JsError> {
    let bytes = type_description(registry()?, name).map_err(|e| JsError::new(&e))?;
    Ok(Uint8Array::from(bytes.as_slice()))
}

/// Return registry metadata (module name, version, type and factory counts).
#[wasm_bindgen]
pub fn get_registry_info() -> Result<Uint8Array, JsError> {
    let bytes = info_bytes(registry()?).map_err(|e| JsError::new(&e))?;
    Ok(Uint8Array::from(bytes.as_slice()))
}

/// Host factory for one exposed codec type.
#[wasm_bindgen]
pub struct WeftFactory {
    inner: Box<dyn HostFactory>,
}

#[wasm_bindgen]
impl WeftFactory {
    /// Create the factory exposed as `name`.
    #[wasm_bindgen(constructor)]
    pub fn new(name: &str, max_symbols: u32, max_symbol_size: u32) -> Result<WeftFactory, JsError> {
        let inner = registry()?.factory(name, max_symbols, max_symbol_size)?;
        Ok(Self { inner })
    }

    /// Exposed factory name.
    #[wasm_bindgen(getter)]
    pub fn name(&self) -> String {
        self.inner.name().to_owned()
    }

    /// Maximum symbols.
    #[wasm_bindgen(getter)]
    pub fn max_symbols(&self) -> u32 {
        self.inner.max_symbols()
    }

    /// Maximum symbol size in bytes.
    #[wasm_bindgen(getter)]
    pub fn max_symbol_size(&self) -> u32 {
        self.inner.max_symbol_size()
    }

    /// Largest payload a built coder can produce.
    #[wasm_bindgen(getter)]
    pub fn max_payload_size(&self) -> u32 {
        self.inner.max_payload_size()
    }

    /// Symbols used by the next build.
    #[wasm_bindgen(getter)]
    pub fn symbols(&self) -> u32 {
        self.inner.symbols()
    }

    /// Symbol size used by the next build.
    #[wasm_bindgen(getter)]
    pub fn symbol_size(&self) -> u32 {
        self.inner.symbol_size()
    }

    /// Change the symbols used by subsequent builds.
    pub fn set_symbols(&mut self, symbols: u32) -> Result<(), JsError> {
        Ok(self.inner.set_symbols(symbols)?)
    }

    /// Change the symbol size used by subsequent builds.
    pub fn set_symbol_size(&mut self, symbol_size: u32) -> Result<(), JsError> {
        Ok(self.inner.set_symbol_size(symbol_size)?)
    }

    /// Build (or recycle) a coder at the current dimensions.
    pub fn build(&self) -> Result<WeftCoder, JsError> {
        Ok(WeftCoder {
            inner: self.inner.build()?,
        })
    }
}

/// A built encoder or decoder.
#[wasm_bindgen]
pub struct WeftCoder {
    inner: Instance,
}

#[wasm_bindgen]
impl WeftCoder {
    /// Exposed type name.
    #[wasm_bindgen(getter)]
    pub fn type_name(&self) -> String {
        self.inner.type_name().to_owned()
    }

    /// Method names in name order.
    pub fn methods(&self) -> Array {
        self.inner
            .methods()
            .iter()
            .map(|m| JsValue::from_str(m.name))
            .collect()
    }

    /// Invoke `method` with positional `args`.
    ///
    /// `null` and `undefined` stand for an omitted optional argument.
    pub fn call(&mut self, method: &str, args: &Array) -> Result<JsValue, JsError> {
        let args = args
            .iter()
            .map(|v| from_js(&v))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| JsError::new(&e))?;
        match self.inner.call(method, &args) {
            Ok(value) => Ok(to_js(value)),
            Err(err) => {
                report(method, &err.to_string());
                Err(err.into())
            }
        }
    }
}
