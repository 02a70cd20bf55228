// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Per-type method tables and argument decoding.

use std::collections::BTreeMap;

use weft_registry_api::{ArgDef, ArgType, MethodDef, Value};

use crate::{CallError, RegistryError};

/// Host-callable method body.
pub type CallFn<C> = fn(&mut C, Args<'_>) -> Result<Value, CallError>;

/// A defined method: descriptor plus body.
pub struct Method<C> {
    /// Descriptor exposed to hosts.
    pub def: MethodDef,
    /// Body invoked by [`MethodTable::call`].
    pub call: CallFn<C>,
}

/// Methods exposed by one codec type, keyed by name.
///
/// Definition order never matters; defining a name twice is an error.
pub struct MethodTable<C> {
    type_name: String,
    methods: BTreeMap<&'static str, Method<C>>,
}

impl<C> MethodTable<C> {
    /// Empty table for the exposed type `type_name`.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            methods: BTreeMap::new(),
        }
    }

    /// Exposed type name.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Add a method.
    ///
    /// # Errors
    /// [`RegistryError::DuplicateMethod`] when `def.name` is already defined.
    pub fn define(&mut self, def: MethodDef, call: CallFn<C>) -> Result<(), RegistryError> {
        if self.methods.contains_key(def.name) {
            return Err(RegistryError::DuplicateMethod {
                type_name: self.type_name.clone(),
                method: def.name,
            });
        }
        self.methods.insert(def.name, Method { def, call });
        Ok(())
    }

    /// Whether `name` is defined.
    pub fn contains(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    /// Method names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.methods.keys().copied()
    }

    /// Descriptors in name order.
    pub fn defs(&self) -> Vec<MethodDef> {
        self.methods.values().map(|m| m.def).collect()
    }

    /// Number of defined methods.
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// `true` when no method is defined.
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// Invoke `name` on `codec`.
    pub fn call(&self, codec: &mut C, name: &str, args: &[Value]) -> Result<Value, CallError> {
        let method = self
            .methods
            .get(name)
            .ok_or_else(|| CallError::UnknownMethod {
                type_name: self.type_name.clone(),
                method: name.to_owned(),
            })?;
        let args = Args::new(&method.def, args)?;
        (method.call)(codec, args)
    }
}

/// Positional arguments checked against a method's descriptor.
#[derive(Debug, Clone, Copy)]
pub struct Args<'a> {
    method: &'static str,
    defs: &'static [ArgDef],
    values: &'a [Value],
}

impl<'a> Args<'a> {
    fn new(def: &MethodDef, values: &'a [Value]) -> Result<Self, CallError> {
        let min = def.args.iter().filter(|a| a.required).count();
        let max = def.args.len();
        if values.len() < min || values.len() > max {
            return Err(CallError::Arity {
                method: def.name,
                min,
                max,
                actual: values.len(),
            });
        }
        Ok(Self {
            method: def.name,
            defs: def.args,
            values,
        })
    }

    fn arg_name(&self, index: usize) -> &'static str {
        self.defs.get(index).map_or("?", |d| d.name)
    }

    fn present(&self, index: usize) -> Option<&'a Value> {
        match self.values.get(index) {
            None | Some(Value::None) => None,
            Some(value) => Some(value),
        }
    }

    fn mismatch(&self, index: usize, expected: ArgType, actual: Option<&Value>) -> CallError {
        CallError::ArgumentType {
            method: self.method,
            arg: self.arg_name(index),
            expected,
            actual: actual.map_or("none", Value::kind),
        }
    }

    /// Required byte-buffer argument.
    pub fn bytes(&self, index: usize) -> Result<&'a [u8], CallError> {
        match self.present(index) {
            Some(Value::Bytes(bytes)) => Ok(bytes),
            other => Err(self.mismatch(index, ArgType::Bytes, other)),
        }
    }

    /// Required non-negative integer argument that fits in `u32`.
    pub fn uint(&self, index: usize) -> Result<u32, CallError> {
        match self.present(index) {
            Some(Value::Int(v)) => u32::try_from(*v).map_err(|_| CallError::InvalidArgument {
                method: self.method,
                arg: self.arg_name(index),
                reason: format!("{v} is not a valid u32"),
            }),
            other => Err(self.mismatch(index, ArgType::Int, other)),
        }
    }

    /// Required number argument; integers are widened.
    #[allow(clippy::cast_precision_loss)]
    pub fn float(&self, index: usize) -> Result<f64, CallError> {
        match self.present(index) {
            Some(Value::Float(v)) => Ok(*v),
            Some(Value::Int(v)) => Ok(*v as f64),
            other => Err(self.mismatch(index, ArgType::Float, other)),
        }
    }

    /// Optional string argument.
    pub fn opt_str(&self, index: usize) -> Result<Option<&'a str>, CallError> {
        match self.present(index) {
            None => Ok(None),
            Some(Value::Str(s)) => Ok(Some(s)),
            other => Err(self.mismatch(index, ArgType::Str, other)),
        }
    }
}
