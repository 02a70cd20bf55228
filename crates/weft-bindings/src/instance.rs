// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Type-erased host surface over factories and pooled codecs.

use std::sync::Arc;

use weft_field::{FieldKind, FieldLabel};
use weft_registry_api::{MethodDef, Value};

use crate::capability::Capabilities;
use crate::factory::{Factory, Pooled};
use crate::{CallError, MethodTable};

trait ErasedCodec: Send {
    fn call(&mut self, method: &str, args: &[Value]) -> Result<Value, CallError>;
    fn type_name(&self) -> &str;
    fn methods(&self) -> Vec<MethodDef>;
}

struct Bound<C: 'static> {
    codec: Pooled<C>,
    table: Arc<MethodTable<C>>,
}

impl<C: Capabilities> ErasedCodec for Bound<C> {
    fn call(&mut self, method: &str, args: &[Value]) -> Result<Value, CallError> {
        self.table.call(&mut self.codec, method, args)
    }

    fn type_name(&self) -> &str {
        self.table.type_name()
    }

    fn methods(&self) -> Vec<MethodDef> {
        self.table.defs()
    }
}

/// A built codec exposed through its method table.
///
/// Dropping the instance returns the codec to its factory's pool.
pub struct Instance {
    inner: Box<dyn ErasedCodec>,
}

impl Instance {
    /// Invoke `method` with positional `args`.
    pub fn call(&mut self, method: &str, args: &[Value]) -> Result<Value, CallError> {
        self.inner.call(method, args)
    }

    /// Exposed type name.
    pub fn type_name(&self) -> &str {
        self.inner.type_name()
    }

    /// Method descriptors in name order.
    pub fn methods(&self) -> Vec<MethodDef> {
        self.inner.methods()
    }
}

impl core::fmt::Debug for Instance {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Instance")
            .field("type_name", &self.type_name())
            .finish_non_exhaustive()
    }
}

/// Host-facing factory for one exposed codec type.
pub trait HostFactory: Send {
    /// Exposed factory name.
    fn name(&self) -> &str;
    /// Maximum symbols.
    fn max_symbols(&self) -> u32;
    /// Maximum symbol size.
    fn max_symbol_size(&self) -> u32;
    /// Largest payload a built codec can produce.
    fn max_payload_size(&self) -> u32;
    /// Symbols used by the next build.
    fn symbols(&self) -> u32;
    /// Symbol size used by the next build.
    fn symbol_size(&self) -> u32;
    /// Change the symbols used by subsequent builds.
    fn set_symbols(&mut self, symbols: u32) -> Result<(), CallError>;
    /// Change the symbol size used by subsequent builds.
    fn set_symbol_size(&mut self, symbol_size: u32) -> Result<(), CallError>;
    /// Build (or recycle) a codec at the current dimensions.
    fn build(&self) -> Result<Instance, CallError>;
}

struct BoundFactory<C: 'static> {
    name: Arc<str>,
    factory: Factory<C>,
    table: Arc<MethodTable<C>>,
}

impl<C: Capabilities> HostFactory for BoundFactory<C> {
    fn name(&self) -> &str {
        &self.name
    }

    fn max_symbols(&self) -> u32 {
        self.factory.max_symbols()
    }

    fn max_symbol_size(&self) -> u32 {
        self.factory.max_symbol_size()
    }

    fn max_payload_size(&self) -> u32 {
        self.factory.max_payload_size()
    }

    fn symbols(&self) -> u32 {
        self.factory.symbols()
    }

    fn symbol_size(&self) -> u32 {
        self.factory.symbol_size()
    }

    fn set_symbols(&mut self, symbols: u32) -> Result<(), CallError> {
        Ok(self.factory.set_symbols(symbols)?)
    }

    fn set_symbol_size(&mut self, symbol_size: u32) -> Result<(), CallError> {
        Ok(self.factory.set_symbol_size(symbol_size)?)
    }

    fn build(&self) -> Result<Instance, CallError> {
        let codec = self.factory.build()?;
        Ok(Instance {
            inner: Box::new(Bound {
                codec,
                table: Arc::clone(&self.table),
            }),
        })
    }
}

/// Registered binding for one codec type: its factory name and shared
/// method table.
pub(crate) struct FactoryBinding<C: 'static> {
    name: Arc<str>,
    table: Arc<MethodTable<C>>,
}

impl<C: Capabilities> FactoryBinding<C> {
    pub(crate) fn new(name: &str, table: MethodTable<C>) -> Self {
        Self {
            name: Arc::from(name),
            table: Arc::new(table),
        }
    }
}

/// Object-safe view of a [`FactoryBinding`].
pub(crate) trait ErasedBinding: Send + Sync {
    fn create(
        &self,
        max_symbols: u32,
        max_symbol_size: u32,
    ) -> Result<Box<dyn HostFactory>, CallError>;
}

impl<C: Capabilities> ErasedBinding for FactoryBinding<C> {
    fn create(
        &self,
        max_symbols: u32,
        max_symbol_size: u32,
    ) -> Result<Box<dyn HostFactory>, CallError> {
        let granularity =
            <C::Field as FieldLabel>::KIND.map_or(1, FieldKind::symbol_granularity);
        Ok(Box::new(BoundFactory {
            name: Arc::clone(&self.name),
            factory: Factory::<C>::new(max_symbols, max_symbol_size, granularity)?,
            table: Arc::clone(&self.table),
        }))
    }
}
