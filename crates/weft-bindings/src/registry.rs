// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Registration of every exposed configuration.
//!
//! [`CONFIGURATIONS`] enumerates families × fields × trace tags in a fixed
//! order. [`Registry::initialize`] walks it once, generating a method table
//! and a factory binding per entry; afterwards the registry is read-only.

use std::collections::HashMap;
use std::sync::OnceLock;

use tracing::{debug, info};
use weft_codec::{
    CarouselDecoder, CarouselEncoder, DisableTrace, EnableTrace, FullVectorDecoder,
    FullVectorEncoder, OnTheFlyDecoder, OnTheFlyEncoder, SlidingWindowDecoder,
    SlidingWindowEncoder, SparseFullVectorEncoder,
};
use weft_field::{Binary, Binary16, Binary4, Binary8, FieldKind, FieldLabel};
use weft_registry_api::{FactoryDef, RegistryInfo, RegistryProvider, TypeDef};

use crate::capability::{capability_flags, has_trace, role_of, Capabilities};
use crate::coder::binding;
use crate::families::CodecFamily;
use crate::instance::{ErasedBinding, FactoryBinding, HostFactory};
use crate::naming::{resolve_factory_name, resolve_name};
use crate::{CallError, RegistryError};

/// Host module name.
pub const MODULE_NAME: &str = "weft";

/// Bumped whenever exposed names or method sets change incompatibly.
pub const REGISTRY_VERSION: u32 = 1;

type RegisterFn = fn(&mut Registry, &Configuration) -> Result<(), RegistryError>;

/// One exposed codec type.
#[derive(Clone, Copy)]
pub struct Configuration {
    /// Family and role.
    pub family: CodecFamily,
    /// Field, `None` for codecs without field arithmetic.
    pub field: Option<FieldKind>,
    /// Trace tag.
    pub trace: bool,
    register: RegisterFn,
}

impl Configuration {
    /// Register this configuration's codec type into `registry`.
    pub fn register(&self, registry: &mut Registry) -> Result<(), RegistryError> {
        (self.register)(registry, self)
    }
}

impl core::fmt::Debug for Configuration {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Configuration")
            .field("family", &self.family)
            .field("field", &self.field)
            .field("trace", &self.trace)
            .finish_non_exhaustive()
    }
}

macro_rules! configuration {
    ($family:ident, $codec:ty, $field:expr, $trace:expr) => {
        Configuration {
            family: CodecFamily::$family,
            field: $field,
            trace: $trace,
            register: register::<$codec>,
        }
    };
}

macro_rules! configurations {
    ($($family:ident => $codec:ident),* $(,)?) => {
        &[
            $(
                configuration!($family, $codec<Binary, DisableTrace>, Some(FieldKind::Binary), false),
                configuration!($family, $codec<Binary, EnableTrace>, Some(FieldKind::Binary), true),
                configuration!($family, $codec<Binary4, DisableTrace>, Some(FieldKind::Binary4), false),
                configuration!($family, $codec<Binary4, EnableTrace>, Some(FieldKind::Binary4), true),
                configuration!($family, $codec<Binary8, DisableTrace>, Some(FieldKind::Binary8), false),
                configuration!($family, $codec<Binary8, EnableTrace>, Some(FieldKind::Binary8), true),
                configuration!($family, $codec<Binary16, DisableTrace>, Some(FieldKind::Binary16), false),
                configuration!($family, $codec<Binary16, EnableTrace>, Some(FieldKind::Binary16), true),
            )*
            configuration!(NoCodeEncoder, CarouselEncoder<DisableTrace>, None, false),
            configuration!(NoCodeEncoder, CarouselEncoder<EnableTrace>, None, true),
            configuration!(NoCodeDecoder, CarouselDecoder<DisableTrace>, None, false),
            configuration!(NoCodeDecoder, CarouselDecoder<EnableTrace>, None, true),
        ]
    };
}

/// Every exposed configuration, in registration order.
pub static CONFIGURATIONS: &[Configuration] = configurations! {
    FullVectorEncoder => FullVectorEncoder,
    FullVectorDecoder => FullVectorDecoder,
    SparseFullVectorEncoder => SparseFullVectorEncoder,
    OnTheFlyEncoder => OnTheFlyEncoder,
    OnTheFlyDecoder => OnTheFlyDecoder,
    SlidingWindowEncoder => SlidingWindowEncoder,
    SlidingWindowDecoder => SlidingWindowDecoder,
};

/// Register codec type `C` under `config`.
///
/// # Errors
/// [`RegistryError::RoleMismatch`], [`RegistryError::FieldMismatch`] or
/// [`RegistryError::TraceMismatch`] when `config` disagrees with `C`, and any
/// error raised while generating the method table or checking names.
pub fn register<C: Capabilities>(
    registry: &mut Registry,
    config: &Configuration,
) -> Result<(), RegistryError> {
    let family = config.family.label();
    let role = role_of::<C>();
    if role != config.family.role() {
        return Err(RegistryError::RoleMismatch {
            family,
            declared: config.family.role(),
            actual: role,
        });
    }
    let kind = <C::Field as FieldLabel>::KIND;
    if kind != config.field {
        return Err(RegistryError::FieldMismatch {
            family,
            role,
            declared: config.field,
            actual: kind,
        });
    }
    let trace = has_trace::<C>();
    if trace != config.trace {
        return Err(RegistryError::TraceMismatch {
            family,
            role,
            declared: config.trace,
            actual: trace,
        });
    }
    let field = <C::Field as FieldLabel>::LABEL;
    let name = resolve_name(family, role, field, trace);
    let factory = resolve_factory_name(family, role, field, trace);
    let table = binding::<C>(&name)?;

    let type_def = TypeDef {
        name: name.clone(),
        factory: factory.clone(),
        family,
        role,
        field,
        trace,
        capabilities: capability_flags::<C>(),
        methods: table.defs(),
    };
    let factory_def = FactoryDef {
        name: factory.clone(),
        builds: name.clone(),
    };
    registry.insert(type_def, factory_def, Box::new(FactoryBinding::new(&factory, table)))?;
    debug!(type_name = %name, factory = %factory, "registered codec binding");
    Ok(())
}

/// Exposed codec types and their factories.
pub struct Registry {
    types: Vec<TypeDef>,
    factories: Vec<FactoryDef>,
    bindings: Vec<Box<dyn ErasedBinding>>,
    type_index: HashMap<String, usize>,
    factory_index: HashMap<String, usize>,
}

impl Registry {
    fn empty() -> Self {
        Self {
            types: Vec::new(),
            factories: Vec::new(),
            bindings: Vec::new(),
            type_index: HashMap::new(),
            factory_index: HashMap::new(),
        }
    }

    /// Register every entry of [`CONFIGURATIONS`].
    pub fn initialize() -> Result<Self, RegistryError> {
        Self::from_configurations(CONFIGURATIONS)
    }

    /// Register `configurations` in order.
    ///
    /// # Errors
    /// The first [`RegistryError`] raised; nothing is registered partially.
    pub fn from_configurations(configurations: &[Configuration]) -> Result<Self, RegistryError> {
        let mut registry = Self::empty();
        for config in configurations {
            config.register(&mut registry)?;
        }
        info!(
            types = registry.types.len(),
            factories = registry.factories.len(),
            "weft registry initialized"
        );
        Ok(registry)
    }

    fn insert(
        &mut self,
        type_def: TypeDef,
        factory_def: FactoryDef,
        binding: Box<dyn ErasedBinding>,
    ) -> Result<(), RegistryError> {
        for name in [&type_def.name, &factory_def.name] {
            if self.type_index.contains_key(name.as_str())
                || self.factory_index.contains_key(name.as_str())
            {
                return Err(RegistryError::DuplicateName(name.clone()));
            }
        }
        let index = self.types.len();
        self.type_index.insert(type_def.name.clone(), index);
        self.factory_index.insert(factory_def.name.clone(), index);
        self.types.push(type_def);
        self.factories.push(factory_def);
        self.bindings.push(binding);
        Ok(())
    }

    /// Create a host factory by exposed factory name.
    ///
    /// # Errors
    /// [`CallError::UnknownFactory`], or [`CallError::Codec`] when the maxima
    /// are zero or `max_symbol_size` is not a multiple of the field's
    /// symbol granularity.
    pub fn factory(
        &self,
        name: &str,
        max_symbols: u32,
        max_symbol_size: u32,
    ) -> Result<Box<dyn HostFactory>, CallError> {
        let index = self
            .factory_index
            .get(name)
            .copied()
            .ok_or_else(|| CallError::UnknownFactory(name.to_owned()))?;
        self.bindings[index].create(max_symbols, max_symbol_size)
    }

    /// Exposed type names in registration order.
    pub fn type_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.types.iter().map(|t| t.name.as_str())
    }

    /// Exposed factory names in registration order.
    pub fn factory_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.factories.iter().map(|f| f.name.as_str())
    }
}

impl core::fmt::Debug for Registry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Registry")
            .field("types", &self.types.len())
            .field("factories", &self.factories.len())
            .finish_non_exhaustive()
    }
}

impl RegistryProvider for Registry {
    fn info(&self) -> RegistryInfo {
        RegistryInfo {
            module: MODULE_NAME,
            registry_version: REGISTRY_VERSION,
            type_count: self.types.len(),
            factory_count: self.factories.len(),
        }
    }

    fn type_by_name(&self, name: &str) -> Option<&TypeDef> {
        self.type_index.get(name).map(|&i| &self.types[i])
    }

    fn factory_by_name(&self, name: &str) -> Option<&FactoryDef> {
        self.factory_index.get(name).map(|&i| &self.factories[i])
    }

    fn all_types(&self) -> &[TypeDef] {
        &self.types
    }

    fn all_factories(&self) -> &[FactoryDef] {
        &self.factories
    }
}

static GLOBAL: OnceLock<Result<Registry, RegistryError>> = OnceLock::new();

/// Process-wide registry, initialized on first use.
///
/// # Errors
/// The configuration error that prevented initialization; it is reported on
/// every call.
pub fn global() -> Result<&'static Registry, RegistryError> {
    GLOBAL
        .get_or_init(Registry::initialize)
        .as_ref()
        .map_err(Clone::clone)
}
