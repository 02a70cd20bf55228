// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Exposed type and factory names.
//!
//! `<family><Role><Field>[Trace]` for codec types and
//! `<family><Role>Factory<Field>[Trace]` for their factories. Uniqueness over
//! the registered set is checked when the registry is built.

use weft_registry_api::Role;

const TRACE_SUFFIX: &str = "Trace";
const FACTORY_INFIX: &str = "Factory";

/// Exposed codec type name, e.g. `SlidingWindowDecoderBinary4Trace`.
pub fn resolve_name(label: &str, role: Role, field: &str, trace: bool) -> String {
    compose(label, role, "", field, trace)
}

/// Exposed factory name, e.g. `FullVectorEncoderFactoryBinary8`.
pub fn resolve_factory_name(label: &str, role: Role, field: &str, trace: bool) -> String {
    compose(label, role, FACTORY_INFIX, field, trace)
}

fn compose(label: &str, role: Role, infix: &str, field: &str, trace: bool) -> String {
    let mut name = String::with_capacity(label.len() + infix.len() + field.len() + 16);
    name.push_str(label);
    name.push_str(role.as_str());
    name.push_str(infix);
    name.push_str(field);
    if trace {
        name.push_str(TRACE_SUFFIX);
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_concatenate_in_order() {
        assert_eq!(
            resolve_name("FullVector", Role::Encoder, "Binary8", false),
            "FullVectorEncoderBinary8"
        );
        assert_eq!(
            resolve_name("NoCode", Role::Decoder, "", true),
            "NoCodeDecoderTrace"
        );
        assert_eq!(
            resolve_factory_name("OnTheFly", Role::Decoder, "Binary16", true),
            "OnTheFlyDecoderFactoryBinary16Trace"
        );
    }
}
