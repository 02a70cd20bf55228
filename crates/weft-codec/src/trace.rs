// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Compile-time trace tags and the per-codec trace log.

use core::fmt::Debug;
use core::marker::PhantomData;

/// Type-level switch selecting whether a codec records trace events.
///
/// The tag is part of the codec's type, so a traced and an untraced codec are
/// distinct types with identical coding behaviour.
pub trait TraceTag: Default + Debug + Send + Sync + 'static {
    /// Whether events are recorded.
    const ENABLED: bool;
}

/// Trace events are discarded at compile time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisableTrace;

impl TraceTag for DisableTrace {
    const ENABLED: bool = false;
}

/// Trace events are recorded and mirrored to `tracing` at TRACE level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnableTrace;

impl TraceTag for EnableTrace {
    const ENABLED: bool = true;
}

/// One recorded trace event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceEvent {
    /// Coarse area of the codec (`encoder`, `decoder`, `recoder`, `feedback`).
    pub zone: &'static str,
    /// Human-readable description.
    pub message: String,
}

/// Append-only event log, active only for [`EnableTrace`].
#[derive(Debug)]
pub struct TraceLog<T> {
    events: Vec<TraceEvent>,
    _tag: PhantomData<T>,
}

impl<T> Default for TraceLog<T> {
    fn default() -> Self {
        Self {
            events: Vec::new(),
            _tag: PhantomData,
        }
    }
}

impl<T: TraceTag> TraceLog<T> {
    /// Record an event. `message` is only evaluated when tracing is enabled.
    #[inline]
    pub fn record(&mut self, zone: &'static str, message: impl FnOnce() -> String) {
        if T::ENABLED {
            let message = message();
            tracing::trace!(zone, %message, "codec trace");
            self.events.push(TraceEvent { zone, message });
        }
    }

    /// Events recorded since the last drain.
    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    /// Render and clear the log, keeping events whose zone starts with `zone`.
    pub fn drain(&mut self, zone: Option<&str>) -> String {
        let mut out = String::new();
        for event in self.events.drain(..) {
            if zone.is_some_and(|z| !event.zone.starts_with(z)) {
                continue;
            }
            out.push_str(event.zone);
            out.push_str(": ");
            out.push_str(&event.message);
            out.push('\n');
        }
        out
    }

    /// Drop all recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}
