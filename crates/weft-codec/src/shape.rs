// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Family markers selecting how an RLNC codec chooses its coding window.
//!
//! The marker decides which symbols coded payloads may combine and, through
//! trait impls on the concrete codec types, which optional capabilities the
//! family offers.

use core::fmt::Debug;

/// Which source symbols a coded payload may combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Every symbol in the block; missing symbols count as zeros.
    Block,
    /// Only symbols the encoder has been given so far.
    Available,
}

/// Compile-time description of an RLNC family.
pub trait Shape: Default + Debug + Send + Sync + 'static {
    /// Coding window.
    const SCOPE: Scope;
    /// Coefficients are drawn with a tunable density instead of uniformly.
    const SPARSE: bool;
}

/// Dense coding over the whole block.
#[derive(Debug, Clone, Copy, Default)]
pub struct FullVector;

impl Shape for FullVector {
    const SCOPE: Scope = Scope::Block;
    const SPARSE: bool = false;
}

/// Density-controlled coding over the whole block.
#[derive(Debug, Clone, Copy, Default)]
pub struct SparseFullVector;

impl Shape for SparseFullVector {
    const SCOPE: Scope = Scope::Block;
    const SPARSE: bool = true;
}

/// Coding over the symbols available so far.
#[derive(Debug, Clone, Copy, Default)]
pub struct OnTheFly;

impl Shape for OnTheFly {
    const SCOPE: Scope = Scope::Available;
    const SPARSE: bool = false;
}

/// On-the-fly coding whose window shrinks as the receiver acknowledges symbols.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlidingWindow;

impl Shape for SlidingWindow {
    const SCOPE: Scope = Scope::Available;
    const SPARSE: bool = false;
}
