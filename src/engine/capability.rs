//! Engine availability, resolved once.
//!
//! A native engine either binds or it does not. [`Capability`] carries that
//! outcome as a value, and [`CapabilityLatch`] memoizes the first resolution
//! attempt for the lifetime of the latch: a failure is latched permanently
//! and never retried.
//!
//! Core entry points take a `&Capability<E>` rather than consulting global
//! state, so tests can hand them an in-memory engine or an unavailable one.

use crate::error::{Error, Result};
use std::sync::OnceLock;

/// Either a usable engine or the reason there is none.
#[derive(Debug, Clone)]
pub enum Capability<E> {
    /// The engine resolved and can be driven
    Available(E),
    /// Resolution failed; operations must fail fast
    Unavailable(String),
}

impl<E> Capability<E> {
    /// Wrap a resolution result.
    pub fn from_result(result: Result<E>) -> Self {
        match result {
            Ok(engine) => Capability::Available(engine),
            Err(e) => Capability::Unavailable(e.to_string()),
        }
    }

    /// The engine, if available.
    pub fn engine(&self) -> Option<&E> {
        match self {
            Capability::Available(engine) => Some(engine),
            Capability::Unavailable(_) => None,
        }
    }

    /// True when the engine can be driven.
    pub fn is_available(&self) -> bool {
        matches!(self, Capability::Available(_))
    }

    /// The engine, or an [`Error::EngineUnavailable`] carrying the reason.
    pub fn require(&self) -> Result<&E> {
        match self {
            Capability::Available(engine) => Ok(engine),
            Capability::Unavailable(reason) => Err(Error::EngineUnavailable(reason.clone())),
        }
    }
}

/// One-shot memo of an engine resolution.
///
/// `static` latches are possible because [`CapabilityLatch::new`] is `const`.
///
/// ```
/// use pdf_locate::engine::CapabilityLatch;
/// use pdf_locate::error::Error;
///
/// let latch: CapabilityLatch<u32> = CapabilityLatch::new();
/// let first = latch.get_or_resolve(|| Err(Error::EngineUnavailable("missing".into())));
/// assert!(!first.is_available());
///
/// // Latched: the second resolver never runs
/// let second = latch.get_or_resolve(|| Ok(7));
/// assert!(!second.is_available());
/// ```
#[derive(Debug)]
pub struct CapabilityLatch<E> {
    cell: OnceLock<Capability<E>>,
}

impl<E> Default for CapabilityLatch<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> CapabilityLatch<E> {
    /// Create an unresolved latch.
    pub const fn new() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }

    /// Resolve on first call; every later call returns the memoized outcome.
    pub fn get_or_resolve<F>(&self, resolve: F) -> &Capability<E>
    where
        F: FnOnce() -> Result<E>,
    {
        self.cell.get_or_init(|| {
            let capability = Capability::from_result(resolve());
            if let Capability::Unavailable(reason) = &capability {
                log::warn!("Text engine resolution failed, latching: {}", reason);
            }
            capability
        })
    }

    /// The memoized outcome, if resolution already happened.
    pub fn get(&self) -> Option<&Capability<E>> {
        self.cell.get()
    }
}
