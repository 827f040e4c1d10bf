//! Publishing to Two Sinks
//!
//! The value file stays the source of truth; a second sink such as the
//! OLED panel mirrors it. Both sinks see every call even when the first
//! one fails, so a dead panel never stops the file from updating and a
//! full disk never freezes the panel.

use log::warn;
use shindo_core::traits::Publisher;
use shindo_core::Intensity;
use thiserror::Error;

/// Failure of one of the two sinks
#[derive(Debug, Error)]
pub enum TeeError<A, B> {
    #[error("{0}")]
    Primary(A),

    #[error("{0}")]
    Secondary(B),
}

/// Publisher forwarding every call to `primary`, then `secondary`
#[derive(Debug, Clone)]
pub struct Tee<A, B> {
    primary: A,
    secondary: B,
}

impl<A, B> Tee<A, B> {
    pub fn new(primary: A, secondary: B) -> Self {
        Self { primary, secondary }
    }

    pub fn primary(&self) -> &A {
        &self.primary
    }

    pub fn secondary(&self) -> &B {
        &self.secondary
    }

    /// Primary failures win; a secondary failure alongside one is only logged
    fn combine<EA, EB>(first: Result<(), EA>, second: Result<(), EB>) -> Result<(), TeeError<EA, EB>>
    where
        EB: std::fmt::Display,
    {
        match (first, second) {
            (Ok(()), Ok(())) => Ok(()),
            (Err(a), Ok(())) => Err(TeeError::Primary(a)),
            (Ok(()), Err(b)) => Err(TeeError::Secondary(b)),
            (Err(a), Err(b)) => {
                warn!("Secondary publisher also failed: {}", b);
                Err(TeeError::Primary(a))
            }
        }
    }
}

impl<A, B> Publisher for Tee<A, B>
where
    A: Publisher,
    B: Publisher,
    B::Error: std::fmt::Display,
{
    type Error = TeeError<A::Error, B::Error>;

    fn reset(&mut self) -> Result<(), Self::Error> {
        let first = self.primary.reset();
        let second = self.secondary.reset();
        Self::combine(first, second)
    }

    fn publish(&mut self, intensity: Intensity) -> Result<(), Self::Error> {
        let first = self.primary.publish(intensity);
        let second = self.secondary.publish(intensity);
        Self::combine(first, second)
    }
}
