// Copyright 2026 the Doodad Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Monotonic input timestamps.
//!
//! The frame driver stamps every [`InputFrame`](crate::event::InputFrame)
//! with a [`HostTime`] read from whatever monotonic clock the platform
//! offers. Gesture thresholds are [`Duration`]s in the same tick units, built
//! from wall-clock milliseconds through a [`Timebase`].

/// When an input frame was sampled, in platform ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct HostTime(pub u64);

impl HostTime {
    /// Raw ticks.
    #[must_use]
    pub const fn ticks(self) -> u64 {
        self.0
    }

    /// Ticks elapsed since `earlier`. Clamps to zero when the clock appears
    /// to run backwards.
    #[must_use]
    pub const fn saturating_duration_since(self, earlier: Self) -> Duration {
        Duration(self.0.saturating_sub(earlier.0))
    }
}

/// How long one tick lasts: `numer / denom` nanoseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Timebase {
    /// Nanoseconds per `denom` ticks.
    pub numer: u32,
    /// Ticks per `numer` nanoseconds.
    pub denom: u32,
}

impl Default for Timebase {
    fn default() -> Self {
        Self::NANOS
    }
}

impl Timebase {
    /// One tick per nanosecond.
    pub const NANOS: Self = Self { numer: 1, denom: 1 };

    /// A timebase of `numer / denom` nanoseconds per tick.
    ///
    /// # Panics
    ///
    /// Panics if either part is zero.
    #[must_use]
    pub const fn new(numer: u32, denom: u32) -> Self {
        assert!(numer != 0, "timebase numerator must not be zero");
        assert!(denom != 0, "timebase denominator must not be zero");
        Self { numer, denom }
    }

    /// Nanoseconds in `ticks`.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "widened to u128 for the multiply; results past u64 are not meaningful timestamps"
    )]
    pub const fn ticks_to_nanos(self, ticks: u64) -> u64 {
        (ticks as u128 * self.numer as u128 / self.denom as u128) as u64
    }

    /// Ticks in `nanos` nanoseconds.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "widened to u128 for the multiply; results past u64 are not meaningful timestamps"
    )]
    pub const fn nanos_to_ticks(self, nanos: u64) -> u64 {
        (nanos as u128 * self.denom as u128 / self.numer as u128) as u64
    }
}

/// A span of platform ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Duration(pub u64);

impl Duration {
    /// Raw ticks.
    #[must_use]
    pub const fn ticks(self) -> u64 {
        self.0
    }

    /// `millis` milliseconds expressed in `timebase` ticks.
    #[must_use]
    pub const fn from_millis(millis: u64, timebase: Timebase) -> Self {
        Self(timebase.nanos_to_ticks(millis.saturating_mul(1_000_000)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millis_in_nanosecond_ticks() {
        let d = Duration::from_millis(100, Timebase::NANOS);
        assert_eq!(d.ticks(), 100_000_000, "100ms at 1:1");
    }

    #[test]
    fn millis_in_coarse_ticks() {
        // 24 MHz tick source: 125/3 ns per tick.
        let tb = Timebase::new(125, 3);
        let d = Duration::from_millis(1000, tb);
        assert_eq!(d.ticks(), 24_000_000, "1s of 24 MHz ticks");
        assert_eq!(tb.ticks_to_nanos(d.ticks()), 1_000_000_000);
    }

    #[test]
    fn elapsed_never_underflows() {
        let t = HostTime(1000);
        assert_eq!(t.saturating_duration_since(HostTime(1500)), Duration(0));
        assert_eq!(t.saturating_duration_since(HostTime(400)), Duration(600));
    }

    #[test]
    #[should_panic(expected = "denominator must not be zero")]
    fn zero_denominator_panics() {
        let _ = Timebase::new(1, 0);
    }
}
