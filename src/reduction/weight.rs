// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Positional weight encoding.
//!
//! A weight is a number written in base `2^p`: each coordinate of a triple
//! sets one digit to 1. With `k < 2^p` triples no digit can overflow into the
//! next one when weights are added, so the digits of any subset sum count how
//! many chosen triples use each coordinate.
//!
//! # Layouts
//!
//! [`WeightLayout::Disjoint`] gives every coordinate of every universe its own
//! digit: `3q` digits, W in the top band, then X, then Y.
//!
//! ```text
//! digit:  3q-1 .. 2q | 2q-1 .. q | q-1 .. 0
//! band:        W     |     X     |    Y
//! rank:   1  ..  q   | 1  ..  q  | 1 .. q
//! ```
//!
//! [`WeightLayout::Packed`] is the compact formula
//! `2^(3p(q-rw)) + 2^(2p(q-rx)) + 2^(p(q-ry))` with a `3q-1` digit target.
//! Its bands overlap (every rank-q coordinate lands on digit 0), so a subset
//! summing to B need not be a matching and `b1` goes negative on most
//! instances with q > 1. It is kept to reproduce historical numbers only.

use num_bigint::BigUint;
use num_traits::One;
use serde::Serialize;
use strum_macros::{Display, EnumString};

use crate::error::ReductionError;

/// Smallest digit width `p` with `k < 2^p`, i.e. `ceil(log2(k + 1))`.
///
/// Computed on integers: the bit length of `k`.
pub fn digit_width(k: usize) -> u32 {
    usize::BITS - k.leading_zeros()
}

/// Placement of coordinate digits inside a weight.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, Serialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum WeightLayout {
    /// One digit per coordinate, no overlaps.
    #[default]
    Disjoint,
    /// Compact overlapping formula.
    Packed,
}

impl WeightLayout {
    /// Bit exponents of the three terms of a weight, as `[w, x, y]`.
    ///
    /// `ranks` are 1-based and at most `q`. `None` if an exponent does not
    /// fit in a `u64`.
    pub fn exponents(self, p: u64, q: u64, ranks: [usize; 3]) -> Option<[u64; 3]> {
        let [rw, rx, ry] = ranks.map(|r| r as u64);
        match self {
            WeightLayout::Disjoint => Some([
                p.checked_mul(q.checked_mul(3)?.checked_sub(rw)?)?,
                p.checked_mul(q.checked_mul(2)?.checked_sub(rx)?)?,
                p.checked_mul(q.checked_sub(ry)?)?,
            ]),
            WeightLayout::Packed => Some([
                p.checked_mul(3)?.checked_mul(q.checked_sub(rw)?)?,
                p.checked_mul(2)?.checked_mul(q.checked_sub(rx)?)?,
                p.checked_mul(q.checked_sub(ry)?)?,
            ]),
        }
    }

    /// Number of unit digits summed into B.
    pub fn target_digits(self, q: u64) -> u64 {
        match self {
            WeightLayout::Disjoint => 3 * q,
            WeightLayout::Packed => 3 * q - 1,
        }
    }
}

/// Computes triple weights, B and the fillers for one reduction.
#[derive(Debug, Clone)]
pub struct WeightEncoder {
    layout: WeightLayout,
    p: u32,
    q: usize,
    max_bits: u64,
}

impl WeightEncoder {
    /// Encoder for `k` triples over sets of size `q`.
    ///
    /// No value it produces may need more than `max_bits` bits.
    pub fn new(layout: WeightLayout, q: usize, k: usize, max_bits: u64) -> Self {
        Self {
            layout,
            p: digit_width(k),
            q,
            max_bits,
        }
    }

    pub fn layout(&self) -> WeightLayout {
        self.layout
    }

    pub fn digit_width(&self) -> u32 {
        self.p
    }

    /// Weight of a triple from its `[w, x, y]` ranks.
    pub fn weight(&self, ranks: [usize; 3]) -> Result<BigUint, ReductionError> {
        let exponents = self
            .layout
            .exponents(self.p as u64, self.q as u64, ranks)
            .ok_or_else(|| ReductionError::overflow("weight exponent", u64::MAX, self.max_bits))?;

        let mut weight = BigUint::default();
        for exponent in exponents {
            weight += self.power_of_two(exponent, "weight")?;
        }
        self.check_width(&weight, "weight")?;
        Ok(weight)
    }

    /// `B`: one unit in each tracked digit.
    pub fn target(&self) -> Result<BigUint, ReductionError> {
        let p = self.p as u64;
        let mut target = BigUint::default();
        for digit in 0..self.layout.target_digits(self.q as u64) {
            let exponent = p
                .checked_mul(digit)
                .ok_or_else(|| ReductionError::overflow("B exponent", u64::MAX, self.max_bits))?;
            target += self.power_of_two(exponent, "B")?;
        }
        Ok(target)
    }

    /// `(b1, b2) = (2 * total_weight - B, total_weight + B)`.
    pub fn fillers(
        &self,
        total_weight: &BigUint,
        target: &BigUint,
    ) -> Result<(BigUint, BigUint), ReductionError> {
        let doubled = total_weight * 2u32;
        if &doubled < target {
            return Err(ReductionError::NegativeFiller {
                total_weight: total_weight.clone(),
                target: target.clone(),
            });
        }
        let b1 = doubled - target;
        let b2 = total_weight + target;
        self.check_width(&b1, "b1")?;
        self.check_width(&b2, "b2")?;
        Ok((b1, b2))
    }

    /// Reject any sum that outgrew the ceiling.
    pub fn check_width(&self, value: &BigUint, quantity: &str) -> Result<(), ReductionError> {
        let bits = value.bits();
        if bits > self.max_bits {
            return Err(ReductionError::overflow(quantity, bits, self.max_bits));
        }
        Ok(())
    }

    fn power_of_two(&self, exponent: u64, quantity: &str) -> Result<BigUint, ReductionError> {
        // 2^e has e + 1 bits; refuse before allocating.
        if exponent >= self.max_bits {
            return Err(ReductionError::overflow(
                quantity,
                exponent.saturating_add(1),
                self.max_bits,
            ));
        }
        Ok(BigUint::one() << exponent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_width() {
        assert_eq!(digit_width(0), 0);
        assert_eq!(digit_width(1), 1);
        assert_eq!(digit_width(2), 2);
        assert_eq!(digit_width(3), 2);
        assert_eq!(digit_width(4), 3);
        assert_eq!(digit_width(7), 3);
        assert_eq!(digit_width(8), 4);
        for k in 0..1000usize {
            let p = digit_width(k);
            assert!((k as u128) < (1u128 << p), "k = {k} must be below 2^{p}");
            if p > 0 {
                assert!((k as u128) >= (1u128 << (p - 1)), "p = {p} is not minimal for k = {k}");
            }
        }
    }

    #[test]
    fn test_layout_parses_from_str() {
        assert_eq!("disjoint".parse::<WeightLayout>(), Ok(WeightLayout::Disjoint));
        assert_eq!("packed".parse::<WeightLayout>(), Ok(WeightLayout::Packed));
        assert!("other".parse::<WeightLayout>().is_err());
        assert_eq!(WeightLayout::Packed.to_string(), "packed");
    }

    #[test]
    fn test_disjoint_exponents_never_collide() {
        let q = 4u64;
        let p = 3u64;
        let mut seen = std::collections::HashSet::new();
        for r in 1..=q as usize {
            let [w, _, _] = WeightLayout::Disjoint.exponents(p, q, [r, 1, 1]).unwrap();
            let [_, x, _] = WeightLayout::Disjoint.exponents(p, q, [1, r, 1]).unwrap();
            let [_, _, y] = WeightLayout::Disjoint.exponents(p, q, [1, 1, r]).unwrap();
            assert!(seen.insert(w));
            assert!(seen.insert(x));
            assert!(seen.insert(y));
        }
        // All 3q digits are used, each a multiple of p.
        let mut digits: Vec<u64> = seen.into_iter().map(|e| e / p).collect();
        digits.sort_unstable();
        assert_eq!(digits, (0..3 * q).collect::<Vec<_>>());
    }

    #[test]
    fn test_packed_single_element_numbers() {
        // q = 1, k = 1: every term lands on bit 0.
        let encoder = WeightEncoder::new(WeightLayout::Packed, 1, 1, 64);
        assert_eq!(encoder.digit_width(), 1);
        let weight = encoder.weight([1, 1, 1]).unwrap();
        assert_eq!(weight, BigUint::from(3u32));
        let target = encoder.target().unwrap();
        assert_eq!(target, BigUint::from(3u32));
        let (b1, b2) = encoder.fillers(&weight, &target).unwrap();
        assert_eq!(b1, BigUint::from(3u32));
        assert_eq!(b2, BigUint::from(6u32));
    }

    #[test]
    fn test_disjoint_single_element_numbers() {
        let encoder = WeightEncoder::new(WeightLayout::Disjoint, 1, 1, 64);
        let weight = encoder.weight([1, 1, 1]).unwrap();
        assert_eq!(weight, BigUint::from(7u32));
        assert_eq!(encoder.target().unwrap(), BigUint::from(7u32));
    }

    #[test]
    fn test_negative_filler_detected() {
        let encoder = WeightEncoder::new(WeightLayout::Disjoint, 2, 1, 64);
        let err = encoder
            .fillers(&BigUint::from(1u32), &BigUint::from(5u32))
            .unwrap_err();
        assert!(matches!(err, ReductionError::NegativeFiller { .. }));
    }

    #[test]
    fn test_overflow_detected_before_allocation() {
        // q = 30, k = 100: top exponent p * (3q - 1) = 7 * 89 = 623 bits.
        let encoder = WeightEncoder::new(WeightLayout::Disjoint, 30, 100, 256);
        let err = encoder.weight([1, 1, 1]).unwrap_err();
        assert_eq!(err, ReductionError::overflow("weight", 624, 256));
        assert!(matches!(
            encoder.target().unwrap_err(),
            ReductionError::ArithmeticOverflow { .. }
        ));
    }
}
