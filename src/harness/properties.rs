use fastrand::Rng;
use tracing::{debug, instrument};

use crate::calculator::{Number, add};
use crate::harness::types::PropertyResult;

const INT_BOUND: i64 = 1_000_000;
const FLOAT_BOUND: f64 = 1_000_000.0;

/// Draws operands from integers, floats and a mix of both.
pub struct OperandSampler {
    rng: Rng,
}

impl OperandSampler {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Rng::with_seed(seed),
        }
    }

    pub fn next(&mut self) -> Number {
        if self.rng.bool() {
            Number::Int(self.rng.i64(-INT_BOUND..=INT_BOUND))
        } else {
            Number::Float((self.rng.f64() * 2.0 - 1.0) * FLOAT_BOUND)
        }
    }
}

/// `add(a, b) == add(b, a)` for every sampled pair.
#[instrument(skip(tolerance))]
pub fn check_commutative(samples: usize, seed: u64, tolerance: f64) -> PropertyResult {
    let mut sampler = OperandSampler::new(seed);
    let counterexample = (0..samples).find_map(|_| {
        let (a, b) = (sampler.next(), sampler.next());
        let (ab, ba) = (add(a, b), add(b, a));
        (!ab.approx_eq(ba, tolerance))
            .then(|| format!("{} + {} = {} but {} + {} = {}", a, b, ab, b, a, ba))
    });
    finish("commutativity", samples, seed, counterexample)
}

/// `add(add(a, b), c) == add(a, add(b, c))` within `tolerance`.
#[instrument(skip(tolerance))]
pub fn check_associative(samples: usize, seed: u64, tolerance: f64) -> PropertyResult {
    let mut sampler = OperandSampler::new(seed);
    let counterexample = (0..samples).find_map(|_| {
        let (a, b, c) = (sampler.next(), sampler.next(), sampler.next());
        let left = add(add(a, b), c);
        let right = add(a, add(b, c));
        (!left.approx_eq(right, tolerance)).then(|| {
            format!(
                "({} + {}) + {} = {} but {} + ({} + {}) = {}",
                a, b, c, left, a, b, c, right
            )
        })
    });
    finish("associativity", samples, seed, counterexample)
}

fn finish(
    property: &str,
    samples: usize,
    seed: u64,
    counterexample: Option<String>,
) -> PropertyResult {
    debug!(property, samples, holds = counterexample.is_none(), "Property checked");
    PropertyResult {
        property: property.to_string(),
        samples,
        seed,
        holds: counterexample.is_none(),
        counterexample,
    }
}
