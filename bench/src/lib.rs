//! Shared setup for the zwrap benchmarks.
//!
//! Workloads are deterministic so runs compare across commits.

use num_bigint::BigInt;
use zwrap_math::{BitVector, Rational};

/// Environment variable read by [`init_logging`].
pub const LOG_ENV: &str = "ZWRAP_LOG";

/// Install a stderr `fmt` subscriber filtered by `ZWRAP_LOG`.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging() {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::builder()
        .with_env_var(LOG_ENV.to_string())
        .from_env_lossy();
    let fmt_layer = fmt::layer().with_writer(std::io::stderr);

    if tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .is_ok()
    {
        tracing::info!(env = LOG_ENV, "benchmark logging initialised");
    }
}

/// `count` fractions `(7k + 1) / (3k + 2)` with alternating sign.
pub fn rational_workload(count: usize) -> Vec<Rational> {
    (0..count as i64)
        .filter_map(|k| {
            let numer = if k % 2 == 0 { 7 * k + 1 } else { -(7 * k + 1) };
            Rational::new(numer, 3 * k + 2).ok()
        })
        .collect()
}

/// A rational whose numerator and denominator have about `digits` digits.
pub fn wide_rational(digits: u32) -> Rational {
    let numer = BigInt::from(10).pow(digits) + 7;
    let denom = BigInt::from(10).pow(digits) - 3;
    Rational::new(numer, denom).unwrap_or_default()
}

/// `count` vectors of `width` bits with a fixed bit pattern.
pub fn bitvector_workload(width: u32, count: usize) -> Vec<BitVector> {
    (0..count as u64)
        .filter_map(|k| {
            let seed = BigInt::from(k.wrapping_mul(0x9E37_79B9_7F4A_7C15));
            BitVector::new(seed.pow(width.div_ceil(64)), width).ok()
        })
        .collect()
}

/// Fraction, decimal and integer strings in equal parts.
pub fn parse_inputs(count: usize) -> Vec<String> {
    (0..count)
        .map(|k| match k % 3 {
            0 => format!("{}/{}", 22 * k + 1, 7 * k + 3),
            1 => format!("-{}.{:04}", k, k * 37 % 10_000),
            _ => format!("{}", k * 1_000_003),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workloads_are_full() {
        assert_eq!(rational_workload(10).len(), 10);
        assert_eq!(bitvector_workload(128, 10).len(), 10);
        assert!(bitvector_workload(128, 10).iter().all(|v| v.width() == 128));
        assert!(parse_inputs(9).iter().all(|s| Rational::parse(s).is_ok()));
    }

    #[test]
    fn test_wide_rational_is_reduced() {
        let r = wide_rational(40);
        assert!(!r.is_integer());
    }
}
