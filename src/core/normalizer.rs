//! Sample normalizer: signed axis reading → non-negative magnitude

use crate::NORMALIZE_BIAS;

/// Shift a raw axis reading by the bias, clamping below at 0.
///
/// Total over `i16`: the largest result is `i16::MAX + 4000`, which fits `u16`.
///
/// ```
/// use stillwatch::core::normalize;
///
/// assert_eq!(normalize(-4000), 0);
/// assert_eq!(normalize(0), 4000);
/// assert_eq!(normalize(-5000), 0);
/// ```
pub fn normalize(raw: i16) -> u16 {
    let biased = i32::from(raw) + NORMALIZE_BIAS;
    if biased < 0 {
        0
    } else {
        biased as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bias_applied() {
        assert_eq!(normalize(0), 4000);
        assert_eq!(normalize(1000), 5000);
        assert_eq!(normalize(-1000), 3000);
    }

    #[test]
    fn test_clamps_below_range() {
        assert_eq!(normalize(-4001), 0);
        assert_eq!(normalize(i16::MIN), 0);
    }

    #[test]
    fn test_upper_extreme_fits() {
        assert_eq!(normalize(i16::MAX), 36767);
    }

    #[test]
    fn test_total_over_i16() {
        for raw in i16::MIN..=i16::MAX {
            let expected = i32::from(raw) + NORMALIZE_BIAS;
            let got = normalize(raw);
            if expected >= 0 {
                assert_eq!(i32::from(got), expected, "raw={}", raw);
            } else {
                assert_eq!(got, 0, "raw={}", raw);
            }
        }
    }
}
