//! Output-token estimation.

/// Expected response length as a fraction of the prompt.
pub const OUTPUT_RATIO: f64 = 0.6;

/// Fewest output tokens a request is assumed to produce.
pub const MIN_OUTPUT_TOKENS: u64 = 50;

/// Most output tokens a request is assumed to produce.
pub const MAX_OUTPUT_TOKENS: u64 = 4000;

/// Estimate output tokens: 60% of input, clamped to `[50, 4000]`.
pub fn estimate_output_tokens(input_tokens: u64) -> u64 {
    let estimated = (input_tokens as f64 * OUTPUT_RATIO).round() as u64;
    estimated.clamp(MIN_OUTPUT_TOKENS, MAX_OUTPUT_TOKENS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_floor_and_ceiling() {
        assert_eq!(estimate_output_tokens(0), 50);
        assert_eq!(estimate_output_tokens(13), 50);
        assert_eq!(estimate_output_tokens(10_000), 4000);
        assert_eq!(estimate_output_tokens(u64::MAX), 4000);
    }

    #[test]
    fn test_proportional_band() {
        assert_eq!(estimate_output_tokens(1000), 600);
        assert_eq!(estimate_output_tokens(1600), 960);
        // 0.6 * 1001 = 600.6
        assert_eq!(estimate_output_tokens(1001), 601);
    }

    proptest! {
        #[test]
        fn prop_always_in_range(x in any::<u64>()) {
            let out = estimate_output_tokens(x);
            prop_assert!((MIN_OUTPUT_TOKENS..=MAX_OUTPUT_TOKENS).contains(&out));
        }
    }
}
