/// Sentinel `what` value that clears a resident's choice.
const UNSET: i32 = -5;

/// Translates a target status into the `what` values to submit, in order.
///
/// The form only accepts a limited range directly. Beyond that the site's
/// stepper buttons move relative to the current state, so some targets take
/// several submissions.
pub fn steps(value: Option<i32>) -> Vec<i32> {
    match value {
        None => vec![UNSET],
        Some(-5) => vec![-3, -4, -4],
        Some(-4) => vec![-3, -4],
        Some(4) => vec![3, 4],
        Some(value) => vec![value],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_values() {
        for value in [-3, -2, -1, 0, 1, 2, 3] {
            assert_eq!(steps(Some(value)), vec![value]);
        }
    }

    #[test]
    fn test_stepped_values() {
        assert_eq!(steps(Some(-5)), vec![-3, -4, -4]);
        assert_eq!(steps(Some(-4)), vec![-3, -4]);
        assert_eq!(steps(Some(4)), vec![3, 4]);
    }

    #[test]
    fn test_unset() {
        assert_eq!(steps(None), vec![-5]);
    }
}
