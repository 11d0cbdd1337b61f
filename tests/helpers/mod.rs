//! Shared helpers for integration tests

#![allow(dead_code)]

pub mod simulation;

/// Assert two probability vectors agree entry-wise within `tolerance`
pub fn assert_distribution_close(actual: &[f64], expected: &[f64], tolerance: f64, context: &str) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "{}: length mismatch",
        context
    );
    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        assert!(
            (a - e).abs() <= tolerance,
            "{}: state {} differs: {} vs {} (tolerance {})",
            context,
            i,
            a,
            e,
            tolerance
        );
    }
}
