//! Shared test utilities and fixtures
//!
//! Common infrastructure for integration tests.

#![allow(dead_code)]

use moebius_engine::{EvalSettings, ExactError, Expr, NullSink, render_with};

/// Render with default settings and no diagnostics.
pub fn render_str(x: Expr, precision: u32) -> String {
    render_quiet(x, precision, &EvalSettings::default()).unwrap()
}

pub fn render_quiet(
    x: Expr,
    precision: u32,
    settings: &EvalSettings,
) -> Result<String, ExactError> {
    let mut sink = NullSink;
    render_with(x, precision, settings, &mut sink)
}

/// Asserts the renderings of a fresh stream at each `(precision, expected)`.
pub fn assert_renders(make: impl Fn() -> Expr, cases: &[(u32, &str)]) {
    for &(precision, expected) in cases {
        assert_eq!(
            render_str(make(), precision),
            expected,
            "precision {precision}"
        );
    }
}
