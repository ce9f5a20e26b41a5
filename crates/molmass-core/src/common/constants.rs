//! Numeric constants shared by the composition calculator and its checks.

/// Scale applied to mass fractions to express them as percentages.
pub const PERCENT_SCALE: f64 = 100.0;
/// Absolute tolerance on the sum of all element percentages.
pub const PERCENT_SUM_TOLERANCE: f64 = 0.01;
/// Relative tolerance between the molecular weight and the summed element masses.
pub const MASS_RELATIVE_TOLERANCE: f64 = 1.0e-9;
