//! Numeric formatting shared by formula rendering and cell value output.

/// Format a finite `f64` with the shortest round-trippable decimal
/// representation and no unnecessary trailing zeros (`3` not `3.0`, `2.5` not
/// `2.500000`). Rust's `f64` `Display` already has this property; this
/// wrapper exists so every call site names the convention explicitly.
pub fn format_number(n: f64) -> String {
    n.to_string()
}
