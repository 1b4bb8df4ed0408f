//! Test-only crate. The cross-crate scenario tests live under `tests/`.
