//! Workspace root package. Carries shared tooling only; the library and
//! binary crates live under `crates/`.
