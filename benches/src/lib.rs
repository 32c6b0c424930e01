//! Criterion benchmarks for dispatchx live under `benches/`.
