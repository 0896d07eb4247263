//! Property-based tests for identity and key types.
