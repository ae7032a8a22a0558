//! End-to-end tests for the full three-level hierarchy.
