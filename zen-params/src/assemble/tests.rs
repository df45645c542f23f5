//! Tests for request assembly.
