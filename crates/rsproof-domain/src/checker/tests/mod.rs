//! Tests for the check engine.
