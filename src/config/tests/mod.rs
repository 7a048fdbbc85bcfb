//! Unit tests for engine configuration.
