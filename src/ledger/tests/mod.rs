//! Unit tests for the reward ledger.
