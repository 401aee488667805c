//! Unit tests for skinetic-bootstrap
//!
//! These tests use mocked ports and run fast without external I/O.

mod architecture;
