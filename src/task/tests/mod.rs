//! Unit tests for the task module.
//!
//! Tests are organised by concept: the domain state machine, the decision
//! table, ownership resolution, and the two services.

mod support;
