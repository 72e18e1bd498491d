//! Test suites for the namespace dispatcher.

mod behaviour;
mod support;
