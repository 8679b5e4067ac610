//! Integration tests that exercise the engine, dependency store, and
//! diagnostic modules together directly through the library, without
//! spawning the built binaries (see `tests/e2e/` for that).

mod helpers;

mod clean_removes_graph_state;
mod dependency_chain;
mod graph_diagnostics;
