//! End-to-end tests: each spawns the real `redo` binary against a fresh
//! project directory, matching the scenarios walked through in spec.md §8.

mod helpers;

mod basic_build;
mod default_script_selection;
mod ifchange_propagation;
mod incremental_skip;
mod loop_detection;
mod script_contract;
mod shared_prerequisite;
