//! Workflows behind the `kac` subcommands

pub mod orchestration;

pub use orchestration::{
    run_bump_workflow, run_copy_workflow, run_init_workflow, BumpOutcome, BumpWorkflowArgs,
    InitWorkflowArgs,
};
