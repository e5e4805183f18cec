// server/src/cli/mod.rs

pub mod cli;
pub mod commands;
pub mod dashboard;
pub mod handlers;

pub use cli::{run_command, start_cli, CliContext};
pub use commands::{
    CliArgs, Commands, EmergencyCommand, EmergencyCommandWrapper, FamilyCommand, FamilyCommandWrapper,
    RegisterArgs,
};
