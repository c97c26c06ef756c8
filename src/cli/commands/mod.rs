//! Subcommands of the `gridq` binary

pub mod train;
