//! CLI subcommands

pub mod apply_reply;
pub mod inspect;
pub mod register;
