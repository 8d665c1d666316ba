pub mod cli;
pub mod screens;
pub mod session;
