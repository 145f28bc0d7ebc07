#![no_std]

extern crate alloc;

pub use board::*;
pub use cell::*;
pub use config::*;
pub use difficulty::*;
pub use error::*;
pub use generator::*;
pub use reveal::*;
pub use session::*;
pub use snapshot::*;
pub use types::*;

mod board;
mod cell;
mod config;
mod difficulty;
mod error;
mod generator;
mod reveal;
mod session;
mod snapshot;
mod types;
