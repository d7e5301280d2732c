//! Privacy-preserving jury adjudication.
//!
//! Certified voters cast encrypted ballots on a case, an external decryption oracle reveals
//! the aggregate verdict, and a deadline guarantees that a case whose oracle never answers
//! can be timed out and refunded instead of stalling forever.

#[macro_use]
extern crate serde;

mod authorization;
mod case;
mod clock;
mod config;
mod court;
mod decryption;
mod error;
mod event;
mod guard;
mod identifier;
mod identity;
mod refund;
mod tally;
mod vote;

pub use authorization::*;
pub use case::*;
pub use clock::*;
pub use config::*;
pub use court::*;
pub use decryption::*;
pub use error::*;
pub use event::*;
pub use identifier::*;
pub use identity::*;
pub use refund::*;
pub use tally::*;
pub use vote::*;

#[cfg(test)]
mod tests;
