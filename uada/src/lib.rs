//! Operator tooling for the uADA validators: evaluate invocations, quote
//! fees, derive one-shot NFT names and encode the fee parameter datum.

pub mod commands;
pub mod config;
