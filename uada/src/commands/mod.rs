//! CLI command implementations.
//!
//! These modules implement the user-facing CLI commands and legitimately
//! use stdout for output.

pub mod encode_params;
pub mod evaluate;
pub mod fee;
pub mod nft_name;
