//! Gateway for every call the console makes to the remote API

mod client;
mod envelope;
mod request;

pub use client::*;
pub use envelope::*;
pub use request::*;
