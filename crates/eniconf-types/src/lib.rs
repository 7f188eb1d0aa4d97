//! Data types shared across the eniconf crates.
//!
//! [`Eni`] is the resolved configuration of one elastic network interface.
//! [`IpSet`] and [`IpNetSet`] pair an IPv4 value with an optional IPv6 one,
//! and [`IpFamily`] says which of the two the host is configured for.

pub mod eni;
pub mod error;
pub mod family;

pub use eni::{Eni, IpNetSet, IpSet};
pub use error::Error;
pub use family::IpFamily;

pub type Result<T> = std::result::Result<T, Error>;
