//! IP family selection

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Address families enabled on the host.
///
/// Built once from configuration and handed to whoever needs to know
/// whether IPv6 attributes should be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpFamily {
    pub ipv4: bool,
    pub ipv6: bool,
}

impl Default for IpFamily {
    fn default() -> Self {
        Self::ipv4_only()
    }
}

impl IpFamily {
    pub fn ipv4_only() -> Self {
        Self {
            ipv4: true,
            ipv6: false,
        }
    }

    pub fn ipv6_only() -> Self {
        Self {
            ipv4: false,
            ipv6: true,
        }
    }

    pub fn dual_stack() -> Self {
        Self {
            ipv4: true,
            ipv6: true,
        }
    }

    /// Build from an ip stack name: `ipv4`, `ipv6` or `dual`.
    pub fn from_stack(stack: &str) -> crate::Result<Self> {
        match stack.trim().to_ascii_lowercase().as_str() {
            "" | "ipv4" => Ok(Self::ipv4_only()),
            "ipv6" => Ok(Self::ipv6_only()),
            "dual" => Ok(Self::dual_stack()),
            other => Err(Error::UnknownIpStack(other.to_string())),
        }
    }
}

impl FromStr for IpFamily {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_stack(s)
    }
}

impl fmt::Display for IpFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.ipv4, self.ipv6) {
            (true, true) => write!(f, "dual"),
            (false, true) => write!(f, "ipv6"),
            _ => write!(f, "ipv4"),
        }
    }
}
