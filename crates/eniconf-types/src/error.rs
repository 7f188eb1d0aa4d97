use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("unknown ip stack: {0} (expected ipv4, ipv6 or dual)")]
    UnknownIpStack(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnknownIpStack("ipx".to_string());
        assert_eq!(
            err.to_string(),
            "unknown ip stack: ipx (expected ipv4, ipv6 or dual)"
        );
    }
}
