//! Startup configuration read from environment variables.
//!
//! | Variable              | Default                 |
//! |-----------------------|-------------------------|
//! | `LISTEN_ADDR`         | `0.0.0.0:9417`          |
//! | `CGROUP_MEMORY_MOUNT` | `/sys/fs/cgroup/memory` |

use std::ffi::OsString;
use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;

use crate::cgroup::DEFAULT_MEMORY_MOUNT;

pub const LISTEN_ADDR_VAR: &str = "LISTEN_ADDR";
pub const MEMORY_MOUNT_VAR: &str = "CGROUP_MEMORY_MOUNT";
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:9417";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("environment variable `{var}` is not valid unicode")]
    NotUnicode { var: &'static str },
    #[error("invalid socket address `{value}` in `{var}`: {source}")]
    InvalidListenAddr {
        var: &'static str,
        value: String,
        #[source]
        source: AddrParseError,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Address the HTTP server binds to.
    pub listen_addr: SocketAddr,
    /// Mount point of the cgroup v1 memory controller.
    pub memory_mount: PathBuf,
}

impl Config {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidListenAddr`] if `LISTEN_ADDR` is set to something
    /// that is not a socket address, and [`Error::NotUnicode`] if it is not
    /// valid unicode.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|var| std::env::var_os(var))
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<OsString>) -> Result<Self> {
        let listen_addr = match lookup(LISTEN_ADDR_VAR) {
            Some(value) => value
                .into_string()
                .map_err(|_| Error::NotUnicode {
                    var: LISTEN_ADDR_VAR,
                })?,
            None => DEFAULT_LISTEN_ADDR.to_owned(),
        };
        let listen_addr = listen_addr
            .parse()
            .map_err(|source| Error::InvalidListenAddr {
                var: LISTEN_ADDR_VAR,
                value: listen_addr.clone(),
                source,
            })?;

        let memory_mount = lookup(MEMORY_MOUNT_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MEMORY_MOUNT));

        Ok(Self {
            listen_addr,
            memory_mount,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, OsString> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), OsString::from(value)))
            .collect();
        Config::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.listen_addr, "0.0.0.0:9417".parse::<SocketAddr>().unwrap());
        assert_eq!(config.memory_mount, PathBuf::from("/sys/fs/cgroup/memory"));
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("LISTEN_ADDR", "127.0.0.1:9000"),
            ("CGROUP_MEMORY_MOUNT", "/rootfs/sys/fs/cgroup/memory"),
        ])
        .unwrap();
        assert_eq!(config.listen_addr, "127.0.0.1:9000".parse::<SocketAddr>().unwrap());
        assert_eq!(
            config.memory_mount,
            PathBuf::from("/rootfs/sys/fs/cgroup/memory")
        );
    }

    #[test]
    fn test_invalid_listen_addr() {
        let err = config_from(&[("LISTEN_ADDR", "not-an-address")]).unwrap_err();
        match err {
            Error::InvalidListenAddr { var, value, .. } => {
                assert_eq!(var, "LISTEN_ADDR");
                assert_eq!(value, "not-an-address");
            }
            _ => panic!("Expected InvalidListenAddr error"),
        }
    }
}
