use std::net::SocketAddr;

use crate::config;

/// Errors that stop the exporter from starting or serving.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] config::Error),
    #[error("failed to register collector: {0}")]
    Register(#[from] prometheus::Error),
    #[error("failed to bind listener on `{addr}`: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serve metrics: {0}")]
    Serve(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

pub trait ResultOkLogExt<T, E> {
    /// Converts into an `Option`, logging the error at `level` if there is one.
    fn ok_log(self, level: log::Level) -> Option<T>;
}

impl<T, E> ResultOkLogExt<T, E> for std::result::Result<T, E>
where
    E: std::error::Error,
{
    fn ok_log(self, level: log::Level) -> Option<T> {
        match self {
            Ok(ok) => Some(ok),
            Err(err) => {
                log::log!(level, "{err}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_log() {
        let ok: std::result::Result<u8, std::fmt::Error> = Ok(7);
        assert_eq!(ok.ok_log(log::Level::Debug), Some(7));

        let err: std::result::Result<u8, std::fmt::Error> = Err(std::fmt::Error);
        assert_eq!(err.ok_log(log::Level::Debug), None);
    }
}
