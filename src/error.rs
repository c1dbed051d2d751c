use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal startup errors. Every variant aborts the process before any request
/// is served; once the accept loop runs, nothing produces these anymore.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("Cannot create default file {path:?}: {source}")]
    CreateDefault { path: PathBuf, source: io::Error },

    #[error("Cannot read config file {path:?}: {source}")]
    ReadConfig { path: PathBuf, source: io::Error },

    #[error("Cannot bind listener on {addr}: {source}")]
    Bind { addr: String, source: io::Error },
}
