//! Single page HTTP file server.
//!
//! On startup the server makes sure its working files exist (`config.ini`,
//! `readme.txt`, `index.html`), creating every missing one with default
//! content, reads the bind address and port from `config.ini` and then
//! serves the current bytes of `index.html` to every request until the
//! operator stops it. The accept loop runs on a single background thread and
//! handles connections one at a time; shutdown latches a stop signal, forces
//! the blocked accept to return and joins the loop thread before the
//! listener is released.

pub mod bootstrap;
pub mod error;
pub mod logger;
pub mod server;
pub mod static_files;
