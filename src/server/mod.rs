pub mod config;
pub mod request_handler;

use log::{debug, error, info, warn};
use std::net::{SocketAddr, TcpListener};
use std::os::fd::AsRawFd;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};

use crate::error::StartupError;
use config::ServerConfig;

/// Latched flag shared between the control thread and the accept loop. Once
/// set it stays set; there is no way to clear it.
#[derive(Debug, Clone)]
pub struct StopSignal {
    stopped: Arc<AtomicBool>,
}

impl StopSignal {
    pub fn new() -> Self {
        Self {
            stopped: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn set(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    pub fn is_set(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

impl Default for StopSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Lifecycle of the listener. Transitions only move forward; there is no way
/// back to `Listening`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ServerState {
    Listening,
    Stopping,
    Closed,
}

pub struct HttpServer {
    listener: Arc<TcpListener>,
    local_addr: SocketAddr,
    stop_signal: StopSignal,
    accept_thread: Option<JoinHandle<()>>,
    state: ServerState,
}

impl HttpServer {
    /// Binds the configured address and starts listening. The accept loop is
    /// not running yet; call [`serve`](Self::serve) to launch it.
    pub fn bind(config: &ServerConfig) -> Result<Self, StartupError> {
        let addr = config.bind_addr();
        let listener = TcpListener::bind(&addr).map_err(|source| StartupError::Bind {
            addr: addr.clone(),
            source,
        })?;
        let local_addr = listener
            .local_addr()
            .map_err(|source| StartupError::Bind { addr, source })?;

        info!("Server started on {}", local_addr);

        Ok(Self {
            listener: Arc::new(listener),
            local_addr,
            stop_signal: StopSignal::new(),
            accept_thread: None,
            state: ServerState::Listening,
        })
    }

    /// Launches the accept loop on its own thread. Connections are handled
    /// one at a time, in acceptance order, on that single thread; clients
    /// that arrive while one is being served wait in the listen backlog.
    pub fn serve(&mut self, content_path: PathBuf) {
        if self.state != ServerState::Listening {
            warn!("Serve requested but server is {:?}", self.state);
            return;
        }
        if self.accept_thread.is_some() {
            warn!("Serve requested twice, the accept loop is already running");
            return;
        }

        info!("Serving {:?} on every request", content_path);

        let listener = Arc::clone(&self.listener);
        let stop_signal = self.stop_signal.clone();

        let handle = thread::Builder::new()
            .name("accept-loop".to_string())
            .spawn(move || accept_loop(listener, content_path, stop_signal))
            .expect("failed to spawn accept loop thread");

        self.accept_thread = Some(handle);
    }

    /// Requests shutdown: latches the stop signal, then shuts the listening
    /// socket down so a blocked accept in the loop thread returns. Safe to
    /// call any number of times and at any point of the lifecycle.
    pub fn stop(&mut self) {
        match self.state {
            ServerState::Listening => {
                info!("Stopping server on {}", self.local_addr);
                self.state = ServerState::Stopping;
                self.stop_signal.set();

                // The signal alone cannot interrupt a blocked accept;
                // shutdown(2) on the listening socket is what unblocks it.
                let ret = unsafe { libc::shutdown(self.listener.as_raw_fd(), libc::SHUT_RDWR) };
                if ret != 0 {
                    debug!(
                        "shutdown on the listener returned: {}",
                        std::io::Error::last_os_error()
                    );
                }
            }
            ServerState::Stopping | ServerState::Closed => {
                debug!("Stop requested but server is already {:?}", self.state);
            }
        }
    }

    /// Waits for the accept loop to finish. Once this returns no request is
    /// mid-flight and no further connection will be accepted. Idempotent;
    /// normally called right after [`stop`](Self::stop).
    pub fn join(&mut self) {
        if let Some(handle) = self.accept_thread.take() {
            debug!("Waiting for the accept loop to finish");
            if handle.join().is_err() {
                error!("Accept loop thread panicked");
            }
        }

        if self.state != ServerState::Closed {
            self.state = ServerState::Closed;
            info!("Server on {} closed", self.local_addr);
        }
    }

    /// Address the listener actually bound, useful when the configured port
    /// is 0 and the OS picked one.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn state(&self) -> ServerState {
        self.state
    }
}

impl Drop for HttpServer {
    fn drop(&mut self) {
        self.stop();
        self.join();
    }
}

fn accept_loop(listener: Arc<TcpListener>, content_path: PathBuf, stop_signal: StopSignal) {
    loop {
        if stop_signal.is_set() {
            debug!("Stop signal observed, leaving the accept loop");
            break;
        }

        match listener.accept() {
            Ok((stream, addr)) => {
                debug!("Accepted connection from {}", addr);
                request_handler::handle_client(stream, &content_path);
            }
            // A failing accept while the stop signal is set is the normal
            // shutdown path: stop() took the listener down on purpose.
            Err(_) if stop_signal.is_set() => {
                info!("Listener shut down, leaving the accept loop");
                break;
            }
            Err(e) => {
                error!("Error accepting connection: {}", e);
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loopback_config() -> ServerConfig {
        // Port 0 lets the OS pick a free port, keeping tests collision-free.
        ServerConfig {
            address: "127.0.0.1".to_string(),
            port: 0,
        }
    }

    #[test]
    fn stop_signal_latches_and_is_shared() {
        let signal = StopSignal::new();
        let observer = signal.clone();
        assert!(!signal.is_set());
        assert!(!observer.is_set());

        signal.set();
        assert!(signal.is_set());
        assert!(observer.is_set());

        signal.set();
        assert!(observer.is_set());
    }

    #[test]
    fn bind_reports_the_listening_state_and_the_picked_port() {
        let server = HttpServer::bind(&loopback_config()).unwrap();
        assert_eq!(server.state(), ServerState::Listening);
        assert_eq!(server.local_addr().ip().to_string(), "127.0.0.1");
        assert_ne!(server.local_addr().port(), 0);
    }

    #[test]
    fn stop_and_join_work_without_serving() {
        let mut server = HttpServer::bind(&loopback_config()).unwrap();
        server.stop();
        assert_eq!(server.state(), ServerState::Stopping);
        server.join();
        assert_eq!(server.state(), ServerState::Closed);

        // Both stay safe after close.
        server.stop();
        server.join();
        assert_eq!(server.state(), ServerState::Closed);
    }

    #[test]
    fn serve_is_refused_once_stopping() {
        let mut server = HttpServer::bind(&loopback_config()).unwrap();
        server.stop();
        server.serve(std::path::PathBuf::from("index.html"));
        assert!(server.accept_thread.is_none());
        server.join();
    }
}
