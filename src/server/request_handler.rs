use log::{debug, error, info};
use std::fs;
use std::io::{Read, Write};
use std::net::TcpStream;
use std::path::Path;

use crate::static_files::html_content;

/// Answers one accepted connection. Every request gets the current bytes of
/// the content file with status 200, whatever its path or method; when the
/// file cannot be read the fixed fallback page is served instead, still with
/// status 200. Failures stay confined to this connection.
pub fn handle_client(mut stream: TcpStream, content_path: &Path) {
    let peer_addr = match stream.peer_addr() {
        Ok(addr) => addr.to_string(),
        Err(_) => "unknown".to_string(),
    };

    debug!("Handling request from {}", peer_addr);

    // The same page goes to every client, so the request is drained with a
    // single read and never parsed. A failed read still gets a response.
    let mut buffer = [0u8; 8192];
    if let Err(e) = stream.read(&mut buffer) {
        debug!("Error reading request from {}: {}", peer_addr, e);
    }

    let body = match fs::read(content_path) {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!(
                "Content file {:?} unavailable ({}), serving the fallback page",
                content_path, e
            );
            html_content::get_fallback_html().into_bytes()
        }
    };

    match send_response(&mut stream, &body) {
        Ok(()) => info!("Served page to {} ({} bytes)", peer_addr, body.len()),
        Err(e) => error!("Error sending response to {}: {}", peer_addr, e),
    }
}

fn send_response(stream: &mut TcpStream, body: &[u8]) -> std::io::Result<()> {
    let headers = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        body.len()
    );

    stream.write_all(headers.as_bytes())?;
    stream.write_all(body)?;
    stream.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Shutdown, SocketAddr, TcpListener};
    use std::path::PathBuf;
    use std::thread;
    use tempfile::TempDir;

    fn serve_one(content_path: PathBuf) -> (SocketAddr, thread::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().unwrap();
        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            handle_client(stream, &content_path);
        });
        (addr, handle)
    }

    fn roundtrip(addr: SocketAddr) -> String {
        let mut client = TcpStream::connect(addr).unwrap();
        client.write_all(b"GET / HTTP/1.1\r\n\r\n").unwrap();
        client.shutdown(Shutdown::Write).unwrap();
        let mut response = String::new();
        client.read_to_string(&mut response).unwrap();
        response
    }

    #[test]
    fn response_carries_the_exact_file_bytes() {
        let dir = TempDir::new().unwrap();
        let content_path = dir.path().join("index.html");
        fs::write(&content_path, "<p>hello</p>").unwrap();

        let (addr, handle) = serve_one(content_path);
        let response = roundtrip(addr);

        assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(response.contains("Content-Type: text/html\r\n"));
        assert!(response.contains("Content-Length: 12\r\n"));
        assert!(response.contains("Connection: close\r\n"));
        assert!(response.ends_with("\r\n\r\n<p>hello</p>"));
        handle.join().unwrap();
    }

    #[test]
    fn missing_content_file_gets_the_fallback_page() {
        let dir = TempDir::new().unwrap();
        let content_path = dir.path().join("index.html");

        let (addr, handle) = serve_one(content_path);
        let response = roundtrip(addr);

        let fallback = html_content::get_fallback_html();
        assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(response.contains(&format!("Content-Length: {}\r\n", fallback.len())));
        assert!(response.ends_with(&fallback));
        handle.join().unwrap();
    }
}
