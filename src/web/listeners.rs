use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::SocketAddr;
use tokio::net::TcpListener;

// Pending-connection queue length passed to listen(2).
const LISTEN_BACKLOG: i32 = 1024;

/// Binds the server socket for the configured host and port.
///
/// A host of `*` listens on all interfaces, preferring a single IPv6
/// dual-stack socket and falling back to plain IPv4 where IPv6 is
/// unavailable. Any other host is bound verbatim.
pub async fn create_listener(host: &str, port: u16) -> io::Result<(String, TcpListener)> {
    if host == "*" {
        return bind_wildcard(port);
    }

    let addr = format!("{}:{}", host, port);
    tracing::info!("Binding imgstash-server to {}...", addr);
    let listener = TcpListener::bind(&addr).await?;
    Ok((addr, listener))
}

fn bind_wildcard(port: u16) -> io::Result<(String, TcpListener)> {
    match bind_socket(Domain::IPV6, format!("[::]:{}", port)) {
        Ok(bound) => Ok(bound),
        Err(e) => {
            tracing::warn!(
                "IPv6 dual-stack bind failed ({}), falling back to IPv4 only",
                e
            );
            bind_socket(Domain::IPV4, format!("0.0.0.0:{}", port))
        }
    }
}

fn bind_socket(domain: Domain, str_addr: String) -> io::Result<(String, TcpListener)> {
    let addr: SocketAddr = str_addr
        .parse()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    tracing::info!("Binding imgstash-server to {}...", str_addr);

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;
    if domain == Domain::IPV6 {
        // Dual-stack, so the one socket also serves IPv4-mapped peers.
        // Some platforms refuse; the socket still works v6-only then.
        if let Err(e) = socket.set_only_v6(false) {
            tracing::warn!("Could not enable dual-stack mode: {}", e);
        }
    }
    socket.set_reuse_address(true)?;
    socket.bind(&addr.into())?;
    socket.listen(LISTEN_BACKLOG)?;

    // Tokio requires the socket in non-blocking mode before adoption.
    socket.set_nonblocking(true)?;
    let listener = TcpListener::from_std(socket.into())?;

    Ok((str_addr, listener))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binds_named_host_on_ephemeral_port() {
        let (addr, listener) =
            tokio_test::block_on(create_listener("127.0.0.1", 0)).unwrap();
        assert!(addr.starts_with("127.0.0.1:"));
        assert_ne!(listener.local_addr().unwrap().port(), 0);
    }

    #[test]
    fn binds_all_interfaces_for_wildcard_host() {
        let (_addr, listener) = tokio_test::block_on(create_listener("*", 0)).unwrap();
        assert_ne!(listener.local_addr().unwrap().port(), 0);
    }
}
