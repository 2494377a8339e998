use crate::core::Block;
use crate::error::{LedgerError, Result};
use crate::network::server::{Request, Response};
use log::info;
use serde_json::Deserializer;
use std::io::{BufReader, Write};
use std::net::{SocketAddr, TcpStream};
use std::time::Duration;

const TCP_CONNECT_TIMEOUT_MILLIS: u64 = 5000;
const TCP_IO_TIMEOUT_MILLIS: u64 = 5000;

/// Send one request to a node and read back its response.
pub fn send_request(addr: &str, request: &Request) -> Result<Response> {
    let socket_addr = addr
        .parse::<SocketAddr>()
        .map_err(|e| LedgerError::Network(format!("Invalid address {addr}: {e}")))?;

    let mut stream =
        TcpStream::connect_timeout(&socket_addr, Duration::from_millis(TCP_CONNECT_TIMEOUT_MILLIS))
            .map_err(|e| LedgerError::UnreachablePeer(format!("{addr}: {e}")))?;

    stream
        .set_write_timeout(Some(Duration::from_millis(TCP_IO_TIMEOUT_MILLIS)))
        .map_err(|e| LedgerError::Network(format!("Failed to set write timeout: {e}")))?;
    stream
        .set_read_timeout(Some(Duration::from_millis(TCP_IO_TIMEOUT_MILLIS)))
        .map_err(|e| LedgerError::Network(format!("Failed to set read timeout: {e}")))?;

    info!("Sending request to {addr}: {request:?}");

    serde_json::to_writer(&stream, request)
        .map_err(|e| LedgerError::Network(format!("Failed to send request: {e}")))?;
    stream
        .flush()
        .map_err(|e| LedgerError::Network(format!("Failed to flush request: {e}")))?;

    let reader = BufReader::new(&stream);
    let mut responses = Deserializer::from_reader(reader).into_iter::<Response>();
    match responses.next() {
        Some(Ok(response)) => Ok(response),
        Some(Err(e)) => Err(LedgerError::Network(format!(
            "Failed to read response from {addr}: {e}"
        ))),
        None => Err(LedgerError::Network(format!(
            "Connection to {addr} closed before a response arrived"
        ))),
    }
}

/// Fetch a peer's full chain for consensus resolution.
///
/// Connection failures surface as `UnreachablePeer` and anything else that
/// is not a well-formed chain as `Network`; the resolve flow skips either
/// kind without aborting the remaining peers.
pub fn fetch_chain(addr: &str) -> Result<Vec<Block>> {
    match send_request(addr, &Request::GetChain)? {
        Response::Chain { chain, length } => {
            if chain.len() != length {
                return Err(LedgerError::Network(format!(
                    "Peer {addr} reported length {length} for a chain of {} blocks",
                    chain.len()
                )));
            }
            Ok(chain)
        }
        Response::Error { message } => Err(LedgerError::Network(format!(
            "Peer {addr} returned an error: {message}"
        ))),
        other => Err(LedgerError::Network(format!(
            "Unexpected response from {addr}: {other:?}"
        ))),
    }
}
