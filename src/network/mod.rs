//! Node-to-node networking
//!
//! This module handles communication between ledger nodes: the request
//! server exposing the ledger operations, the client used to drive a node
//! and to fetch peer chains, and the registry of known peers.

pub mod client;
pub mod peers;
pub mod server;

pub use client::{fetch_chain, send_request};
pub use peers::PeerRegistry;
pub use server::{Request, Response, Server};
