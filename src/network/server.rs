use crate::core::{
    hash_block, Block, ConsensusResolver, Ledger, ProofOfWork, Transaction,
};
use crate::error::{LedgerError, Result};
use crate::network::client::fetch_chain;
use crate::network::PeerRegistry;
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Deserializer;
use std::io::BufReader;
use std::net::{Shutdown, SocketAddr, TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

const TCP_READ_TIMEOUT_SECS: u64 = 60;

// The reward transaction minted into every forged block
const REWARD_OWNER: &str = "0";
const REWARD_STAMP: &str = "Genesis Stamp";
const REWARD_YEAR: i64 = 0;
const REWARD_VALUE: u64 = 0;

/// Requests a client can send to a node. One JSON value per request.
#[derive(Debug, Serialize, Deserialize)]
pub enum Request {
    Mine,
    SubmitTransaction {
        owner: Option<String>,
        stamp: Option<String>,
        year: Option<i64>,
        value: Option<u64>,
    },
    GetChain,
    GetChainLength,
    RegisterNodes {
        nodes: Vec<String>,
    },
    ListNodes,
    Resolve,
}

/// Responses a node sends back, one per request.
#[derive(Debug, Serialize, Deserialize)]
pub enum Response {
    BlockForged {
        message: String,
        index: u64,
        transactions: Vec<Transaction>,
        proof: u64,
        previous_hash: String,
    },
    TransactionAccepted {
        message: String,
        block_index: u64,
    },
    Chain {
        chain: Vec<Block>,
        length: usize,
    },
    ChainLength {
        length: usize,
    },
    NodesRegistered {
        message: String,
        total_nodes: Vec<String>,
    },
    Nodes {
        nodes: Vec<String>,
    },
    Resolved {
        message: String,
        replaced: bool,
        chain: Vec<Block>,
    },
    Error {
        message: String,
    },
}

/// Request server exposing the ledger operations over JSON-over-TCP.
///
/// The ledger is the single shared mutable resource; every operation that
/// touches it takes the mutex for its whole duration, including the
/// proof-of-work search during mining. Peer chain fetches happen outside
/// the lock so the core never blocks on the network.
pub struct Server {
    ledger: Arc<Mutex<Ledger>>,
    peers: Arc<PeerRegistry>,
}

impl Server {
    pub fn new(ledger: Ledger) -> Self {
        Self {
            ledger: Arc::new(Mutex::new(ledger)),
            peers: Arc::new(PeerRegistry::new()),
        }
    }

    /// Run the server, accepting connections until the process exits.
    pub fn run(&self, addr: &str) -> Result<()> {
        let listener = TcpListener::bind(addr)
            .map_err(|e| LedgerError::Network(format!("Failed to bind to {addr}: {e}")))?;

        info!("Node listening on {addr}");

        for stream in listener.incoming() {
            match stream {
                Ok(stream) => {
                    let peer_addr = match stream.peer_addr() {
                        Ok(addr) => addr,
                        Err(e) => {
                            error!("Failed to get peer address: {e}");
                            continue;
                        }
                    };

                    let ledger = Arc::clone(&self.ledger);
                    let peers = Arc::clone(&self.peers);

                    thread::spawn(move || {
                        if let Err(e) = Self::handle_connection(ledger, peers, stream, peer_addr) {
                            error!("Error handling connection from {peer_addr}: {e}");
                        }
                    });
                }
                Err(e) => {
                    error!("Error accepting connection: {e}");
                }
            }
        }

        Ok(())
    }

    /// Handle an individual connection: one response per request, until the
    /// client hangs up.
    fn handle_connection(
        ledger: Arc<Mutex<Ledger>>,
        peers: Arc<PeerRegistry>,
        stream: TcpStream,
        peer_addr: SocketAddr,
    ) -> Result<()> {
        stream
            .set_read_timeout(Some(Duration::from_secs(TCP_READ_TIMEOUT_SECS)))
            .map_err(|e| LedgerError::Network(format!("Failed to set read timeout: {e}")))?;

        let reader = BufReader::new(&stream);
        let request_reader = Deserializer::from_reader(reader).into_iter::<Request>();

        for request in request_reader {
            let request = request
                .map_err(|e| LedgerError::Network(format!("Failed to deserialize request: {e}")))?;

            info!("Received request from {peer_addr}: {request:?}");

            // No error is swallowed: a failed operation is reported back to
            // the caller that issued it
            let response = match Self::process_request(&ledger, &peers, request) {
                Ok(response) => response,
                Err(e) => Response::Error {
                    message: e.to_string(),
                },
            };

            serde_json::to_writer(&stream, &response)
                .map_err(|e| LedgerError::Network(format!("Failed to send response: {e}")))?;
        }

        let _ = stream.shutdown(Shutdown::Both);
        Ok(())
    }

    /// Dispatch a request to the matching operation handler.
    fn process_request(
        ledger: &Arc<Mutex<Ledger>>,
        peers: &Arc<PeerRegistry>,
        request: Request,
    ) -> Result<Response> {
        match request {
            Request::Mine => Self::handle_mine(ledger),
            Request::SubmitTransaction {
                owner,
                stamp,
                year,
                value,
            } => Self::handle_submit_transaction(ledger, owner, stamp, year, value),
            Request::GetChain => Self::handle_get_chain(ledger),
            Request::GetChainLength => Self::handle_get_chain_length(ledger),
            Request::RegisterNodes { nodes } => Self::handle_register_nodes(peers, nodes),
            Request::ListNodes => Self::handle_list_nodes(peers),
            Request::Resolve => Self::handle_resolve(ledger, peers),
        }
    }

    /// Forge a new block: run the proof-of-work search against the last
    /// block's proof, mint the reward transaction, then seal and append.
    ///
    /// The whole sequence holds the ledger mutex, so a transaction submitted
    /// mid-mine queues either before or after the seal-and-clear step.
    fn handle_mine(ledger: &Arc<Mutex<Ledger>>) -> Result<Response> {
        let mut ledger = ledger
            .lock()
            .expect("Failed to acquire ledger lock - this should never happen");

        let last_block = ledger.last_block();
        let last_proof = last_block.get_proof();
        let previous_hash = hash_block(last_block)?;

        let proof = ProofOfWork::new(last_proof).run();

        ledger.new_transaction(Transaction::new(
            REWARD_OWNER.to_string(),
            REWARD_STAMP.to_string(),
            REWARD_YEAR,
            REWARD_VALUE,
        ));

        let block = ledger.new_block(proof, Some(previous_hash))?;
        info!("New block forged at index {}", block.get_index());

        Ok(Response::BlockForged {
            message: "New Block Forged".to_string(),
            index: block.get_index(),
            transactions: block.get_transactions().to_vec(),
            proof: block.get_proof(),
            previous_hash: block.get_previous_hash().to_string(),
        })
    }

    /// Queue a submitted transaction. A missing field rejects the
    /// submission and leaves the pending pool unchanged.
    fn handle_submit_transaction(
        ledger: &Arc<Mutex<Ledger>>,
        owner: Option<String>,
        stamp: Option<String>,
        year: Option<i64>,
        value: Option<u64>,
    ) -> Result<Response> {
        let transaction = Transaction::from_parts(owner, stamp, year, value)?;

        let mut ledger = ledger
            .lock()
            .expect("Failed to acquire ledger lock - this should never happen");
        let block_index = ledger.new_transaction(transaction);

        Ok(Response::TransactionAccepted {
            message: format!("Stamp Transaction will be added to Block {block_index}"),
            block_index,
        })
    }

    fn handle_get_chain(ledger: &Arc<Mutex<Ledger>>) -> Result<Response> {
        let ledger = ledger
            .lock()
            .expect("Failed to acquire ledger lock - this should never happen");

        Ok(Response::Chain {
            chain: ledger.chain().to_vec(),
            length: ledger.len(),
        })
    }

    fn handle_get_chain_length(ledger: &Arc<Mutex<Ledger>>) -> Result<Response> {
        let ledger = ledger
            .lock()
            .expect("Failed to acquire ledger lock - this should never happen");

        Ok(Response::ChainLength {
            length: ledger.len(),
        })
    }

    fn handle_register_nodes(peers: &Arc<PeerRegistry>, nodes: Vec<String>) -> Result<Response> {
        if nodes.is_empty() {
            return Err(LedgerError::Network(
                "Please supply a valid list of nodes".to_string(),
            ));
        }

        for node in &nodes {
            peers.register(node);
            info!("Registered peer node {node}");
        }

        Ok(Response::NodesRegistered {
            message: "New nodes have been added".to_string(),
            total_nodes: peers.get_peers(),
        })
    }

    fn handle_list_nodes(peers: &Arc<PeerRegistry>) -> Result<Response> {
        Ok(Response::Nodes {
            nodes: peers.get_peers(),
        })
    }

    /// Fetch every registered peer's chain, then run the longest-valid-chain
    /// rule over the candidates that arrived intact.
    ///
    /// An unreachable peer or a malformed chain is skipped; one bad peer
    /// never prevents evaluating the others.
    fn handle_resolve(
        ledger: &Arc<Mutex<Ledger>>,
        peers: &Arc<PeerRegistry>,
    ) -> Result<Response> {
        let mut candidates = Vec::new();
        for peer in peers.get_peers() {
            match fetch_chain(&peer) {
                Ok(chain) => candidates.push(chain),
                Err(e) => warn!("Skipping peer {peer}: {e}"),
            }
        }

        let mut ledger = ledger
            .lock()
            .expect("Failed to acquire ledger lock - this should never happen");
        let outcome = ConsensusResolver::resolve(&mut ledger, candidates);

        let message = if outcome.replaced() {
            "Our chain was replaced".to_string()
        } else {
            "Our chain is authoritative".to_string()
        };

        Ok(Response::Resolved {
            message,
            replaced: outcome.replaced(),
            chain: ledger.chain().to_vec(),
        })
    }
}
