// This is the main entry point for the ledger CLI application
// `startnode` runs a node in the foreground; every other command connects
// to a running node over its request protocol and prints the reply.
use clap::Parser;
use log::{error, LevelFilter};
use stamp_ledger::{
    send_request, Command, Ledger, Opt, Request, Response, Server, GLOBAL_CONFIG,
};
use std::process;

fn main() {
    env_logger::builder().filter_level(LevelFilter::Info).init();

    let opt = Opt::parse();

    if let Err(e) = run_command(opt.command) {
        error!("Error: {e}");
        process::exit(1);
    }
}

fn run_command(command: Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        // Start a node: fresh ledger with only the genesis block, serving
        // the request protocol until the process exits
        Command::StartNode { addr } => {
            if let Some(addr) = addr {
                GLOBAL_CONFIG.set_node_addr(addr);
            }
            let node_addr = GLOBAL_CONFIG.get_node_addr();
            println!(
                "Starting node {} on {node_addr}",
                GLOBAL_CONFIG.get_node_id()
            );

            let ledger = Ledger::new()?;
            let server = Server::new(ledger);
            server
                .run(&node_addr)
                .map_err(|e| format!("Server error: {e}"))?
        }
        Command::Mine { node } => {
            match send_request(&node_or_default(node), &Request::Mine)? {
                Response::BlockForged {
                    message,
                    index,
                    transactions,
                    proof,
                    previous_hash,
                } => {
                    println!("{message}");
                    println!("Index: {index}");
                    println!("Proof: {proof}");
                    println!("Previous hash: {previous_hash}");
                    for tx in transactions {
                        println!(
                            "- {} transfers '{}' ({}) valued {}",
                            tx.get_owner(),
                            tx.get_stamp(),
                            tx.get_year(),
                            tx.get_value()
                        );
                    }
                }
                other => return Err(unexpected(other)),
            }
        }
        Command::Submit {
            owner,
            stamp,
            year,
            value,
            node,
        } => {
            let request = Request::SubmitTransaction {
                owner: Some(owner),
                stamp: Some(stamp),
                year: Some(year),
                value: Some(value),
            };
            match send_request(&node_or_default(node), &request)? {
                Response::TransactionAccepted { message, .. } => println!("{message}"),
                other => return Err(unexpected(other)),
            }
        }
        Command::Printchain { node } => {
            match send_request(&node_or_default(node), &Request::GetChain)? {
                Response::Chain { chain, length } => {
                    for block in &chain {
                        println!("Index: {}", block.get_index());
                        println!("Timestamp: {}", block.get_timestamp());
                        println!("Proof: {}", block.get_proof());
                        println!("Previous hash: {}", block.get_previous_hash());
                        for tx in block.get_transactions() {
                            println!(
                                "- {} transfers '{}' ({}) valued {}",
                                tx.get_owner(),
                                tx.get_stamp(),
                                tx.get_year(),
                                tx.get_value()
                            );
                        }
                        println!()
                    }
                    println!("Chain length: {length}");
                }
                other => return Err(unexpected(other)),
            }
        }
        Command::ChainLength { node } => {
            match send_request(&node_or_default(node), &Request::GetChainLength)? {
                Response::ChainLength { length } => println!("Chain length: {length}"),
                other => return Err(unexpected(other)),
            }
        }
        Command::RegisterNode { peers, node } => {
            let request = Request::RegisterNodes { nodes: peers };
            match send_request(&node_or_default(node), &request)? {
                Response::NodesRegistered {
                    message,
                    total_nodes,
                } => {
                    println!("{message}");
                    for peer in total_nodes {
                        println!("- {peer}")
                    }
                }
                other => return Err(unexpected(other)),
            }
        }
        Command::ListNodes { node } => {
            match send_request(&node_or_default(node), &Request::ListNodes)? {
                Response::Nodes { nodes } => {
                    for peer in nodes {
                        println!("{peer}")
                    }
                }
                other => return Err(unexpected(other)),
            }
        }
        Command::Resolve { node } => {
            match send_request(&node_or_default(node), &Request::Resolve)? {
                Response::Resolved {
                    message,
                    replaced: _,
                    chain,
                } => {
                    println!("{message}");
                    println!("Chain length: {}", chain.len());
                }
                other => return Err(unexpected(other)),
            }
        }
    }
    Ok(())
}

fn node_or_default(node: Option<String>) -> String {
    node.unwrap_or_else(|| GLOBAL_CONFIG.get_node_addr())
}

fn unexpected(response: Response) -> Box<dyn std::error::Error> {
    match response {
        Response::Error { message } => message.into(),
        other => format!("Unexpected response: {other:?}").into(),
    }
}
