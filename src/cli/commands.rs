use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "stamp-ledger")]
pub struct Opt {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(name = "startnode", about = "Start a ledger node")]
    StartNode {
        #[arg(long, help = "Address to listen on (overrides NODE_ADDRESS)")]
        addr: Option<String>,
    },
    #[command(name = "mine", about = "Forge a new block on a running node")]
    Mine {
        #[arg(long, help = "Address of the node to contact")]
        node: Option<String>,
    },
    #[command(name = "submit", about = "Submit a stamp transaction")]
    Submit {
        #[arg(help = "Owner of the stamp")]
        owner: String,
        #[arg(help = "Stamp details")]
        stamp: String,
        #[arg(help = "Year of the stamp")]
        year: i64,
        #[arg(help = "Value of the stamp")]
        value: u64,
        #[arg(long, help = "Address of the node to contact")]
        node: Option<String>,
    },
    #[command(name = "printchain", about = "Print all blocks in the chain")]
    Printchain {
        #[arg(long, help = "Address of the node to contact")]
        node: Option<String>,
    },
    #[command(name = "chainlength", about = "Print the chain length")]
    ChainLength {
        #[arg(long, help = "Address of the node to contact")]
        node: Option<String>,
    },
    #[command(name = "registernode", about = "Register peer nodes")]
    RegisterNode {
        #[arg(help = "Peer addresses to register", required = true)]
        peers: Vec<String>,
        #[arg(long, help = "Address of the node to contact")]
        node: Option<String>,
    },
    #[command(name = "listnodes", about = "List registered peer nodes")]
    ListNodes {
        #[arg(long, help = "Address of the node to contact")]
        node: Option<String>,
    },
    #[command(name = "resolve", about = "Resolve conflicts against peer chains")]
    Resolve {
        #[arg(long, help = "Address of the node to contact")]
        node: Option<String>,
    },
}
