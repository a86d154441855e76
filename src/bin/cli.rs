//! raftcmd CLI
//!
//! Encode, decode and inspect replicated-log command entries.

use std::io::{self, Read};
use std::path::PathBuf;
use std::time::Duration;

use clap::{Args as ClapArgs, Parser, Subcommand};
use raftcmd::protocol::DatabasePayload;
use raftcmd::stream::{EntryReader, EntryWriter};
use raftcmd::{Codec, Command, Config};
use tracing_subscriber::{fmt, EnvFilter};

/// raftcmd CLI
#[derive(Parser, Debug)]
#[command(name = "raftcmd-cli")]
#[command(about = "Encode and decode replicated-log command entries")]
#[command(version)]
struct Args {
    /// Largest entry accepted, in bytes
    #[arg(long, default_value_t = raftcmd::config::DEFAULT_MAX_ENTRY_SIZE)]
    max_entry_size: usize,

    /// Skip CRC32 verification when reading framed files
    #[arg(long)]
    no_verify: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build a command and print its encoded entry
    Encode {
        /// Append the entry as a frame to this file instead of printing it
        #[arg(short, long)]
        out: Option<PathBuf>,

        #[command(subcommand)]
        command: EncodeCommand,
    },

    /// Decode an entry given as an argument or on stdin
    Decode {
        /// Entry JSON; read from stdin when omitted
        entry: Option<String>,
    },

    /// Decode every entry in a framed file
    Dump {
        /// Framed entry file
        file: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
enum EncodeCommand {
    /// Statements that modify the database
    Execute(DatabaseArgs),

    /// Read-only statements
    Query(DatabaseArgs),

    /// Set metadata for a raft node
    MetadataSet {
        raft_id: String,

        /// Metadata entries as key=value
        #[arg(value_parser = parse_key_value)]
        data: Vec<(String, String)>,
    },

    /// Delete metadata
    MetadataDelete { id: String },

    /// Open a connection
    Connect {
        conn_id: u64,

        #[arg(long, default_value_t = 0)]
        idle_timeout_ms: u64,

        #[arg(long, default_value_t = 0)]
        tx_timeout_ms: u64,
    },

    /// Close a connection
    Disconnect { conn_id: u64 },
}

#[derive(ClapArgs, Debug)]
struct DatabaseArgs {
    #[arg(long, default_value_t = 0)]
    conn_id: u64,

    /// Run all statements in one transaction
    #[arg(long)]
    atomic: bool,

    /// Collect statement timings
    #[arg(long)]
    timings: bool,

    /// SQL statements
    queries: Vec<String>,
}

impl DatabaseArgs {
    fn into_payload(self) -> DatabasePayload {
        let payload = if self.queries.is_empty() {
            DatabasePayload::default()
        } else {
            DatabasePayload::new(self.queries)
        };
        payload
            .with_connection_id(self.conn_id)
            .with_atomic(self.atomic)
            .with_timings(self.timings)
    }
}

impl EncodeCommand {
    fn into_command(self) -> Command {
        match self {
            EncodeCommand::Execute(args) => Command::execute(args.into_payload()),
            EncodeCommand::Query(args) => Command::query(args.into_payload()),
            EncodeCommand::MetadataSet { raft_id, data } => Command::metadata_set(raft_id, data),
            EncodeCommand::MetadataDelete { id } => Command::metadata_delete(id),
            EncodeCommand::Connect {
                conn_id,
                idle_timeout_ms,
                tx_timeout_ms,
            } => Command::connect(
                conn_id,
                Duration::from_millis(idle_timeout_ms),
                Duration::from_millis(tx_timeout_ms),
            ),
            EncodeCommand::Disconnect { conn_id } => Command::disconnect(conn_id),
        }
    }
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid key=value: no `=` found in `{}`", s))?;
    Ok((key.to_string(), value.to_string()))
}

fn main() {
    // Logs go to stderr so encoded output stays clean
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> raftcmd::Result<()> {
    let config = Config::builder()
        .max_entry_size(args.max_entry_size)
        .verify_checksums(!args.no_verify)
        .build()?;
    let codec = Codec::new(config)?;

    match args.command {
        Commands::Encode { out, command } => {
            let command = command.into_command();
            match out {
                Some(path) => {
                    let mut writer = EntryWriter::open(&path, codec)?;
                    writer.append(&command)?;
                    writer.flush()?;
                    tracing::info!(tag = %command.tag(), path = %path.display(), "appended entry");
                }
                None => {
                    let bytes = codec.encode(&command)?;
                    println!("{}", String::from_utf8_lossy(&bytes));
                }
            }
        }
        Commands::Decode { entry } => {
            let bytes = match entry {
                Some(entry) => entry.into_bytes(),
                None => {
                    let mut buf = Vec::new();
                    io::stdin().read_to_end(&mut buf)?;
                    buf
                }
            };
            let command = codec.decode(&bytes)?;
            println!("{:#?}", command);
        }
        Commands::Dump { file } => {
            let mut reader = EntryReader::open(&file, codec)?;
            for command in reader.by_ref() {
                let command = command?;
                println!("{:?}", command);
            }
            tracing::info!(entries = reader.entries_read(), "dump complete");
        }
    }
    Ok(())
}
