use std::path::PathBuf;

use anyhow::bail;
use clap::{Parser, Subcommand};
use cuecast_core::{
    encode_message, parse_message, sanitize_address, CueConsole, CueStore, OscArg, SaveOutcome,
    StoreError,
};

/// OSC cue sender for show control over UDP.
#[derive(Parser, Debug)]
#[command(name = "cuecast")]
#[command(about = "Send Open Sound Control cues over UDP")]
struct Args {
    /// Path to the cue file (defaults to the cue document in the user
    /// documents folder)
    #[arg(long)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the cues in the saved cue file
    List,
    /// Load the cue file and send the cue with the given id
    Fire {
        /// Cue id as shown by `list`
        id: u32,
    },
    /// Send an ad-hoc message without touching the cue file
    Send {
        /// Raw cue message, e.g. '/cue/1 "hello world" 42'
        message: String,
        /// Destination IP address or host name (overrides the cue file)
        #[arg(long)]
        addr: Option<String>,
        /// Destination UDP port (overrides the cue file)
        #[arg(long)]
        port: Option<String>,
    },
    /// Append a cue to the cue file, creating the file if needed
    Add {
        /// Raw cue message
        message: String,
        /// Cue title shown by `list`
        #[arg(long, default_value = "")]
        title: String,
        /// Destination IP address to store (required for a new file)
        #[arg(long)]
        addr: Option<String>,
        /// Destination UDP port to store (required for a new file)
        #[arg(long)]
        port: Option<String>,
    },
    /// Show how a message parses and encodes without sending it
    Check {
        /// Raw cue message
        message: String,
    },
}

fn main() -> Result<(), anyhow::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let store = CueStore::new(args.file);
    log::debug!("Using cue file {}", store.path().display());

    match args.command {
        Command::List => list_cues(&store),
        Command::Fire { id } => fire_cue(store, id),
        Command::Send {
            message,
            addr,
            port,
        } => send_message(store, &message, addr, port),
        Command::Add {
            message,
            title,
            addr,
            port,
        } => add_cue(store, message, title, addr, port),
        Command::Check { message } => {
            check_message(&message);
            Ok(())
        }
    }
}

fn list_cues(store: &CueStore) -> Result<(), anyhow::Error> {
    let list = store.load()?;
    println!("Destination: {}:{}", list.ip_address, list.port);
    for cue in &list.cues {
        if cue.title.is_empty() {
            println!("{:>4}  {}", cue.id, cue.message);
        } else {
            println!("{:>4}  {}  [{}]", cue.id, cue.message, cue.title);
        }
    }
    Ok(())
}

fn fire_cue(store: CueStore, id: u32) -> Result<(), anyhow::Error> {
    let mut console = CueConsole::new(store)?;
    console.load_cues()?;
    console.fire_cue(id)?;
    println!("Fired cue {}", id);
    Ok(())
}

fn send_message(
    store: CueStore,
    message: &str,
    addr: Option<String>,
    port: Option<String>,
) -> Result<(), anyhow::Error> {
    let mut console = CueConsole::new(store)?;

    // Destination comes from the cue file unless both pieces are overridden.
    if let (Some(addr), Some(port)) = (addr.clone(), port.clone()) {
        console.cue_manager_mut().set_destination(addr, port);
    } else {
        match console.load_cues() {
            Ok(_) => {}
            Err(StoreError::NotFound(_)) => {
                bail!("No saved cue file; pass both --addr and --port")
            }
            Err(e) => return Err(e.into()),
        }
        if let Some(addr) = addr {
            let port = console.cue_manager().port().to_string();
            console.cue_manager_mut().set_destination(addr, port);
        }
        if let Some(port) = port {
            let addr = console.cue_manager().ip_address().to_string();
            console.cue_manager_mut().set_destination(addr, port);
        }
    }

    console.send_message(message)?;
    println!(
        "Sent to {}:{}",
        console.cue_manager().ip_address(),
        console.cue_manager().port()
    );
    Ok(())
}

fn add_cue(
    store: CueStore,
    message: String,
    title: String,
    addr: Option<String>,
    port: Option<String>,
) -> Result<(), anyhow::Error> {
    let mut console = CueConsole::new(store)?;

    match console.load_cues() {
        Ok(_) => {}
        Err(StoreError::NotFound(_)) => {
            let (Some(addr), Some(port)) = (addr.clone(), port.clone()) else {
                bail!("No saved cue file; pass --addr and --port to create one")
            };
            console.cue_manager_mut().set_destination(addr, port);
        }
        Err(e) => return Err(e.into()),
    }
    if let (Some(addr), Some(port)) = (addr, port) {
        console.cue_manager_mut().set_destination(addr, port);
    }

    let id = console.cue_manager_mut().add_row(title, message);
    match console.save_cues()? {
        SaveOutcome::Saved(path) => println!("Saved cue {} to {}", id, path.display()),
        SaveOutcome::NothingToSave => bail!("Nothing to save: the cue message is empty"),
    }
    Ok(())
}

fn check_message(message: &str) {
    let parsed = parse_message(message);
    let sanitized = sanitize_address(&parsed.addr);

    println!("Address: {:?}", parsed.addr);
    if sanitized != parsed.addr {
        println!("Sanitized: {:?}", sanitized);
    }
    for (i, arg) in parsed.args.iter().enumerate() {
        match arg {
            OscArg::String(s) => println!("Arg {}: {:?} (string)", i + 1, s),
        }
    }
    println!("Packet: {} bytes", encode_message(&parsed).len());
}
