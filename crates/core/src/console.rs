//! Cue console: ties the editing state, the persisted document, and the UDP
//! transport together. Every operation here is synchronous; one send is one
//! parse, one encode, one datagram.

use anyhow::anyhow;

use crate::cue::cue_manager::CueManager;
use crate::osc::address::sanitize_address;
use crate::osc::encoder::encode_message;
use crate::osc::message::{parse_message, ParsedMessage};
use crate::store::cue_store::{CueStore, SaveOutcome, StoreError};
use crate::transport::{resolve_destination, OscTransport, SendError};

pub struct CueConsole {
    cue_manager: CueManager,
    store: CueStore,
    transport: OscTransport,
}

impl CueConsole {
    pub fn new(store: CueStore) -> Result<Self, anyhow::Error> {
        Ok(CueConsole {
            cue_manager: CueManager::new(),
            store,
            transport: OscTransport::new()?,
        })
    }

    pub fn cue_manager(&self) -> &CueManager {
        &self.cue_manager
    }

    pub fn cue_manager_mut(&mut self) -> &mut CueManager {
        &mut self.cue_manager
    }

    pub fn store(&self) -> &CueStore {
        &self.store
    }

    /// Parses, encodes and sends one raw cue message to the configured
    /// destination. The parsed form is built fresh for this call and
    /// discarded; nothing is cached between sends.
    pub fn send_message(&self, raw: &str) -> Result<(), SendError> {
        let parsed = parse_message(raw);

        let addr = sanitize_address(&parsed.addr);
        if addr.trim().is_empty() {
            return Err(SendError::EmptyAddress);
        }

        let dest = resolve_destination(self.cue_manager.ip_address(), self.cue_manager.port())?;
        let arg_count = parsed.args.len();
        let packet = encode_message(&ParsedMessage {
            addr,
            args: parsed.args,
        });
        self.transport.send(&packet, dest)?;

        log::info!("Sent {} with {} args to {}", parsed.addr, arg_count, dest);
        Ok(())
    }

    /// Sends the cue with the given displayed id.
    pub fn fire_cue(&self, id: u32) -> Result<(), anyhow::Error> {
        let row = self
            .cue_manager
            .get_row(id)
            .ok_or_else(|| anyhow!("No cue with id {}", id))?;
        if row.message.trim().is_empty() {
            return Err(anyhow!("Cue {} has an empty message", id));
        }
        self.send_message(&row.message)?;
        Ok(())
    }

    /// Persists the current rows; rows with empty messages are dropped and
    /// the survivors renumbered by the store.
    pub fn save_cues(&self) -> Result<SaveOutcome, StoreError> {
        self.store.save(
            self.cue_manager.ip_address(),
            self.cue_manager.port(),
            self.cue_manager.rows(),
        )
    }

    /// Loads the persisted document into the editing state, replacing the
    /// current rows and destination. Returns the number of cues loaded.
    pub fn load_cues(&mut self) -> Result<usize, StoreError> {
        let list = self.store.load()?;
        let count = list.cues.len();
        self.cue_manager.load_list(list);
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use std::net::UdpSocket;

    use tempfile::TempDir;

    use super::*;
    use crate::cue::cue_manager::CueRow;

    fn console_with_receiver() -> (CueConsole, UdpSocket, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = CueStore::new(Some(temp_dir.path().join("cues.json")));
        let mut console = CueConsole::new(store).unwrap();

        let receiver = UdpSocket::bind("127.0.0.1:0").unwrap();
        let port = receiver.local_addr().unwrap().port();
        console
            .cue_manager_mut()
            .set_destination("127.0.0.1".to_string(), port.to_string());

        (console, receiver, temp_dir)
    }

    #[test]
    fn send_message_delivers_an_osc_packet() {
        let (console, receiver, _dir) = console_with_receiver();

        console.send_message("/show/go 1 2").unwrap();

        let mut buf = [0u8; 64];
        let (len, _) = receiver.recv_from(&mut buf).unwrap();
        assert_eq!(&buf[..len], b"/show/go\0\0\0\0,ss\01\0\0\02\0\0\0");
    }

    #[test]
    fn address_that_sanitizes_to_nothing_is_rejected() {
        let (console, receiver, _dir) = console_with_receiver();

        assert!(matches!(
            console.send_message("!!!"),
            Err(SendError::EmptyAddress)
        ));
        assert!(matches!(
            console.send_message("   "),
            Err(SendError::EmptyAddress)
        ));

        receiver.set_nonblocking(true).unwrap();
        let mut buf = [0u8; 8];
        assert!(receiver.recv_from(&mut buf).is_err());
    }

    #[test]
    fn invalid_port_aborts_before_any_packet_is_built() {
        let (mut console, _receiver, _dir) = console_with_receiver();
        console
            .cue_manager_mut()
            .set_destination("127.0.0.1".to_string(), "not-a-port".to_string());

        assert!(matches!(
            console.send_message("/cue/1"),
            Err(SendError::InvalidPort(_))
        ));
    }

    #[test]
    fn fire_cue_sends_the_row_message() {
        let (mut console, receiver, _dir) = console_with_receiver();
        console
            .cue_manager_mut()
            .add_row("Go".to_string(), "/cue/1 go".to_string());

        console.fire_cue(1).unwrap();

        let mut buf = [0u8; 64];
        let (len, _) = receiver.recv_from(&mut buf).unwrap();
        assert_eq!(&buf[..len], b"/cue/1\0\0,s\0\0go\0\0");
    }

    #[test]
    fn fire_cue_with_unknown_id_fails() {
        let (console, _receiver, _dir) = console_with_receiver();
        assert!(console.fire_cue(7).is_err());
    }

    #[test]
    fn save_and_reload_through_the_console() {
        let (mut console, _receiver, _dir) = console_with_receiver();
        let dest_port = console.cue_manager().port().to_string();

        console
            .cue_manager_mut()
            .add_row("Go".to_string(), "/show/go 1 2".to_string());
        console.cue_manager_mut().add_row("blank".to_string(), String::new());

        match console.save_cues().unwrap() {
            SaveOutcome::Saved(_) => {}
            SaveOutcome::NothingToSave => panic!("expected a saved document"),
        }

        // Dirty the state, then load the document back over it.
        console
            .cue_manager_mut()
            .set_destination("10.9.9.9".to_string(), "1".to_string());
        let count = console.load_cues().unwrap();

        assert_eq!(count, 1);
        assert_eq!(console.cue_manager().ip_address(), "127.0.0.1");
        assert_eq!(console.cue_manager().port(), dest_port);
        assert_eq!(
            console.cue_manager().rows(),
            &[CueRow {
                title: "Go".to_string(),
                message: "/show/go 1 2".to_string(),
            }]
        );
    }
}
