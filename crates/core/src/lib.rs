pub use console::CueConsole;
pub use cue::cue::{Cue, CueList};
pub use cue::cue_manager::{CueManager, CueRow};
pub use osc::address::{is_valid_address, sanitize_address};
pub use osc::encoder::encode_message;
pub use osc::message::{normalize_quotes, parse_message, OscArg, ParsedMessage};
pub use store::cue_store::{CueStore, SaveOutcome, StoreError, CUE_FILE_NAME};
pub use transport::{resolve_destination, OscTransport, SendError};

mod console;
mod cue;
mod osc;
mod store;
mod transport;
