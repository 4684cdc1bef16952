use crate::cue::cue::CueList;

/// One editable row: a title and a raw, unparsed cue message.
/// Either field may be empty while the operator is still typing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CueRow {
    pub title: String,
    pub message: String,
}

/// In-memory editing state for the cue list.
///
/// Rows are kept in display order; the displayed id of a row is its position
/// plus one, so removing a row renumbers everything after it automatically.
/// Ids only become persistent when the store writes a snapshot.
pub struct CueManager {
    rows: Vec<CueRow>,
    ip_address: String,
    port: String,
}

impl CueManager {
    pub fn new() -> Self {
        CueManager {
            rows: Vec::new(),
            ip_address: String::new(),
            port: String::new(),
        }
    }

    pub fn rows(&self) -> &[CueRow] {
        &self.rows
    }

    /// Adds a row and returns its displayed id.
    pub fn add_row(&mut self, title: String, message: String) -> u32 {
        self.rows.push(CueRow { title, message });
        self.rows.len() as u32
    }

    /// Removes the row with the given displayed id. Surviving rows keep their
    /// order and are renumbered densely from 1.
    pub fn remove_row(&mut self, id: u32) -> Result<CueRow, String> {
        let index = id
            .checked_sub(1)
            .map(|i| i as usize)
            .filter(|&i| i < self.rows.len())
            .ok_or_else(|| format!("No cue row with id {}", id))?;
        Ok(self.rows.remove(index))
    }

    pub fn get_row(&self, id: u32) -> Option<&CueRow> {
        self.rows.get(id.checked_sub(1)? as usize)
    }

    pub fn get_row_mut(&mut self, id: u32) -> Option<&mut CueRow> {
        self.rows.get_mut(id.checked_sub(1)? as usize)
    }

    pub fn set_destination(&mut self, ip_address: String, port: String) {
        self.ip_address = ip_address;
        self.port = port;
    }

    pub fn ip_address(&self) -> &str {
        &self.ip_address
    }

    pub fn port(&self) -> &str {
        &self.port
    }

    /// Replaces the editing state with a loaded document.
    pub fn load_list(&mut self, list: CueList) {
        self.ip_address = list.ip_address;
        self.port = list.port;
        self.rows = list
            .cues
            .into_iter()
            .map(|cue| CueRow {
                title: cue.title,
                message: cue.message,
            })
            .collect();
    }
}

impl Default for CueManager {
    fn default() -> Self {
        Self::new()
    }
}
