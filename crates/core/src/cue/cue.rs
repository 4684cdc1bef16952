use serde::{Deserialize, Serialize};

/// One persisted cue. The id is display order, reassigned 1..N at save time,
/// not a stable identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cue {
    #[serde(rename = "Id")]
    pub id: u32,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Message")]
    pub message: String,
}

/// The persisted cue document: destination plus the ordered cue sequence.
///
/// The serde renames pin the exact on-disk field names so cue files written
/// by earlier versions of the tool keep loading.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CueList {
    #[serde(rename = "IPAddress")]
    pub ip_address: String,
    #[serde(rename = "Port")]
    pub port: String,
    #[serde(rename = "Cues")]
    pub cues: Vec<Cue>,
}

impl CueList {
    pub fn get_cue(&self, id: u32) -> Option<&Cue> {
        self.cues.iter().find(|cue| cue.id == id)
    }
}
