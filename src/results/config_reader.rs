use crate::results::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotQuestion {
    #[serde(rename = "type")]
    pub question_type: String,
    pub options: Option<Vec<String>>,
    #[serde(rename = "templateOptions")]
    pub template_options: Option<Vec<String>>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotVote {
    pub value: String,
    #[serde(default)]
    pub team_id: Option<String>,
    pub participant_id: String,
}

impl SnapshotVote {
    pub fn to_vote(&self) -> Vote {
        Vote {
            value: self.value.clone(),
            team_id: self.team_id.clone(),
            participant_id: self.participant_id.clone(),
        }
    }
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct DisplaySettings {
    #[serde(rename = "backgroundColor")]
    pub background_color: Option<String>,
    #[serde(rename = "minContrast")]
    pub min_contrast: Option<f64>,
}

/// The content of an input file. CSV inputs only carry votes.
#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub question: Option<SnapshotQuestion>,
    pub votes: Vec<SnapshotVote>,
    pub display: Option<DisplaySettings>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputQuestion {
    #[serde(rename = "type")]
    pub question_type: String,
    #[serde(rename = "teamFilter")]
    pub team_filter: Option<String>,
}

pub fn read_reference(path: &str) -> ResultsResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningFileSnafu { path })?;
    debug!("read_reference: content: {:?}", contents);
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    Ok(js)
}
