// Reader for the JSON snapshots exported by the session review page.

use crate::results::{config_reader::Snapshot, *};

pub fn read_json_snapshot(path: &str) -> ResultsResult<Snapshot> {
    let contents = fs::read_to_string(path).context(OpeningFileSnafu { path })?;
    let snapshot: Snapshot =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    debug!(
        "read_json_snapshot: {} votes, question: {:?}, display: {:?}",
        snapshot.votes.len(),
        snapshot.question,
        snapshot.display
    );
    Ok(snapshot)
}
