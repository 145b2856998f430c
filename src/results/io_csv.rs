// Primitives for reading CSV files.

use csv::StringRecord;

use crate::results::{
    config_reader::{Snapshot, SnapshotVote},
    *,
};

/// Reads one vote per line. The header row must name the `value` and
/// `participant_id` columns; `team_id` is optional and an empty team means
/// no team.
pub fn read_csv_votes(path: &str) -> ResultsResult<Snapshot> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;
    let headers: StringRecord = rdr.headers().context(CsvOpenSnafu { path })?.clone();
    debug!("read_csv_votes: headers: {:?}", headers);

    let value_idx = find_column(&headers, "value")?;
    let participant_idx = find_column(&headers, "participant_id")?;
    let team_idx = find_column(&headers, "team_id").ok();

    let mut votes: Vec<SnapshotVote> = Vec::new();
    for (idx, line_r) in rdr.records().enumerate() {
        // The header is line 1.
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        let value = line
            .get(value_idx)
            .context(CsvLineTooShortSnafu { lineno })?;
        let participant_id = line
            .get(participant_idx)
            .context(CsvLineTooShortSnafu { lineno })?;
        let team_id = team_idx
            .and_then(|i| line.get(i))
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string());
        if value.is_empty() {
            warn!("read_csv_votes: line {}: skipping vote without value", lineno);
            continue;
        }
        votes.push(SnapshotVote {
            value: value.to_string(),
            team_id,
            participant_id: participant_id.to_string(),
        });
    }
    info!("read_csv_votes: read {} votes from {:?}", votes.len(), path);
    Ok(Snapshot {
        question: None,
        votes,
        display: None,
    })
}

fn find_column(headers: &StringRecord, column: &str) -> ResultsResult<usize> {
    headers
        .iter()
        .position(|h| h == column)
        .context(CsvMissingColumnSnafu { column })
}
