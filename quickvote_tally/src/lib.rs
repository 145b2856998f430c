mod config;
pub mod builder;
pub mod chart_colors;
pub mod contrast;
pub mod manual;

use log::{debug, info};

use std::collections::{HashMap, HashSet};

pub use crate::chart_colors::{adaptive_chart_color, DEFAULT_MIN_CONTRAST};
pub use crate::config::*;
pub use crate::contrast::{contrast_ratio, hex_to_rgb, relative_luminance, text_color};

/// The columns of an agree/disagree question, in display order.
pub const AGREE_DISAGREE_ORDER: [&str; 3] = ["Agree", "Sometimes", "Disagree"];

// **** Private helpers ****

/// `count / total` as a percentage, rounded half up.
///
/// The rounding is done on the exact quotient, in integer arithmetic.
fn percentage_of(count: u64, total: u64) -> u32 {
    if total == 0 {
        return 0;
    }
    let p = (200 * count as u128 + total as u128) / (2 * total as u128);
    p as u32
}

fn team_matches(vote: &Vote, team_filter: Option<&str>) -> bool {
    match team_filter {
        Some(team) => vote.team_id.as_deref() == Some(team),
        None => true,
    }
}

/// Counts the votes for each value.
///
/// Arguments:
/// * `votes` the votes cast for a single question
/// * `team_filter` if provided, only the votes of this team are counted. The
/// team identifier is compared exactly.
///
/// Values are compared exactly (case-sensitive) and are returned in the order
/// in which they first appear. Use [`build_consistent_bar_data`] to get a
/// stable column order.
pub fn aggregate_votes(votes: &[Vote], team_filter: Option<&str>) -> Vec<VoteCount> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, u64)> = Vec::new();
    let mut total: u64 = 0;
    for v in votes.iter().filter(|v| team_matches(v, team_filter)) {
        total += 1;
        match positions.get(v.value.as_str()) {
            Some(idx) => counts[*idx].1 += 1,
            None => {
                positions.insert(v.value.as_str(), counts.len());
                counts.push((v.value.as_str(), 1));
            }
        }
    }
    debug!(
        "aggregate_votes: {} votes, {} after team filter {:?}, {} distinct values",
        votes.len(),
        total,
        team_filter,
        counts.len()
    );

    counts
        .into_iter()
        .map(|(value, count)| VoteCount {
            value: value.to_string(),
            count,
            percentage: percentage_of(count, total),
        })
        .collect()
}

/// The number of distinct participants among the (optionally team-filtered)
/// votes.
pub fn team_participant_count(votes: &[Vote], team_filter: Option<&str>) -> usize {
    let participants: HashSet<&str> = votes
        .iter()
        .filter(|v| team_matches(v, team_filter))
        .map(|v| v.participant_id.as_str())
        .collect();
    participants.len()
}

/// The fixed column order for a question, if one can be determined.
///
/// Agree/disagree questions always use [`AGREE_DISAGREE_ORDER`]. Other
/// questions use the options of their response template, then their own
/// authored options. Empty lists are ignored.
pub fn expected_order(question: &Question, template_options: Option<&[String]>) -> Option<Vec<String>> {
    if question.question_type == QuestionType::AgreeDisagree {
        return Some(AGREE_DISAGREE_ORDER.iter().map(|s| s.to_string()).collect());
    }
    if let Some(template) = template_options.filter(|t| !t.is_empty()) {
        return Some(template.to_vec());
    }
    question.options.clone().filter(|o| !o.is_empty())
}

/// Projects aggregated counts onto the fixed column order of a question.
///
/// Every expected column is returned, in order, even without votes. Counts
/// whose value matches a column label case-insensitively are merged into
/// that column, so the stored vote `agree` lands in the `Agree` column.
/// Values that match no column are dropped. Percentages are recomputed
/// against the sum of all the given counts.
///
/// When the question has no usable order (multiple choice without options),
/// the aggregated counts are returned unchanged.
pub fn build_consistent_bar_data(
    question: &Question,
    aggregated: &[VoteCount],
    template_options: Option<&[String]>,
) -> Vec<VoteCount> {
    let order = match expected_order(question, template_options) {
        Some(order) => order,
        None => {
            debug!("build_consistent_bar_data: no column order, keeping aggregated counts");
            return aggregated.to_vec();
        }
    };

    let total_votes: u64 = aggregated.iter().map(|vc| vc.count).sum();
    let lowered: Vec<(String, u64)> = aggregated
        .iter()
        .map(|vc| (vc.value.to_lowercase(), vc.count))
        .collect();

    let res: Vec<VoteCount> = order
        .iter()
        .map(|label| {
            let key = label.to_lowercase();
            let count: u64 = lowered
                .iter()
                .filter(|(value, _)| *value == key)
                .map(|(_, c)| *c)
                .sum();
            VoteCount {
                value: label.clone(),
                count,
                percentage: percentage_of(count, total_votes),
            }
        })
        .collect();

    let placed: u64 = res.iter().map(|vc| vc.count).sum();
    if placed < total_votes {
        let labels: HashSet<String> = order.iter().map(|l| l.to_lowercase()).collect();
        let dropped: Vec<&str> = aggregated
            .iter()
            .filter(|vc| !labels.contains(&vc.value.to_lowercase()))
            .map(|vc| vc.value.as_str())
            .collect();
        debug!(
            "build_consistent_bar_data: dropping {} votes for unknown values {:?}",
            total_votes - placed,
            dropped
        );
    }
    info!(
        "build_consistent_bar_data: {} columns for {} votes",
        res.len(),
        total_votes
    );
    res
}
