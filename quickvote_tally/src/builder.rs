use log::{debug, info};

use crate::chart_colors::{adaptive_chart_color, column_color, DEFAULT_MIN_CONTRAST};
pub use crate::config::*;
use crate::contrast::text_color;
use crate::{aggregate_votes, build_consistent_bar_data, team_participant_count};

/// A bar of the results chart, ready to be drawn.
#[derive(PartialEq, Debug, Clone)]
pub struct ChartBar {
    pub value: String,
    pub count: u64,
    pub percentage: u32,
    /// The fill color, already adapted to the background if one was given.
    pub color: String,
    /// The color of a label drawn on top of the bar.
    pub text_color: TextColor,
}

/// The displayed results of one question.
#[derive(PartialEq, Debug, Clone)]
pub struct ResultsSummary {
    /// Number of votes after the team filter.
    pub total_votes: u64,
    /// Number of distinct participants after the team filter.
    pub participants: usize,
    pub bars: Vec<ChartBar>,
}

/// A builder that runs the whole display pipeline for one question: counting,
/// column ordering, palette lookup and contrast adaptation.
///
/// ```
/// use quickvote_tally::builder::ResultsBuilder;
/// use quickvote_tally::{ColorError, Question, Vote};
///
/// let mut builder = ResultsBuilder::new(&Question::agree_disagree())
///     .background("#1f2937", 3.0);
///
/// builder.add_vote(Vote::new("agree", "alice"));
/// builder.add_vote(Vote::new("disagree", "bob"));
///
/// let summary = builder.build()?;
/// assert_eq!(summary.bars.len(), 3);
/// assert_eq!(summary.bars[0].value, "Agree");
/// assert_eq!(summary.bars[0].percentage, 50);
///
/// # Ok::<(), ColorError>(())
/// ```
pub struct ResultsBuilder {
    pub(crate) _question: Question,
    pub(crate) _template_options: Option<Vec<String>>,
    pub(crate) _team: Option<String>,
    pub(crate) _background: Option<(String, f64)>,
    pub(crate) _votes: Vec<Vote>,
}

impl ResultsBuilder {
    pub fn new(question: &Question) -> ResultsBuilder {
        ResultsBuilder {
            _question: question.clone(),
            _template_options: None,
            _team: None,
            _background: None,
            _votes: Vec::new(),
        }
    }

    /// The options of the response template used by the question, if any.
    pub fn template_options(self, options: &[String]) -> ResultsBuilder {
        ResultsBuilder {
            _template_options: Some(options.to_vec()),
            ..self
        }
    }

    /// Only count the votes of the given team.
    pub fn team(self, team_id: &str) -> ResultsBuilder {
        ResultsBuilder {
            _team: Some(team_id.to_string()),
            ..self
        }
    }

    /// The background the chart is drawn on. Bars that do not reach
    /// `min_contrast` against it get their lightness adjusted.
    pub fn background(self, color: &str, min_contrast: f64) -> ResultsBuilder {
        ResultsBuilder {
            _background: Some((color.to_string(), min_contrast)),
            ..self
        }
    }

    /// Same as [`ResultsBuilder::background`] with [`DEFAULT_MIN_CONTRAST`].
    pub fn default_background(self, color: &str) -> ResultsBuilder {
        self.background(color, DEFAULT_MIN_CONTRAST)
    }

    pub fn add_vote(&mut self, vote: Vote) {
        self._votes.push(vote);
    }

    pub fn add_votes(&mut self, votes: &[Vote]) {
        self._votes.extend_from_slice(votes);
    }

    /// Runs the pipeline on the votes added so far.
    ///
    /// Fails only if the background color is malformed.
    pub fn build(&self) -> Result<ResultsSummary, ColorError> {
        let team = self._team.as_deref();
        let aggregated = aggregate_votes(&self._votes, team);
        let total_votes: u64 = aggregated.iter().map(|vc| vc.count).sum();
        let participants = team_participant_count(&self._votes, team);
        let ordered = build_consistent_bar_data(
            &self._question,
            &aggregated,
            self._template_options.as_deref(),
        );

        let mut bars: Vec<ChartBar> = Vec::new();
        for (position, vc) in ordered.into_iter().enumerate() {
            let palette = column_color(self._question.question_type, &vc.value, position);
            let color = match &self._background {
                Some((bg, min_contrast)) => adaptive_chart_color(palette, bg, *min_contrast)?,
                None => palette.to_string(),
            };
            let text_color = text_color(&color)?;
            debug!(
                "build: column {} {:?}: {} votes, color {}",
                position, vc.value, vc.count, color
            );
            bars.push(ChartBar {
                value: vc.value,
                count: vc.count,
                percentage: vc.percentage,
                color,
                text_color,
            });
        }
        info!(
            "build: {} bars, {} votes from {} participants (team {:?})",
            bars.len(),
            total_votes,
            participants,
            team
        );
        Ok(ResultsSummary {
            total_votes,
            participants,
            bars,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart_colors::MULTIPLE_CHOICE_COLORS;

    fn agree_disagree_votes() -> Vec<Vote> {
        vec![
            Vote::with_team("agree", "red", "p1"),
            Vote::with_team("agree", "red", "p2"),
            Vote::with_team("sometimes", "blue", "p3"),
            Vote::with_team("disagree", "blue", "p4"),
        ]
    }

    #[test]
    fn palette_colors_without_background() {
        let mut builder = ResultsBuilder::new(&Question::agree_disagree());
        builder.add_votes(&agree_disagree_votes());
        let summary = builder.build().unwrap();
        assert_eq!(summary.total_votes, 4);
        assert_eq!(summary.participants, 4);
        let colors: Vec<&str> = summary.bars.iter().map(|b| b.color.as_str()).collect();
        assert_eq!(colors, vec!["#22c55e", "#eab308", "#ef4444"]);
        let values: Vec<(&str, u64, u32)> = summary
            .bars
            .iter()
            .map(|b| (b.value.as_str(), b.count, b.percentage))
            .collect();
        assert_eq!(
            values,
            vec![("Agree", 2, 50), ("Sometimes", 1, 25), ("Disagree", 1, 25)]
        );
        // All three palette colors are below half luminance.
        assert!(summary.bars.iter().all(|b| b.text_color == TextColor::Light));
    }

    #[test]
    fn team_scoping() {
        let mut builder = ResultsBuilder::new(&Question::agree_disagree()).team("red");
        builder.add_votes(&agree_disagree_votes());
        let summary = builder.build().unwrap();
        assert_eq!(summary.total_votes, 2);
        assert_eq!(summary.participants, 2);
        assert_eq!(summary.bars[0].percentage, 100);
        assert_eq!(summary.bars[1].count, 0);
    }

    #[test]
    fn light_background_darkens_weak_bars() {
        let mut builder =
            ResultsBuilder::new(&Question::agree_disagree()).default_background("#ffffff");
        builder.add_votes(&agree_disagree_votes());
        let summary = builder.build().unwrap();
        // Green and amber are too pale on white; red already has enough contrast.
        assert_eq!(summary.bars[0].color, "#0b4320");
        assert_eq!(summary.bars[1].color, "#564203");
        assert_eq!(summary.bars[2].color, "#ef4444");
    }

    #[test]
    fn multiple_choice_palette_cycles() {
        let options: Vec<String> = (0..10).map(|i| format!("Option {}", i)).collect();
        let mut builder = ResultsBuilder::new(&Question::multiple_choice(None))
            .template_options(&options);
        builder.add_vote(Vote::new("option 9", "p1"));
        let summary = builder.build().unwrap();
        assert_eq!(summary.bars.len(), 10);
        assert_eq!(summary.bars[9].count, 1);
        assert_eq!(summary.bars[9].value, "Option 9");
        assert_eq!(summary.bars[8].color, MULTIPLE_CHOICE_COLORS[0]);
        assert_eq!(summary.bars[9].color, MULTIPLE_CHOICE_COLORS[1]);
    }

    #[test]
    fn invalid_background_is_an_error() {
        let mut builder = ResultsBuilder::new(&Question::agree_disagree()).background("dark", 3.0);
        builder.add_vote(Vote::new("agree", "p1"));
        assert_eq!(
            builder.build(),
            Err(ColorError::InvalidColorFormat("dark".to_string()))
        );
    }

    #[test]
    fn build_is_repeatable() {
        let mut builder =
            ResultsBuilder::new(&Question::agree_disagree()).default_background("#111827");
        builder.add_votes(&agree_disagree_votes());
        assert_eq!(builder.build(), builder.build());
    }
}
