use clap::Parser;

/// Computes the displayed results of a live poll question from a snapshot of its votes.
#[derive(Parser, Debug, Clone, Default)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The snapshot of the votes. Either a JSON snapshot (question, votes and
    /// display settings) or a CSV file with the columns value,team_id,participant_id.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (json or csv, optional) The type of the input. By default, files ending in .csv are
    /// read as CSV and everything else as JSON.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (agree_disagree or multiple_choice) The type of the question. Overrides the type in
    /// the snapshot. Defaults to multiple_choice when no type is known.
    #[clap(long, value_parser)]
    pub question_type: Option<String>,

    /// (repeated, optional) The options of a multiple choice question, in authoring order.
    #[clap(long, value_parser)]
    pub options: Option<Vec<String>>,

    /// (repeated, optional) The options of the response template used by the question.
    /// They take precedence over --options for the column order.
    #[clap(long, value_parser)]
    pub template_options: Option<Vec<String>>,

    /// (team id, optional) Only count the votes of this team.
    #[clap(short, long, value_parser)]
    pub team: Option<String>,

    /// (hex color, optional) The background of the chart. Bars that are hard to see on it
    /// get lighter or darker.
    #[clap(short, long, value_parser)]
    pub background: Option<String>,

    /// (number, default 3.0) The minimum contrast ratio between a bar and the background.
    #[clap(long, value_parser)]
    pub min_contrast: Option<f64>,

    /// (file path, 'stdout' or empty) Where to write the summary of the results in JSON
    /// format. By default it is printed on the standard output.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference file containing the expected summary in JSON format. If
    /// provided, qvresults checks that the computed summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
