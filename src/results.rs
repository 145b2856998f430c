use log::{debug, info, warn};

use quickvote_tally::builder::{ResultsBuilder, ResultsSummary};
use quickvote_tally::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::Path;

use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

pub mod config_reader;
pub mod io_csv;
pub mod io_json;

use crate::args::Args;
use crate::results::config_reader::*;

#[derive(Debug, Snafu)]
pub enum ResultsError {
    #[snafu(display("Error opening file {path}"))]
    OpeningFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON file {path}: {source}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error serializing the summary"))]
    WritingJson { source: serde_json::Error },
    #[snafu(display("Error writing file {path}"))]
    WritingFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error parsing CSV line {lineno}: {source}"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("CSV line {lineno} is too short"))]
    CsvLineTooShort { lineno: usize },
    #[snafu(display("CSV header has no column {column:?}"))]
    CsvMissingColumn { column: String },
    #[snafu(display(
        "Unknown question type {name:?} (expected agree_disagree or multiple_choice)"
    ))]
    UnknownQuestionType { name: String },
    #[snafu(display("Unknown input type {name:?} (expected json or csv)"))]
    UnknownInputType { name: String },
    #[snafu(display("Invalid chart color: {source}"))]
    InvalidColor { source: ColorError },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
enum InputType {
    Json,
    Csv,
}

fn input_type(args: &Args, path: &str) -> ResultsResult<InputType> {
    match args.input_type.as_deref() {
        Some("json") => Ok(InputType::Json),
        Some("csv") => Ok(InputType::Csv),
        Some(x) => UnknownInputTypeSnafu { name: x }.fail(),
        None => {
            let is_csv = Path::new(path)
                .extension()
                .map_or(false, |ext| ext.eq_ignore_ascii_case("csv"));
            Ok(if is_csv { InputType::Csv } else { InputType::Json })
        }
    }
}

fn read_snapshot(args: &Args, path: &str) -> ResultsResult<Snapshot> {
    info!("Attempting to read vote file {:?}", path);
    match input_type(args, path)? {
        InputType::Json => io_json::read_json_snapshot(path),
        InputType::Csv => io_csv::read_csv_votes(path),
    }
}

fn parse_question_type(name: &str) -> ResultsResult<QuestionType> {
    QuestionType::from_name(name).context(UnknownQuestionTypeSnafu { name })
}

/// The question and its template options. Command line flags win over the
/// snapshot content.
fn resolve_question(
    args: &Args,
    snapshot: &Snapshot,
) -> ResultsResult<(Question, Option<Vec<String>>)> {
    let from_snapshot = snapshot.question.as_ref();
    let type_name: &str = args
        .question_type
        .as_deref()
        .or_else(|| from_snapshot.map(|q| q.question_type.as_str()))
        .unwrap_or("multiple_choice");
    let question_type = parse_question_type(type_name)?;

    let options = args
        .options
        .clone()
        .filter(|o| !o.is_empty())
        .or_else(|| from_snapshot.and_then(|q| q.options.clone()));
    let template_options = args
        .template_options
        .clone()
        .filter(|o| !o.is_empty())
        .or_else(|| from_snapshot.and_then(|q| q.template_options.clone()));

    Ok((
        Question {
            question_type,
            options,
        },
        template_options,
    ))
}

fn build_summary_js(question: &Question, team: Option<&str>, summary: &ResultsSummary) -> JSValue {
    let q = OutputQuestion {
        question_type: question.question_type.name().to_string(),
        team_filter: team.map(|t| t.to_string()),
    };
    let results: Vec<JSValue> = summary
        .bars
        .iter()
        .map(|bar| {
            json!({
                "value": bar.value,
                "count": bar.count,
                "percentage": bar.percentage,
                "color": bar.color,
                "textColor": bar.text_color.name(),
            })
        })
        .collect();
    json!({
        "question": q,
        "totalVotes": summary.total_votes,
        "participants": summary.participants,
        "results": results,
    })
}

/// Reads the input and computes the summary of the results, as JSON.
pub fn compute_summary(args: &Args) -> ResultsResult<JSValue> {
    let path = match args.input.as_deref() {
        Some(p) => p,
        None => whatever!("No input file given (use --input)"),
    };
    let snapshot = read_snapshot(args, path)?;
    let (question, template_options) = resolve_question(args, &snapshot)?;
    info!(
        "question: {:?}, template options: {:?}",
        question, template_options
    );

    let votes: Vec<Vote> = snapshot.votes.iter().map(|v| v.to_vote()).collect();

    let mut builder = ResultsBuilder::new(&question);
    if let Some(template) = template_options.as_deref() {
        builder = builder.template_options(template);
    }
    if let Some(team) = args.team.as_deref() {
        builder = builder.team(team);
    }
    let display = snapshot.display.as_ref();
    let background = args
        .background
        .clone()
        .or_else(|| display.and_then(|d| d.background_color.clone()));
    if let Some(bg) = background {
        let min_contrast = args
            .min_contrast
            .or_else(|| display.and_then(|d| d.min_contrast))
            .unwrap_or(DEFAULT_MIN_CONTRAST);
        debug!("background: {} min contrast: {}", bg, min_contrast);
        builder = builder.background(&bg, min_contrast);
    }
    builder.add_votes(&votes);

    let summary = builder.build().context(InvalidColorSnafu {})?;
    info!("summary: {:?}", summary);
    Ok(build_summary_js(&question, args.team.as_deref(), &summary))
}

pub fn run(args: &Args) -> ResultsResult<()> {
    let result_js = compute_summary(args)?;
    let pretty_js_stats = serde_json::to_string_pretty(&result_js).context(WritingJsonSnafu {})?;

    match args.out.as_deref() {
        None | Some("stdout") => println!("{}", pretty_js_stats),
        Some(out_path) => {
            info!("Writing summary to {:?}", out_path);
            fs::write(out_path, &pretty_js_stats).context(WritingFileSnafu { path: out_path })?;
        }
    }

    // The reference summary, if provided for comparison
    if let Some(reference_p) = args.reference.as_deref() {
        let summary_ref = read_reference(reference_p)?;
        debug!("reference summary: {:?}", summary_ref);
        let pretty_js_summary_ref =
            serde_json::to_string_pretty(&summary_ref).context(WritingJsonSnafu {})?;
        if pretty_js_summary_ref != pretty_js_stats {
            warn!("Found differences with the reference summary");
            print_diff(
                pretty_js_summary_ref.as_str(),
                pretty_js_stats.as_ref(),
                "\n",
            );
            whatever!("Difference detected between calculated summary and reference summary")
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_dir() -> String {
        format!("{}/testdata", env!("CARGO_MANIFEST_DIR"))
    }

    fn fixture(test_name: &str, file_name: &str) -> String {
        format!("{}/{}/{}_{}", test_dir(), test_name, test_name, file_name)
    }

    fn snapshot_args(test_name: &str) -> Args {
        Args {
            input: Some(fixture(test_name, "snapshot.json")),
            ..Args::default()
        }
    }

    fn csv_args() -> Args {
        Args {
            input: Some(fixture("team_csv", "votes.csv")),
            question_type: Some("multiple_choice".to_string()),
            options: Some(vec![
                "Pizza".to_string(),
                "Sushi".to_string(),
                "Curry".to_string(),
                "Tacos".to_string(),
            ]),
            team: Some("red".to_string()),
            background: Some("#ffffff".to_string()),
            ..Args::default()
        }
    }

    #[test]
    fn agree_disagree_snapshot() {
        let args = Args {
            reference: Some(fixture("agree_disagree", "expected_summary.json")),
            ..snapshot_args("agree_disagree")
        };
        let res = run(&args);
        assert!(res.is_ok(), "{:?}", res);
    }

    #[test]
    fn team_csv() {
        let args = Args {
            reference: Some(fixture("team_csv", "expected_summary.json")),
            ..csv_args()
        };
        let res = run(&args);
        assert!(res.is_ok(), "{:?}", res);
    }

    #[test]
    fn reference_mismatch_is_an_error() {
        let args = Args {
            reference: Some(fixture("team_csv", "expected_summary.json")),
            ..snapshot_args("agree_disagree")
        };
        assert!(matches!(run(&args), Err(ResultsError::Whatever { .. })));
    }

    #[test]
    fn team_flag_on_snapshot() {
        let args = Args {
            team: Some("blue".to_string()),
            ..snapshot_args("agree_disagree")
        };
        let js = compute_summary(&args).unwrap();
        assert_eq!(js["totalVotes"], json!(2));
        assert_eq!(js["participants"], json!(2));
        assert_eq!(js["question"]["teamFilter"], json!("blue"));
        let counts: Vec<u64> = js["results"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["count"].as_u64().unwrap())
            .collect();
        assert_eq!(counts, vec![1, 1, 0]);
    }

    #[test]
    fn flags_override_snapshot_question() {
        // Read as a multiple choice question, the votes keep their own labels.
        let args = Args {
            question_type: Some("multiple_choice".to_string()),
            ..snapshot_args("agree_disagree")
        };
        let js = compute_summary(&args).unwrap();
        let values: Vec<&str> = js["results"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["value"].as_str().unwrap())
            .collect();
        assert_eq!(
            values,
            vec!["agree", "Agree", "sometimes", "disagree", "maybe"]
        );
    }

    #[test]
    fn csv_without_question_type_passes_through() {
        let args = Args {
            input: Some(fixture("team_csv", "votes.csv")),
            ..Args::default()
        };
        let js = compute_summary(&args).unwrap();
        assert_eq!(js["question"]["type"], json!("multiple_choice"));
        assert_eq!(js["totalVotes"], json!(6));
        assert_eq!(js["participants"], json!(6));
        // No background: palette colors in order of first appearance.
        assert_eq!(js["results"][0]["value"], json!("Pizza"));
        assert_eq!(js["results"][0]["color"], json!("#3b82f6"));
    }

    #[test]
    fn summary_is_written_to_file() {
        let out = std::env::temp_dir().join("qvresults_summary_is_written_to_file.json");
        let out_s = out.display().to_string();
        let args = Args {
            out: Some(out_s.clone()),
            ..csv_args()
        };
        run(&args).unwrap();
        let written = read_reference(&out_s).unwrap();
        let expected = read_reference(&fixture("team_csv", "expected_summary.json")).unwrap();
        assert_eq!(written, expected);
        let _ = fs::remove_file(out);
    }

    #[test]
    fn errors() {
        let missing_input = Args::default();
        assert!(matches!(
            compute_summary(&missing_input),
            Err(ResultsError::Whatever { .. })
        ));

        let bad_type = Args {
            question_type: Some("ranking".to_string()),
            ..snapshot_args("agree_disagree")
        };
        assert!(matches!(
            compute_summary(&bad_type),
            Err(ResultsError::UnknownQuestionType { .. })
        ));

        let bad_input_type = Args {
            input_type: Some("xlsx".to_string()),
            ..snapshot_args("agree_disagree")
        };
        assert!(matches!(
            compute_summary(&bad_input_type),
            Err(ResultsError::UnknownInputType { .. })
        ));

        let bad_color = Args {
            background: Some("navy".to_string()),
            ..snapshot_args("agree_disagree")
        };
        assert!(matches!(
            compute_summary(&bad_color),
            Err(ResultsError::InvalidColor { .. })
        ));

        let missing_file = Args {
            input: Some(fixture("agree_disagree", "missing.json")),
            ..Args::default()
        };
        assert!(matches!(
            compute_summary(&missing_file),
            Err(ResultsError::OpeningFile { .. })
        ));
    }
}
