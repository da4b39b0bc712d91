use std::net::IpAddr;

use clap::{Args, Parser, Subcommand};

use crate::core::{
    FieldInput, MAX_HORIZON, MIN_HORIZON, ProjectionResult, RawSegment, SegmentEditor, clamp_int,
    project, to_num,
};
use crate::format::render_ledger;

#[derive(Parser, Debug)]
#[command(
    name = "recalc",
    about = "Tiered-interest investment projection and investor roster service"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print a year-by-year projection
    Project(ProjectArgs),
    /// Serve the investor roster API and dashboard
    Serve(ServeArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    #[arg(
        long,
        default_value = "10",
        help = "Horizon in years, clamped to 1..=80"
    )]
    pub years: String,
    #[arg(
        long,
        default_value = "1000",
        help = "Amount contributed at the start of every year; ',' accepted as decimal separator"
    )]
    pub contribution: String,
    #[arg(
        long = "segment",
        value_parser = parse_segment,
        help = "Rate segment FROM-TO:RATE, e.g. 1-2:8 (up to 3); default 1-2:8 3-5:10 6-N:12"
    )]
    pub segments: Vec<SegmentArg>,
    #[arg(long, help = "Print the projection as JSON instead of a table")]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[arg(long, default_value_t = 8080)]
    pub port: u16,
    #[arg(long, default_value = "0.0.0.0")]
    pub bind: IpAddr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SegmentArg {
    pub from: FieldInput,
    pub to: FieldInput,
    pub rate: FieldInput,
}

/// Parses `FROM-TO:RATE`; any part may be left blank (`3-:`).
pub fn parse_segment(value: &str) -> Result<SegmentArg, String> {
    let Some((range, rate)) = value.split_once(':') else {
        return Err(format!("segment `{value}` must look like FROM-TO:RATE"));
    };
    let Some((from, to)) = range.split_once('-') else {
        return Err(format!("segment range `{range}` must look like FROM-TO"));
    };

    Ok(SegmentArg {
        from: field(from),
        to: field(to),
        rate: field(rate),
    })
}

fn field(part: &str) -> FieldInput {
    let part = part.trim();
    if part.is_empty() {
        FieldInput::Empty
    } else {
        FieldInput::Text(part.to_string())
    }
}

#[derive(Debug)]
pub struct ProjectOutput {
    pub result: ProjectionResult,
    pub rendered: String,
}

/// Explicit segments are projected exactly as given. Without them, the
/// default editing session is used, so its last segment follows `--years`.
pub fn run_project(args: &ProjectArgs) -> Result<ProjectOutput, String> {
    let result = if args.segments.is_empty() {
        let mut editor = SegmentEditor::default();
        editor.set_horizon(args.years.as_str());
        editor.set_contribution(args.contribution.as_str());
        editor.project()
    } else {
        let horizon = clamp_int(&args.years.as_str().into(), MIN_HORIZON, MAX_HORIZON);
        let contribution = to_num(&args.contribution.as_str().into());
        let raw = args
            .segments
            .iter()
            .enumerate()
            .map(|(idx, seg)| RawSegment {
                id: idx as u32 + 1,
                from: seg.from.clone(),
                to: seg.to.clone(),
                rate: seg.rate.clone(),
            })
            .collect::<Vec<_>>();
        project(horizon, contribution, &raw)
    };

    let rendered = if args.json {
        serde_json::to_string_pretty(&result)
            .map_err(|e| format!("Failed to serialize projection: {e}"))?
    } else {
        render_ledger(&result)
    };

    Ok(ProjectOutput { result, rendered })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(cli: &[&str]) -> ProjectArgs {
        let parsed = Cli::try_parse_from(cli.iter().copied()).expect("arguments should parse");
        match parsed.command {
            Command::Project(args) => args,
            Command::Serve(_) => panic!("expected project subcommand"),
        }
    }

    #[test]
    fn parse_segment_reads_all_parts() {
        let seg = parse_segment("3-5:10,5").expect("valid");
        assert_eq!(seg.from, FieldInput::from("3"));
        assert_eq!(seg.to, FieldInput::from("5"));
        assert_eq!(seg.rate, FieldInput::from("10,5"));
    }

    #[test]
    fn parse_segment_allows_blank_parts() {
        let seg = parse_segment("3-:").expect("valid");
        assert_eq!(seg.to, FieldInput::Empty);
        assert_eq!(seg.rate, FieldInput::Empty);
    }

    #[test]
    fn parse_segment_rejects_missing_separators() {
        assert!(parse_segment("1-2").is_err());
        assert!(parse_segment("12:5").is_err());
    }

    #[test]
    fn default_segments_follow_years() {
        let output = run_project(&args(&["recalc", "project", "--years", "15"])).expect("runs");
        let ledger = output.result.ledger().expect("valid");
        assert_eq!(ledger.rows.len(), 15);
        assert_eq!(ledger.rows[14].rate_pct, 12.0);
    }

    #[test]
    fn explicit_segments_are_not_stretched_to_horizon() {
        let output = run_project(&args(&[
            "recalc",
            "project",
            "--years",
            "5",
            "--segment",
            "1-2:8",
            "--segment",
            "3-4:9",
        ]))
        .expect("runs");
        assert_eq!(
            output.result.errors(),
            ["The last segment must end at year 5.".to_string()]
        );
        assert!(output.rendered.starts_with("Fix the following:"));
    }

    #[test]
    fn json_output_carries_ok_flag() {
        let output = run_project(&args(&[
            "recalc",
            "project",
            "--years",
            "1",
            "--contribution",
            "100",
            "--segment",
            "1-1:5",
            "--json",
        ]))
        .expect("runs");
        let value: serde_json::Value =
            serde_json::from_str(&output.rendered).expect("valid json");
        assert_eq!(value["ok"], true);
        assert_eq!(value["totals"]["final"], 105.0);
    }

    #[test]
    fn serve_defaults() {
        let parsed = Cli::try_parse_from(["recalc", "serve"]).expect("parses");
        let Command::Serve(serve) = parsed.command else {
            panic!("expected serve");
        };
        assert_eq!(serve.port, 8080);
        assert_eq!(serve.bind.to_string(), "0.0.0.0");
    }
}
