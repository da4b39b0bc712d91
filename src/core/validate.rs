use thiserror::Error;

use super::types::{MAX_SEGMENTS, MIN_HORIZON, Segment};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationIssue {
    #[error("The number of years must be at least 1.")]
    HorizonTooShort,
    #[error("The annual capital must be greater than 0.")]
    NonPositiveContribution,
    #[error("Add at least 1 segment with an interest rate.")]
    NoSegments,
    #[error("Maximum 3 segments.")]
    TooManySegments,
    #[error("Each segment must have: From, To and interest %.")]
    IncompleteSegment,
    #[error("Years must start from 1.")]
    YearBeforeStart,
    #[error("Invalid segment: \"From\" cannot be greater than \"To\" (segment {id}).")]
    FromAfterTo { id: u32 },
    #[error("Interest cannot be negative (segment {id}).")]
    NegativeRate { id: u32 },
    #[error("The first segment must start at year 1.")]
    FirstSegmentNotAtYearOne,
    #[error("Segments must be correlative, with no gaps (e.g. 1-2, 3-5, 6-15).")]
    NotCorrelative,
    #[error("The last segment must end at year {horizon}.")]
    LastSegmentNotAtHorizon { horizon: u32 },
}

/// Checks the projection inputs and returns every issue found, in rule
/// order. An empty list means the inputs are valid.
///
/// An empty segment list returns immediately. The per-segment loop stops
/// at the first incomplete segment, and the coverage rules only run once
/// everything before them passed, since they read `from`/`to` directly.
pub fn validate(horizon: u32, contribution: f64, segs: &[Segment]) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if horizon < MIN_HORIZON {
        issues.push(ValidationIssue::HorizonTooShort);
    }
    if contribution.is_nan() || contribution <= 0.0 {
        issues.push(ValidationIssue::NonPositiveContribution);
    }

    if segs.is_empty() {
        issues.push(ValidationIssue::NoSegments);
        return issues;
    }

    if segs.len() > MAX_SEGMENTS {
        issues.push(ValidationIssue::TooManySegments);
    }

    for seg in segs {
        let (Some(from), Some(to), Some(rate)) = (seg.from, seg.to, seg.rate) else {
            issues.push(ValidationIssue::IncompleteSegment);
            break;
        };
        if from < 1 || to < 1 {
            issues.push(ValidationIssue::YearBeforeStart);
        }
        if from > to {
            issues.push(ValidationIssue::FromAfterTo { id: seg.id });
        }
        if rate < 0.0 {
            issues.push(ValidationIssue::NegativeRate { id: seg.id });
        }
    }

    if issues.is_empty() {
        check_coverage(horizon, segs, &mut issues);
    }

    issues
}

fn check_coverage(horizon: u32, segs: &[Segment], issues: &mut Vec<ValidationIssue>) {
    let bands = segs.iter().filter_map(Segment::band).collect::<Vec<_>>();
    let (Some(first), Some(last)) = (bands.first(), bands.last()) else {
        return;
    };

    if first.from != 1 {
        issues.push(ValidationIssue::FirstSegmentNotAtYearOne);
    }

    if bands
        .windows(2)
        .any(|pair| pair[0].to.checked_add(1) != Some(pair[1].from))
    {
        issues.push(ValidationIssue::NotCorrelative);
    }

    if last.to != horizon {
        issues.push(ValidationIssue::LastSegmentNotAtHorizon { horizon });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(id: u32, from: u32, to: u32, rate: f64) -> Segment {
        Segment {
            id,
            from: Some(from),
            to: Some(to),
            rate: Some(rate),
        }
    }

    #[test]
    fn accepts_correlative_cover_of_horizon() {
        let segs = [seg(1, 1, 2, 8.0), seg(2, 3, 5, 10.0), seg(3, 6, 10, 12.0)];
        assert!(validate(10, 1000.0, &segs).is_empty());
    }

    #[test]
    fn empty_segment_list_returns_immediately() {
        let issues = validate(0, 0.0, &[]);
        assert_eq!(
            issues,
            vec![
                ValidationIssue::HorizonTooShort,
                ValidationIssue::NonPositiveContribution,
                ValidationIssue::NoSegments,
            ]
        );
    }

    #[test]
    fn zero_contribution_is_rejected() {
        let issues = validate(5, 0.0, &[seg(1, 1, 5, 4.0)]);
        assert_eq!(issues, vec![ValidationIssue::NonPositiveContribution]);
        assert_eq!(
            issues[0].to_string(),
            "The annual capital must be greater than 0."
        );
    }

    #[test]
    fn too_many_segments_keeps_reporting_other_violations() {
        let segs = [
            seg(1, 1, 2, 8.0),
            seg(2, 3, 4, -1.0),
            seg(3, 5, 6, 10.0),
            seg(4, 8, 7, 12.0),
        ];
        let issues = validate(8, 1000.0, &segs);
        assert_eq!(
            issues,
            vec![
                ValidationIssue::TooManySegments,
                ValidationIssue::NegativeRate { id: 2 },
                ValidationIssue::FromAfterTo { id: 4 },
            ]
        );
    }

    #[test]
    fn too_many_segments_alone_skips_coverage_rules() {
        let segs = [
            seg(1, 1, 1, 8.0),
            seg(2, 2, 2, 8.0),
            seg(3, 3, 3, 8.0),
            seg(4, 4, 4, 8.0),
        ];
        assert_eq!(
            validate(4, 1.0, &segs),
            vec![ValidationIssue::TooManySegments]
        );
    }

    #[test]
    fn incomplete_segment_breaks_the_per_segment_loop() {
        let segs = [
            seg(1, 1, 2, -3.0),
            Segment {
                id: 2,
                from: Some(3),
                to: None,
                rate: Some(5.0),
            },
            seg(3, 9, 4, -1.0),
        ];
        let issues = validate(10, 100.0, &segs);
        assert_eq!(
            issues,
            vec![
                ValidationIssue::NegativeRate { id: 1 },
                ValidationIssue::IncompleteSegment,
            ]
        );
    }

    #[test]
    fn year_zero_is_reported_per_segment() {
        let issues = validate(3, 10.0, &[seg(7, 0, 3, 1.0), seg(8, 0, 0, 1.0)]);
        assert_eq!(
            issues,
            vec![ValidationIssue::YearBeforeStart, ValidationIssue::YearBeforeStart]
        );
        assert_eq!(issues[0].to_string(), "Years must start from 1.");
    }

    #[test]
    fn last_representable_year_is_not_correlative() {
        let segs = [seg(1, 1, u32::MAX, 1.0), seg(2, 5, u32::MAX, 1.0)];
        let issues = validate(u32::MAX, 1.0, &segs);
        assert_eq!(issues, vec![ValidationIssue::NotCorrelative]);
    }

    #[test]
    fn gap_between_segments_is_not_correlative() {
        let segs = [seg(1, 1, 2, 8.0), seg(2, 4, 10, 12.0)];
        let issues = validate(10, 1000.0, &segs);
        assert_eq!(issues, vec![ValidationIssue::NotCorrelative]);
        assert!(issues[0].to_string().contains("correlative, with no gaps"));
    }

    #[test]
    fn overlap_is_reported_once() {
        let segs = [seg(1, 1, 4, 8.0), seg(2, 3, 6, 9.0), seg(3, 5, 10, 12.0)];
        let issues = validate(10, 1000.0, &segs);
        assert_eq!(issues, vec![ValidationIssue::NotCorrelative]);
    }

    #[test]
    fn coverage_reports_start_and_end_together() {
        let segs = [seg(1, 2, 4, 8.0)];
        let issues = validate(5, 1000.0, &segs);
        assert_eq!(
            issues,
            vec![
                ValidationIssue::FirstSegmentNotAtYearOne,
                ValidationIssue::LastSegmentNotAtHorizon { horizon: 5 },
            ]
        );
        assert_eq!(issues[1].to_string(), "The last segment must end at year 5.");
    }
}
