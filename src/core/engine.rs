use std::collections::BTreeMap;

use super::normalize::normalize_segments;
use super::types::{
    Ledger, MAX_HORIZON, MIN_HORIZON, ProjectionResult, RateBand, RawSegment, Segment, Totals,
    YearRow,
};
use super::validate::validate;

/// Year to annual rate, stored as a fraction (8% is `0.08`).
pub type RateMap = BTreeMap<u32, f64>;

#[derive(Debug, Clone, Copy, Default)]
struct LedgerState {
    balance: f64,
    contributed: f64,
    principal: f64,
    interest_total: f64,
}

impl LedgerState {
    // Contribution lands first, then the whole balance accrues.
    fn advance(&mut self, year: u32, contribution: f64, rate: f64) -> YearRow {
        self.balance += contribution;
        self.contributed += contribution;

        let interest = self.balance * rate;
        self.balance += interest;
        self.interest_total += interest;

        self.principal += contribution;

        YearRow {
            year,
            rate_pct: rate * 100.0,
            contribution,
            principal: self.principal,
            interest,
            balance: self.balance,
        }
    }

    fn totals(self) -> Totals {
        Totals {
            contributed: self.contributed,
            interest: self.interest_total,
            final_balance: self.balance,
        }
    }
}

/// Runs the full pipeline: normalize, validate, expand rates, build the
/// ledger. Pure; identical inputs always give identical output.
pub fn project(horizon: u32, contribution: f64, raw: &[RawSegment]) -> ProjectionResult {
    let horizon = horizon.clamp(MIN_HORIZON, MAX_HORIZON);
    let segs = normalize_segments(raw, horizon);
    project_segments(horizon, contribution, &segs)
}

/// Same as [`project`] for segments that are already normalized. The
/// horizon is still clamped to `[MIN_HORIZON, MAX_HORIZON]`.
pub fn project_segments(horizon: u32, contribution: f64, segs: &[Segment]) -> ProjectionResult {
    let horizon = horizon.clamp(MIN_HORIZON, MAX_HORIZON);
    let issues = validate(horizon, contribution, segs);
    if !issues.is_empty() {
        log::debug!("projection rejected with {} issue(s)", issues.len());
        return ProjectionResult::Invalid {
            errors: issues.iter().map(ToString::to_string).collect(),
        };
    }

    let bands = segs.iter().filter_map(Segment::band).collect::<Vec<_>>();
    let rates = build_rate_map(&bands);
    ProjectionResult::Valid(build_ledger(horizon, contribution, &rates))
}

/// Expands bands into one entry per covered year. Later bands overwrite
/// earlier ones where they overlap. Years past `MAX_HORIZON` are dropped.
pub fn build_rate_map(bands: &[RateBand]) -> RateMap {
    let mut rates = RateMap::new();
    for band in bands {
        for year in band.from..=band.to.min(MAX_HORIZON) {
            rates.insert(year, band.rate_pct / 100.0);
        }
    }
    rates
}

/// Walks years `1..=horizon`; a year missing from `rates` accrues at 0%.
/// `horizon` is capped at `MAX_HORIZON`.
pub fn build_ledger(horizon: u32, contribution: f64, rates: &RateMap) -> Ledger {
    let horizon = horizon.min(MAX_HORIZON);
    let mut state = LedgerState::default();
    let mut rows = Vec::with_capacity(horizon as usize);
    for year in 1..=horizon {
        let rate = rates.get(&year).copied().unwrap_or(0.0);
        rows.push(state.advance(year, contribution, rate));
    }

    Ledger {
        rows,
        totals: state.totals(),
    }
}
