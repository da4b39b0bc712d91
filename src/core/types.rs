use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

pub const MIN_HORIZON: u32 = 1;
pub const MAX_HORIZON: u32 = 80;
pub const MAX_SEGMENTS: usize = 3;

/// A user-entered field as it arrives from a form, a CLI flag or JSON.
///
/// `Empty` and `Text("")` both mean the field is unset. Anything else is
/// coerced to a number during normalization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldInput {
    #[default]
    Empty,
    Number(f64),
    Text(String),
}

impl FieldInput {
    pub fn is_empty(&self) -> bool {
        match self {
            FieldInput::Empty => true,
            FieldInput::Text(text) => text.is_empty(),
            FieldInput::Number(_) => false,
        }
    }
}

impl From<f64> for FieldInput {
    fn from(value: f64) -> Self {
        FieldInput::Number(value)
    }
}

impl From<u32> for FieldInput {
    fn from(value: u32) -> Self {
        FieldInput::Number(value as f64)
    }
}

impl From<&str> for FieldInput {
    fn from(value: &str) -> Self {
        FieldInput::Text(value.to_string())
    }
}

/// A segment row exactly as edited, before normalization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawSegment {
    pub id: u32,
    pub from: FieldInput,
    pub to: FieldInput,
    pub rate: FieldInput,
}

impl RawSegment {
    pub fn new(
        id: u32,
        from: impl Into<FieldInput>,
        to: impl Into<FieldInput>,
        rate: impl Into<FieldInput>,
    ) -> Self {
        Self {
            id,
            from: from.into(),
            to: to.into(),
            rate: rate.into(),
        }
    }
}

/// A normalized segment. `None` marks a field the user left blank.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub id: u32,
    pub from: Option<u32>,
    pub to: Option<u32>,
    pub rate: Option<f64>,
}

impl Segment {
    pub fn band(&self) -> Option<RateBand> {
        Some(RateBand {
            from: self.from?,
            to: self.to?,
            rate_pct: self.rate?,
        })
    }
}

/// A fully populated year range sharing one annual rate in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateBand {
    pub from: u32,
    pub to: u32,
    pub rate_pct: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearRow {
    pub year: u32,
    pub rate_pct: f64,
    pub contribution: f64,
    pub principal: f64,
    pub interest: f64,
    pub balance: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub contributed: f64,
    pub interest: f64,
    #[serde(rename = "final")]
    pub final_balance: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    pub rows: Vec<YearRow>,
    pub totals: Totals,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProjectionResult {
    Invalid { errors: Vec<String> },
    Valid(Ledger),
}

impl ProjectionResult {
    pub fn is_ok(&self) -> bool {
        matches!(self, ProjectionResult::Valid(_))
    }

    pub fn errors(&self) -> &[String] {
        match self {
            ProjectionResult::Invalid { errors } => errors,
            ProjectionResult::Valid(_) => &[],
        }
    }

    pub fn ledger(&self) -> Option<&Ledger> {
        match self {
            ProjectionResult::Valid(ledger) => Some(ledger),
            ProjectionResult::Invalid { .. } => None,
        }
    }
}

// Serialized with a boolean `ok` discriminant and all four keys present,
// so a consumer can read `rows`/`totals` without branching.
impl Serialize for ProjectionResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ProjectionResult::Invalid { errors } => {
                serialize_projection(serializer, false, errors, &[], Totals::default())
            }
            ProjectionResult::Valid(ledger) => {
                serialize_projection(serializer, true, &[], &ledger.rows, ledger.totals)
            }
        }
    }
}

fn serialize_projection<S: Serializer>(
    serializer: S,
    ok: bool,
    errors: &[String],
    rows: &[YearRow],
    totals: Totals,
) -> Result<S::Ok, S::Error> {
    let mut state = serializer.serialize_struct("ProjectionResult", 4)?;
    state.serialize_field("ok", &ok)?;
    state.serialize_field("errors", errors)?;
    state.serialize_field("rows", rows)?;
    state.serialize_field("totals", &totals)?;
    state.end()
}
