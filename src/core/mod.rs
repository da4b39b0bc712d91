mod editor;
mod engine;
mod normalize;
mod types;
mod validate;

pub use editor::{SegmentEditor, SegmentPatch};
pub use engine::{RateMap, build_ledger, build_rate_map, project, project_segments};
pub use normalize::{clamp_int, normalize_segments, to_num};
pub use types::{
    FieldInput, Ledger, MAX_HORIZON, MAX_SEGMENTS, MIN_HORIZON, ProjectionResult, RateBand,
    RawSegment, Segment, Totals, YearRow,
};
pub use validate::{ValidationIssue, validate};
