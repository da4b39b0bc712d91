use super::engine::project;
use super::normalize::{clamp_int, to_num};
use super::types::{
    FieldInput, MAX_HORIZON, MAX_SEGMENTS, MIN_HORIZON, ProjectionResult, RawSegment,
};

/// Partial update for one segment row; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SegmentPatch {
    pub from: Option<FieldInput>,
    pub to: Option<FieldInput>,
    pub rate: Option<FieldInput>,
}

/// Editing session for a projection: horizon, contribution and up to
/// three segment rows. The last row's `to` always tracks the horizon.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentEditor {
    horizon: u32,
    contribution: FieldInput,
    segments: Vec<RawSegment>,
}

impl Default for SegmentEditor {
    fn default() -> Self {
        Self {
            horizon: 10,
            contribution: FieldInput::Number(1000.0),
            segments: vec![
                RawSegment::new(1, 1u32, 2u32, 8.0),
                RawSegment::new(2, 3u32, 5u32, 10.0),
                RawSegment::new(3, 6u32, 10u32, 12.0),
            ],
        }
    }
}

impl SegmentEditor {
    pub fn horizon(&self) -> u32 {
        self.horizon
    }

    pub fn contribution(&self) -> f64 {
        to_num(&self.contribution)
    }

    pub fn segments(&self) -> &[RawSegment] {
        &self.segments
    }

    /// Replaces every row at once, then re-applies the horizon lock.
    pub fn replace_segments(&mut self, segments: Vec<RawSegment>) {
        self.segments = segments;
        self.lock_last_to_horizon();
    }

    pub fn set_horizon(&mut self, raw: impl Into<FieldInput>) {
        let horizon = clamp_int(&raw.into(), MIN_HORIZON, MAX_HORIZON);
        self.horizon = horizon;

        for seg in &mut self.segments {
            if !seg.from.is_empty() {
                seg.from = clamp_int(&seg.from, 1, horizon).into();
            }
            if !seg.to.is_empty() {
                seg.to = clamp_int(&seg.to, 1, horizon).into();
            }
        }
        self.lock_last_to_horizon();
    }

    pub fn set_contribution(&mut self, raw: impl Into<FieldInput>) {
        self.contribution = raw.into();
    }

    /// Returns `false` when no row has `id`.
    pub fn update_segment(&mut self, id: u32, patch: SegmentPatch) -> bool {
        let last_index = self.segments.len().saturating_sub(1);
        let Some((index, seg)) = self
            .segments
            .iter_mut()
            .enumerate()
            .find(|(_, s)| s.id == id)
        else {
            return false;
        };

        if let Some(from) = patch.from {
            seg.from = from;
        }
        if let Some(to) = patch.to {
            if index == last_index {
                log::debug!("ignoring `to` edit on last segment {id}; it tracks the horizon");
            } else {
                seg.to = to;
            }
        }
        if let Some(rate) = patch.rate {
            seg.rate = rate;
        }
        true
    }

    /// Appends a row starting right after the current last one. No-op once
    /// the segment limit is reached.
    pub fn add_segment(&mut self) -> bool {
        if self.segments.len() >= MAX_SEGMENTS {
            return false;
        }

        let from = match self.segments.last() {
            Some(last) if !last.to.is_empty() => clamp_int(&last.to, 1, self.horizon) + 1,
            _ => 1,
        };
        self.segments.push(RawSegment {
            id: self.segments.len() as u32 + 1,
            from: from.into(),
            to: self.horizon.into(),
            rate: FieldInput::Empty,
        });
        true
    }

    /// Pops the last row; the final remaining row is never removed.
    pub fn remove_last_segment(&mut self) -> bool {
        if self.segments.len() <= 1 {
            return false;
        }
        self.segments.pop();
        self.lock_last_to_horizon();
        true
    }

    pub fn project(&self) -> ProjectionResult {
        project(self.horizon, self.contribution(), &self.segments)
    }

    fn lock_last_to_horizon(&mut self) {
        let horizon = self.horizon;
        if let Some(last) = self.segments.last_mut() {
            last.to = horizon.into();
        }
    }
}
