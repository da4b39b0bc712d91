use super::types::{FieldInput, RawSegment, Segment};

/// Coerces a field to a finite number. Accepts `,` as decimal separator;
/// blank or unparseable input and non-finite results collapse to 0.
pub fn to_num(value: &FieldInput) -> f64 {
    let parsed = match value {
        FieldInput::Empty => 0.0,
        FieldInput::Number(n) => *n,
        FieldInput::Text(text) => parse_decimal(text),
    };
    if parsed.is_finite() { parsed } else { 0.0 }
}

fn parse_decimal(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    // Only the first comma is a decimal separator; "1,5,0" stays invalid.
    trimmed.replacen(',', ".", 1).parse::<f64>().unwrap_or(0.0)
}

/// Truncates toward zero and clamps into `[min, max]`.
pub fn clamp_int(value: &FieldInput, min: u32, max: u32) -> u32 {
    let n = to_num(value).trunc();
    n.clamp(min as f64, max as f64) as u32
}

pub fn normalize_segments(raw: &[RawSegment], horizon: u32) -> Vec<Segment> {
    let mut cleaned = raw
        .iter()
        .filter(|s| !(s.from.is_empty() && s.to.is_empty() && s.rate.is_empty()))
        .map(|s| Segment {
            id: s.id,
            from: (!s.from.is_empty()).then(|| clamp_int(&s.from, 1, horizon)),
            to: (!s.to.is_empty()).then(|| clamp_int(&s.to, 1, horizon)),
            rate: (!s.rate.is_empty()).then(|| to_num(&s.rate)),
        })
        .collect::<Vec<_>>();

    // Stable, so rows sharing a start year keep their entry order.
    cleaned.sort_by_key(|s| s.from.unwrap_or(0));
    cleaned
}
