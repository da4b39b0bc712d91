use serde::Serialize;

use super::record::Investor;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipationTotals {
    pub capital: f64,
    pub maintenance: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Share {
    pub id: u64,
    pub code: u32,
    pub name: String,
    pub capital: f64,
    pub pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Participation {
    pub totals: ParticipationTotals,
    pub shares: Vec<Share>,
}

/// Sums active investors and computes each one's share of total capital.
/// Inactive records are ignored entirely.
pub fn participation(records: &[Investor]) -> Participation {
    let active = records.iter().filter(|r| r.active).collect::<Vec<_>>();

    let capital = active.iter().map(|r| r.capital).sum::<f64>();
    let maintenance = active.iter().map(|r| r.maintenance).sum::<f64>();

    let shares = active
        .iter()
        .map(|r| Share {
            id: r.id,
            code: r.code,
            name: r.name.clone(),
            capital: r.capital,
            pct: if capital > 0.0 {
                r.capital / capital * 100.0
            } else {
                0.0
            },
        })
        .collect();

    Participation {
        totals: ParticipationTotals {
            capital,
            maintenance,
            total: capital + maintenance,
        },
        shares,
    }
}
