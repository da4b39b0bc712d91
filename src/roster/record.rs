use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Investor {
    pub id: u64,
    pub code: u32,
    pub name: String,
    pub capital: f64,
    pub maintenance: f64,
    pub active: bool,
}

/// Field-wise update. Deactivation is `active: Some(false)`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InvestorPatch {
    pub name: Option<String>,
    pub capital: Option<f64>,
    pub maintenance: Option<f64>,
    pub active: Option<bool>,
}

impl InvestorPatch {
    pub fn active(active: bool) -> Self {
        Self {
            active: Some(active),
            ..Self::default()
        }
    }

    pub(crate) fn apply(self, record: &mut Investor) {
        if let Some(name) = self.name {
            record.name = name;
        }
        if let Some(capital) = self.capital {
            record.capital = finite_or_zero(capital);
        }
        if let Some(maintenance) = self.maintenance {
            record.maintenance = finite_or_zero(maintenance);
        }
        if let Some(active) = self.active {
            record.active = active;
        }
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}
