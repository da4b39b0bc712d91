mod form;
mod record;
mod store;
mod summary;

pub use form::{FormErrors, InvestorForm, validate_form};
pub use record::{Investor, InvestorPatch};
pub use store::{MemoryStore, RecordStore, StoreError};
pub use summary::{Participation, ParticipationTotals, Share, participation};
