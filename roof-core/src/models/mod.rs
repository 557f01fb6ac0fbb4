mod estimate;
mod lead;
mod material;
mod project;
mod quote;
mod record_id;

pub use estimate::{EstimateInput, EstimateResult, PitchCategory, SolarDetachReset};
pub use lead::{Lead, LeadStatus, NewLead};
pub use material::MaterialProduct;
pub use project::{NewProject, Project, ProjectStatus};
pub use quote::{NewQuote, Quote, QuoteStatus};
pub use record_id::{RecordPrefix, next_record_id};
