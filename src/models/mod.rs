pub mod cycle;
pub mod profile;
pub mod symptom;

pub use cycle::Cycle;
pub use profile::Profile;
pub use symptom::{NewSymptomLog, SymptomLog};
