pub mod observation;
pub mod terms;

pub use observation::ObservationStyle;
pub use terms::{parse_term, ProductTerms, ProductTermsBuilder};
