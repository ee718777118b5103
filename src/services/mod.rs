pub mod diagnostics;
pub mod lookup;

pub use diagnostics::{Diagnostics, ProbeReport, ProbeTarget, SystemStatus};
pub use lookup::{AnimeLookup, LookupResult};
