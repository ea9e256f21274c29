//! Report assembly: every analysis over one dataset snapshot, bundled into
//! a single immutable value.

pub mod assembler;
pub mod types;

pub use assembler::ReportAssembler;
pub use types::{RankedGroup, Report};
