//! resolve-probe 固有のドメイン型（型と不変条件）

pub mod command;
pub mod outcome;
pub mod project_name;

pub use command::ProbeCommand;
pub use outcome::Outcome;
pub use project_name::ProjectName;
