pub mod probe;

pub use probe::ProbeUseCase;
