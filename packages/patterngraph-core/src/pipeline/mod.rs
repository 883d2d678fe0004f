//! Analysis run orchestration

pub mod session;

pub use session::AnalysisSession;
