//! Gift-request dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! structured parameters (code + recipient, from the upstream extractor)
//!     → types.rs (non-emptiness validation)
//!     → orchestrator.rs (validated config + chain session + submission)
//!     → contract.rs (call encoding, shape selected by secrets reference)
//!     → response.rs (agent reply: text + structured payload)
//! ```
//!
//! # Design Decisions
//! - Configuration and parameter errors are detected before any network
//!   call and never retried
//! - Submission errors are classified, not retried; a nonce error tells the
//!   caller to rebuild and resubmit

pub mod contract;
pub mod orchestrator;
pub mod response;
pub mod types;

pub use orchestrator::{GiftCallSender, GiftOrchestrator, RegistrySender, SubmitFault};
pub use response::{failure_reply, success_reply, GiftReply, ReplyContent};
pub use types::{classify_submission_error, GiftError, GiftRequestParams, GiftTransaction};
