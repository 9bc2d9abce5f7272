//! Report Security
//!
//! Client-side protections applied before a report leaves the device:
//!
//! - **Submission guard** (`rate_limit`): per-user sliding-window throttle
//!   over locally persisted timestamps. A UX throttle, not an authority.
//! - **Storage** (`storage`): the [`KeyValueStore`] seam with in-memory and
//!   file-backed implementations.
//! - **Clock** (`clock`): injectable time source.
//! - **Sanitization** (`sanitize`): strips markup from free-text answers.
//!
//! ## Example
//!
//! ```rust
//! use report_security::{MemoryStore, RateLimitConfig, SubmissionGuard};
//!
//! let guard = SubmissionGuard::new(MemoryStore::new(), RateLimitConfig::default());
//! assert!(guard.can_submit("user-1").is_allowed);
//! guard.record_submission("user-1").unwrap();
//! ```

pub mod clock;
pub mod error;
pub mod rate_limit;
pub mod sanitize;
pub mod storage;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{Result, SecurityError};
pub use rate_limit::{RateLimitConfig, RateLimitInfo, SubmissionGuard, STORAGE_KEY_PREFIX};
pub use sanitize::{
    escape_html, remove_special_characters, sanitize_answers, sanitize_input,
    sanitize_questionnaire,
};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
