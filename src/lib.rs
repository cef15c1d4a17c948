//! Gate rendering of a piece of content behind a feature-flag cookie.
//!
//! A flag is enabled when a cookie with its name is present and carries a
//! non-empty value. The value's content is not interpreted: `"false"` is
//! enabled, because the check is cookie presence, not boolean parsing.
//!
//! [`FlagGate`] works in two modes, fixed at mount by whether the raw
//! `Cookie` header is supplied:
//!
//! - **Server**: the header is passed in ([`FlagQuery::server`], fed by the
//!   [`CookieHeader`] extractor in axum handlers) and the gate resolves
//!   synchronously during the mounting pass.
//!
//! ```
//! use feature_flag_gate::{FlagGate, FlagQuery};
//!
//! let query = FlagQuery::server("beta-banner", "beta-banner=on; theme=dark");
//! let gate = FlagGate::mount(query, "<banner>", None);
//!
//! assert_eq!(gate.render(), Some(&"<banner>"));
//! ```
//!
//! - **Client**: no header ([`FlagQuery::client`]); the gate renders nothing
//!   first and schedules a task that reads an ambient [`CookieSource`] on the
//!   next tick of the current thread's `LocalSet`. Nothing is ever shown and
//!   then retracted; flagged content appears late instead.
//!
//! ```
//! use feature_flag_gate::{FlagGate, FlagQuery, SharedCookieSource};
//!
//! # async fn hydrate() {
//! let jar = SharedCookieSource::with_cookies("beta-banner=on");
//! let gate = FlagGate::mount(FlagQuery::client("beta-banner"), "<banner>", Some(jar.handle()));
//!
//! assert_eq!(gate.render(), None); // first pass, always
//! tokio::task::yield_now().await;
//! assert_eq!(gate.render(), Some(&"<banner>"));
//! # }
//! ```

pub mod evaluation;
pub mod extract;
pub mod gate;
pub mod source;

pub use evaluation::resolve_flag;
pub use extract::CookieHeader;
pub use gate::lifecycle::FlagGate;
pub use gate::{validate_flag_name, FlagQuery, Resolution};
pub use source::{CookieSource, SharedCookieSource};
