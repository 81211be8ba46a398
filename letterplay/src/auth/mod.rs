//! Caller identification.
//!
//! LetterPlay does not authenticate users itself. It runs behind a proxy that has already
//! done so and forwards the username in a trusted header (`x-letterplay-user` by default,
//! see [`crate::config::ProxyHeaderAuthConfig`]). The [`CurrentUser`](crate::api::models::users::CurrentUser)
//! extractor resolves that username to a row in `users`:
//!
//! ```ignore
//! async fn handler(current_user: CurrentUser) -> String {
//!     format!("Hello, {}!", current_user.username)
//! }
//! ```
//!
//! A missing header or an unknown username is rejected with 401. Users are never created here.

pub mod current_user;
