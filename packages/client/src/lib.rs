//! REST client and editing workflow for the console system settings record.
//!
//! [`SettingsClient`] speaks the console's `/system/setting` API; the
//! [`SettingsEditor`] on top of it owns the draft state and implements the
//! load / validate / submit / reset workflow of the admin settings page.

pub mod client;
pub mod editor;
pub mod error;

pub use client::SettingsClient;
pub use editor::{EditorError, EditorState, Notice, SettingsEditor};
pub use error::{ClientError, ClientResult};
