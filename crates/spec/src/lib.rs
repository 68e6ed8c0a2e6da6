//! Command and command-group descriptors.
//!
//! This crate provides the immutable descriptor types an add-in author uses
//! to declare UI commands:
//! - [`CommandSpec`] / [`CommandGroupSpec`]: what to present and how it behaves
//! - [`CommandTarget`]: the typed `(group, user)` dispatch key
//! - [`EnableState`]: the host's four-valued enable answer
//! - [`WorkspaceSet`] / [`DocumentType`]: where a command is available
//! - [`Icon`] and the [`IconResolver`] seam for converting logical icons into
//!   host-consumable bitmap paths
//!
//! Descriptors are built once during add-in connection and are read-only
//! afterwards; nothing in this crate talks to the host.

mod command;
mod group;
mod icon;
mod target;
mod workspace;

pub use command::{CommandSpec, EnableState, TabTextStyle};
pub use group::CommandGroupSpec;
pub use icon::{Icon, IconError, IconFiles, IconList, IconResolver};
pub use target::{CommandTarget, GroupId, ParseTargetError, UserId};
pub use workspace::{DocumentType, Workspace, WorkspaceSet};
