//! Host application boundary.
//!
//! Everything the command manager asks of the CAD host goes through the
//! object-safe traits here: [`CommandHost`] for the application-level
//! surface, [`HostCommandGroup`] for a created toolbar/menu group,
//! [`HostCommandTab`] / [`HostTabBox`] for ribbon placement.
//!
//! Host calls render UI and are irreversible once made; callers are expected
//! to finish all pre-flight validation before touching these traits. The
//! host persists assigned command ids between sessions and exposes them
//! read-only through [`CommandHost::persisted_command_ids`]; this module
//! never writes that registry back.
//!
//! The `test-support` feature adds [`mock`], a scripted in-memory host with
//! a recorded mutation log.

use std::fmt;

use rivet_spec::{DocumentType, GroupId, IconFiles, IconList, UserId};

#[cfg(feature = "test-support")]
pub mod mock;

/// Outcome of a host command-group creation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupCreateStatus {
	/// The group was created and will be rendered.
	Success,
	/// The host rejected the group.
	Failed,
}

impl GroupCreateStatus {
	/// Returns true for [`GroupCreateStatus::Success`].
	pub fn is_success(self) -> bool {
		self == Self::Success
	}

	/// Host integer code for this status.
	pub const fn as_host_code(self) -> i32 {
		match self {
			Self::Success => 0,
			Self::Failed => 1,
		}
	}
}

impl fmt::Display for GroupCreateStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Success => f.write_str("success"),
			Self::Failed => f.write_str("failed"),
		}
	}
}

/// Selection-type filter applied to a context-menu group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionFilter {
	/// Shown for any selection.
	#[default]
	Everything,
	/// Shown for edge selections.
	Edges,
	/// Shown for face selections.
	Faces,
	/// Shown for vertex selections.
	Vertices,
	/// Shown for component selections.
	Components,
}

impl SelectionFilter {
	/// Host integer code for this filter.
	pub const fn as_host_code(self) -> i32 {
		match self {
			Self::Everything => -1,
			Self::Edges => 1,
			Self::Faces => 2,
			Self::Vertices => 3,
			Self::Components => 20,
		}
	}
}

bitflags::bitflags! {
	/// Where a command item is placed within its group.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
	pub struct ItemKinds: i32 {
		/// Menu entry.
		const MENU = 1 << 0;
		/// Toolbar button.
		const TOOLBAR = 1 << 1;
	}
}

/// Icon assignment for a created group, in exactly one of the two forms the
/// host accepts.
///
/// Newer host versions take resolution-independent lists; older versions
/// take fixed small/large bitmap strips. The form is chosen once per group
/// from [`CommandHost::supports_high_res_icons`] and the slots of the other
/// form stay empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupIcons {
	/// Resolution-independent lists for the group icon and the per-command
	/// strip.
	HighRes {
		/// Main group icon list.
		main: IconList,
		/// Per-command icon strip list.
		commands: IconList,
	},
	/// Legacy small/large paths for the group icon and the per-command strip.
	Legacy {
		/// Main group icon files.
		main: IconFiles,
		/// Per-command strip files.
		commands: IconFiles,
	},
}

/// Parameters for creating one command item inside a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandItemRequest {
	/// Item display name.
	pub name: String,
	/// Position within the group; -1 appends.
	pub position: i32,
	/// Status-bar hint.
	pub hint: String,
	/// Tooltip text.
	pub tooltip: String,
	/// Index into the group's per-command icon strip.
	pub image_list_index: i32,
	/// Callback identifier string the host invokes on click.
	pub click_callback: String,
	/// Callback identifier string the host invokes for enable queries.
	pub enable_callback: String,
	/// Caller-assigned command id suffix.
	pub user_id: UserId,
	/// Menu/toolbar placement.
	pub kinds: ItemKinds,
}

/// Application-level host surface.
pub trait CommandHost {
	/// Whether this host version accepts resolution-independent icon lists.
	fn supports_high_res_icons(&self) -> bool;

	/// Command ids the host recorded for this group in a previous session,
	/// or `None` if no snapshot exists.
	fn persisted_command_ids(&self, group: GroupId) -> Option<Vec<i32>>;

	/// Creates a toolbar/menu command group.
	///
	/// `changed` hints whether the host should discard its cached layout for
	/// this group id. Rendering is irreversible once this returns.
	fn create_command_group(
		&mut self,
		group: GroupId,
		title: &str,
		tooltip: &str,
		position: i32,
		changed: bool,
	) -> (Box<dyn HostCommandGroup>, GroupCreateStatus);

	/// Creates a context-menu command group.
	fn create_context_menu(&mut self, group: GroupId, title: &str) -> Box<dyn HostCommandGroup>;

	/// Fetches the existing ribbon command tab for a document type and group
	/// name.
	fn command_tab(&mut self, doc: DocumentType, name: &str) -> Option<Box<dyn HostCommandTab>>;

	/// Creates a ribbon command tab for a document type and group name.
	fn add_command_tab(&mut self, doc: DocumentType, name: &str)
	-> Option<Box<dyn HostCommandTab>>;

	/// Removes a command group by id during teardown.
	fn remove_command_group(&mut self, group: GroupId);
}

/// A created command group.
pub trait HostCommandGroup {
	/// Sets the selection-type filter; context-menu groups only.
	fn set_selection_filter(&mut self, filter: SelectionFilter);

	/// Assigns the group and per-command icons.
	fn assign_icons(&mut self, icons: GroupIcons);

	/// Inserts a spacer; -1 appends.
	fn add_spacer(&mut self, position: i32, kinds: ItemKinds);

	/// Creates a command item and returns its item index within the group.
	fn add_command_item(&mut self, request: &CommandItemRequest) -> i32;

	/// Final host-assigned numeric command id for an item index.
	fn command_id(&self, index: i32) -> i32;

	/// Toggles menu presentation for the whole group.
	fn enable_menu(&mut self, enabled: bool);

	/// Toggles toolbar presentation for the whole group.
	fn enable_toolbar(&mut self, enabled: bool);

	/// Makes the host render the group.
	fn activate(&mut self);
}

/// A ribbon command tab for one document type.
pub trait HostCommandTab {
	/// Existing tab boxes in this tab.
	fn boxes(&mut self) -> Vec<Box<dyn HostTabBox>>;

	/// Appends a new empty tab box.
	fn add_box(&mut self) -> Box<dyn HostTabBox>;
}

/// A ribbon tab box: an ordered run of command buttons.
pub trait HostTabBox {
	/// Current contents as parallel (command id, text-style code) arrays.
	fn commands(&self) -> (Vec<i32>, Vec<i32>);

	/// Appends commands; returns false if the host rejects them.
	fn add_commands(&mut self, ids: &[i32], styles: &[i32]) -> bool;

	/// Removes the listed commands.
	fn remove_commands(&mut self, ids: &[i32]);
}
