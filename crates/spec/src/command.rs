use std::fmt;

use crate::icon::Icon;
use crate::target::UserId;
use crate::workspace::WorkspaceSet;

/// Four-valued enable answer for a command in the current host context.
///
/// Deliberately not a boolean: the host distinguishes the selected and
/// enabled axes independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnableState {
	/// Deselected and disabled; the most restrictive state.
	DeselectDisable,
	/// Deselected and enabled.
	DeselectEnable,
	/// Selected and disabled.
	SelectDisable,
	/// Selected and enabled.
	SelectEnable,
}

impl EnableState {
	/// Host integer code for this state.
	pub const fn as_host_code(self) -> i32 {
		match self {
			Self::DeselectDisable => 0,
			Self::DeselectEnable => 1,
			Self::SelectDisable => 2,
			Self::SelectEnable => 3,
		}
	}
}

/// How a command button renders its text inside a ribbon tab box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TabTextStyle {
	/// Icon only.
	NoText,
	/// Text to the right of the icon.
	TextHorizontal,
	/// Text below the icon.
	#[default]
	TextBelow,
}

impl TabTextStyle {
	/// Host integer code for this style.
	pub const fn as_host_code(self) -> i32 {
		match self {
			Self::NoText => 0,
			Self::TextHorizontal => 1,
			Self::TextBelow => 2,
		}
	}
}

/// Immutable descriptor for a single UI command.
///
/// Built once by the add-in author through the chained setters and read-only
/// afterwards. Defaults: tooltip mirrors the title, menu and toolbar
/// presentation both on, no spacer, no ribbon tab box, all workspaces, text
/// below the icon, always-enabled enable query.
pub struct CommandSpec {
	user_id: UserId,
	title: String,
	tooltip: String,
	icon: Option<Icon>,
	has_menu: bool,
	has_toolbar: bool,
	has_spacer: bool,
	has_tab_box: bool,
	workspace: WorkspaceSet,
	tab_text_style: TabTextStyle,
	on_click: Box<dyn Fn()>,
	on_enable: Box<dyn Fn() -> EnableState>,
}

impl CommandSpec {
	/// Creates a command with the given in-group id, title and click handler.
	pub fn new(user_id: UserId, title: impl Into<String>, on_click: impl Fn() + 'static) -> Self {
		let title = title.into();
		Self {
			user_id,
			tooltip: title.clone(),
			title,
			icon: None,
			has_menu: true,
			has_toolbar: true,
			has_spacer: false,
			has_tab_box: false,
			workspace: WorkspaceSet::ALL,
			tab_text_style: TabTextStyle::default(),
			on_click: Box::new(on_click),
			on_enable: Box::new(|| EnableState::DeselectEnable),
		}
	}

	/// Sets the tooltip text.
	pub fn tooltip(mut self, tooltip: impl Into<String>) -> Self {
		self.tooltip = tooltip.into();
		self
	}

	/// Sets an individual icon for this command.
	pub fn icon(mut self, icon: Icon) -> Self {
		self.icon = Some(icon);
		self
	}

	/// Enables or disables menu presentation.
	pub fn menu(mut self, has_menu: bool) -> Self {
		self.has_menu = has_menu;
		self
	}

	/// Enables or disables toolbar presentation.
	pub fn toolbar(mut self, has_toolbar: bool) -> Self {
		self.has_toolbar = has_toolbar;
		self
	}

	/// Emits a spacer immediately before this command.
	pub fn spacer(mut self) -> Self {
		self.has_spacer = true;
		self
	}

	/// Places this command in the ribbon tab box for its workspaces.
	pub fn tab_box(mut self, style: TabTextStyle) -> Self {
		self.has_tab_box = true;
		self.tab_text_style = style;
		self
	}

	/// Restricts the workspaces this command is available in.
	pub fn workspace(mut self, workspace: impl Into<WorkspaceSet>) -> Self {
		self.workspace = workspace.into();
		self
	}

	/// Sets the enable-state query handler.
	pub fn enable(mut self, on_enable: impl Fn() -> EnableState + 'static) -> Self {
		self.on_enable = Box::new(on_enable);
		self
	}

	/// In-group command id.
	pub fn user_id(&self) -> UserId {
		self.user_id
	}

	/// Display title.
	pub fn title(&self) -> &str {
		&self.title
	}

	/// Tooltip text.
	pub fn tooltip_text(&self) -> &str {
		&self.tooltip
	}

	/// Individual icon, if one was declared.
	pub fn icon_ref(&self) -> Option<&Icon> {
		self.icon.as_ref()
	}

	/// Whether this command appears in the menu.
	pub fn has_menu(&self) -> bool {
		self.has_menu
	}

	/// Whether this command appears in the toolbar.
	pub fn has_toolbar(&self) -> bool {
		self.has_toolbar
	}

	/// Whether a spacer precedes this command.
	pub fn has_spacer(&self) -> bool {
		self.has_spacer
	}

	/// Whether this command is placed in a ribbon tab box.
	pub fn has_tab_box(&self) -> bool {
		self.has_tab_box
	}

	/// Supported workspaces.
	pub fn workspace_set(&self) -> WorkspaceSet {
		self.workspace
	}

	/// Ribbon text display style.
	pub fn tab_text_style(&self) -> TabTextStyle {
		self.tab_text_style
	}

	/// Invokes the click handler.
	pub fn click(&self) {
		(self.on_click)();
	}

	/// Queries the current enable state.
	pub fn enable_state(&self) -> EnableState {
		(self.on_enable)()
	}
}

impl fmt::Debug for CommandSpec {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CommandSpec")
			.field("user_id", &self.user_id)
			.field("title", &self.title)
			.field("has_menu", &self.has_menu)
			.field("has_toolbar", &self.has_toolbar)
			.field("has_spacer", &self.has_spacer)
			.field("has_tab_box", &self.has_tab_box)
			.field("workspace", &self.workspace)
			.finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_follow_declaration_conventions() {
		let cmd = CommandSpec::new(UserId(1), "Open", || {});
		assert_eq!(cmd.tooltip_text(), "Open");
		assert!(cmd.has_menu());
		assert!(cmd.has_toolbar());
		assert!(!cmd.has_spacer());
		assert!(!cmd.has_tab_box());
		assert_eq!(cmd.workspace_set(), WorkspaceSet::ALL);
		assert_eq!(cmd.enable_state(), EnableState::DeselectEnable);
	}

	#[test]
	fn click_invokes_handler() {
		use std::cell::Cell;
		use std::rc::Rc;

		let hits = Rc::new(Cell::new(0));
		let counter = Rc::clone(&hits);
		let cmd = CommandSpec::new(UserId(1), "Hit", move || counter.set(counter.get() + 1));

		cmd.click();
		cmd.click();
		assert_eq!(hits.get(), 2);
	}

	#[test]
	fn host_codes_match_host_enumerations() {
		assert_eq!(EnableState::DeselectDisable.as_host_code(), 0);
		assert_eq!(EnableState::SelectEnable.as_host_code(), 3);
		assert_eq!(TabTextStyle::NoText.as_host_code(), 0);
		assert_eq!(TabTextStyle::TextHorizontal.as_host_code(), 1);
		assert_eq!(TabTextStyle::TextBelow.as_host_code(), 2);
	}
}
