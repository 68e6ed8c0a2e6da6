use std::rc::Rc;

use crate::command::CommandSpec;
use crate::icon::Icon;
use crate::target::GroupId;

/// Immutable descriptor for a command group: a toolbar/menu or a context
/// menu of related commands.
///
/// Groups form a tree through `parent` id references for nested sub-menus;
/// the parent is stored as an id, never as an owning pointer, so cycles
/// cannot keep anything alive and are detected by the manager's depth guard.
#[derive(Debug)]
pub struct CommandGroupSpec {
	id: Option<GroupId>,
	title: String,
	tooltip: String,
	icon: Icon,
	parent: Option<GroupId>,
	commands: Vec<Rc<CommandSpec>>,
}

impl CommandGroupSpec {
	/// Creates a group with the given title and main icon.
	///
	/// Without an explicit [`id`](Self::id) the manager auto-assigns the next
	/// free group id on registration.
	pub fn new(title: impl Into<String>, icon: Icon) -> Self {
		let title = title.into();
		Self {
			id: None,
			tooltip: title.clone(),
			title,
			icon,
			parent: None,
			commands: Vec::new(),
		}
	}

	/// Pins the group to an explicit id.
	pub fn id(mut self, id: GroupId) -> Self {
		self.id = Some(id);
		self
	}

	/// Sets the tooltip text.
	pub fn tooltip(mut self, tooltip: impl Into<String>) -> Self {
		self.tooltip = tooltip.into();
		self
	}

	/// Nests this group under an already-registered parent group.
	pub fn parent(mut self, parent: GroupId) -> Self {
		self.parent = Some(parent);
		self
	}

	/// Appends a command; declaration order is presentation order.
	pub fn command(mut self, command: CommandSpec) -> Self {
		self.commands.push(Rc::new(command));
		self
	}

	/// Explicit id, if pinned.
	pub fn explicit_id(&self) -> Option<GroupId> {
		self.id
	}

	/// Display title (single segment; the manager joins parent titles into
	/// the full menu path).
	pub fn title(&self) -> &str {
		&self.title
	}

	/// Tooltip text.
	pub fn tooltip_text(&self) -> &str {
		&self.tooltip
	}

	/// Main group icon.
	pub fn icon_ref(&self) -> &Icon {
		&self.icon
	}

	/// Parent group id, if nested.
	pub fn parent_id(&self) -> Option<GroupId> {
		self.parent
	}

	/// Declared commands in order.
	pub fn commands(&self) -> &[Rc<CommandSpec>] {
		&self.commands
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::target::UserId;

	#[test]
	fn declaration_order_is_preserved() {
		let group = CommandGroupSpec::new("Tools", Icon::new("tools.png"))
			.command(CommandSpec::new(UserId(2), "Second", || {}))
			.command(CommandSpec::new(UserId(1), "First", || {}));

		let ids: Vec<_> = group.commands().iter().map(|c| c.user_id()).collect();
		assert_eq!(ids, [UserId(2), UserId(1)]);
	}

	#[test]
	fn tooltip_defaults_to_title() {
		let group = CommandGroupSpec::new("Tools", Icon::new("tools.png"));
		assert_eq!(group.tooltip_text(), "Tools");
		assert_eq!(group.explicit_id(), None);
		assert_eq!(group.parent_id(), None);
	}
}
