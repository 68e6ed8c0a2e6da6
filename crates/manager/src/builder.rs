//! Group construction.
//!
//! One build path serves toolbar groups and context menus: pre-flight
//! validation (duplicate id, parent chain), host group creation with the
//! reconciliation hint, icon resolution in the single form the host version
//! accepts, command-item creation in declared order with dispatch
//! registration, activation, and best-effort ribbon placement against the
//! root of the parent chain.

use std::rc::Rc;

use rivet_host::{CommandItemRequest, GroupIcons, ItemKinds, SelectionFilter};
use rivet_spec::{
	CommandGroupSpec, CommandSpec, CommandTarget, GroupId, Icon, IconError, IconResolver, UserId,
};

use crate::error::Error;
use crate::{CommandManager, GroupEntry, reconcile, tabs};

/// Separator joining parent titles into a nested menu path.
const SUB_GROUP_SEPARATOR: &str = "\\";

/// Parent chains deeper than this indicate a cyclic misconfiguration.
const MAX_GROUP_DEPTH: usize = 16;

/// Method names the host invokes back, wrapped around the wire key.
const CLICK_CALLBACK: &str = "on_command_click";
const ENABLE_CALLBACK: &str = "on_command_enable";

/// How a group is presented.
pub(crate) enum GroupKind {
	/// Regular toolbar/menu group.
	Toolbar,
	/// Context menu with a selection-type filter.
	ContextMenu(SelectionFilter),
}

impl CommandManager {
	pub(crate) fn build_group(
		&mut self,
		spec: CommandGroupSpec,
		kind: GroupKind,
	) -> Result<GroupId, Error> {
		if self.host.is_none() {
			return Err(Error::Disposed);
		}

		// Pre-flight checks: nothing below may touch the host until the
		// group id and parent chain are known to be valid.
		let id = match spec.explicit_id() {
			Some(id) => id,
			None => self.next_group_id(),
		};
		if self.groups.iter().any(|g| g.id == id) {
			return Err(Error::GroupIdAlreadyExists(id));
		}
		let path = self.menu_path(id, spec.title(), spec.parent_id())?;
		tracing::info!(group = %id, path = %path, "creating command group");

		let desired: Vec<UserId> = spec.commands().iter().map(|c| c.user_id()).collect();
		let is_context_menu = matches!(kind, GroupKind::ContextMenu(_));

		let handle = {
			let host = self.host.as_deref_mut().ok_or(Error::Disposed)?;
			match kind {
				GroupKind::ContextMenu(filter) => {
					let mut handle = host.create_context_menu(id, &path);
					handle.set_selection_filter(filter);
					handle
				}
				GroupKind::Toolbar => {
					let persisted = host.persisted_command_ids(id);
					let changed = reconcile::needs_rebuild(persisted.as_deref(), &desired);
					tracing::debug!(group = %id, changed, "persisted command ids reconciled");

					let (handle, status) =
						host.create_command_group(id, &path, spec.tooltip_text(), -1, changed);
					tracing::debug!(group = %id, %status, "command group creation status");
					if !status.is_success() {
						tracing::error!(group = %id, %status, "host rejected command group creation");
						return Err(Error::GroupCreationFailed { id, status });
					}
					handle
				}
			}
		};

		// Retained before item creation so teardown removes the group even
		// if a later command in it fails validation.
		self.groups.push(GroupEntry {
			id,
			title: spec.title().to_string(),
			path,
			parent: spec.parent_id(),
			handle,
			context_menu: is_context_menu,
		});
		let index = self.groups.len() - 1;

		let high_res = self
			.host
			.as_deref()
			.ok_or(Error::Disposed)?
			.supports_high_res_icons();
		let icons = resolve_group_icons(&mut *self.icons, high_res, spec.icon_ref(), spec.commands())?;
		self.groups[index].handle.assign_icons(icons);

		let mut created_items: Vec<(Rc<CommandSpec>, i32)> =
			Vec::with_capacity(spec.commands().len());
		for (image_index, cmd) in spec.commands().iter().enumerate() {
			let kinds = item_kinds(cmd).ok_or_else(|| Error::InvalidMenuToolbarOptions {
				group: id,
				user: cmd.user_id(),
				title: cmd.title().to_string(),
			})?;

			let target = CommandTarget::new(id, cmd.user_id());
			self.registry.register(target, Rc::clone(cmd))?;

			let handle = &mut self.groups[index].handle;
			if cmd.has_spacer() {
				handle.add_spacer(-1, kinds);
			}

			let request = CommandItemRequest {
				name: cmd.title().to_string(),
				position: -1,
				hint: cmd.title().to_string(),
				tooltip: cmd.tooltip_text().to_string(),
				image_list_index: image_index as i32,
				click_callback: format!("{CLICK_CALLBACK}({target})"),
				enable_callback: format!("{ENABLE_CALLBACK}({target})"),
				user_id: cmd.user_id(),
				kinds,
			};
			let item_index = handle.add_command_item(&request);
			tracing::debug!(group = %id, user = %cmd.user_id(), item_index, "created command item");
			created_items.push((Rc::clone(cmd), item_index));
		}

		{
			let handle = &mut self.groups[index].handle;
			handle.enable_menu(true);
			handle.enable_toolbar(true);
			handle.activate();
		}

		// Item indices become final command ids only after activation.
		let created: Vec<(Rc<CommandSpec>, i32)> = {
			let handle = &self.groups[index].handle;
			created_items
				.into_iter()
				.map(|(cmd, item)| {
					let command_id = handle.command_id(item);
					(cmd, command_id)
				})
				.collect()
		};

		let root_name = self.root_path(id)?;
		let host = self.host.as_deref_mut().ok_or(Error::Disposed)?;
		if let Err(err) = tabs::sync_tab_boxes(host, &root_name, &created) {
			// Ribbon placement is cosmetic; never aborts group creation.
			tracing::warn!(group = %id, %err, "tab box synchronization failed");
		}

		Ok(id)
	}

	/// Next free group id: highest existing plus one, zero when no groups
	/// exist.
	fn next_group_id(&self) -> GroupId {
		GroupId(self.groups.iter().map(|g| g.id.get()).max().map_or(0, |max| max + 1))
	}

	/// Full menu path for a group: parent titles root to leaf, joined with
	/// the sub-group separator, own title last.
	fn menu_path(&self, id: GroupId, title: &str, parent: Option<GroupId>) -> Result<String, Error> {
		let mut segments = vec![title.to_string()];
		let mut current = parent;
		let mut depth = 0usize;

		while let Some(parent_id) = current {
			depth += 1;
			if depth > MAX_GROUP_DEPTH {
				return Err(Error::GroupChainTooDeep(id));
			}

			let entry = self
				.groups
				.iter()
				.find(|g| g.id == parent_id)
				.ok_or(Error::UnknownParentGroup { id, parent: parent_id })?;
			segments.push(entry.title.clone());
			current = entry.parent;
		}

		segments.reverse();
		Ok(segments.join(SUB_GROUP_SEPARATOR))
	}

	/// Menu path of the root of a group's parent chain; ribbon tabs hang
	/// off the root group's name.
	fn root_path(&self, id: GroupId) -> Result<String, Error> {
		let mut current = id;

		for _ in 0..=MAX_GROUP_DEPTH {
			let entry = self
				.groups
				.iter()
				.find(|g| g.id == current)
				.ok_or(Error::UnknownParentGroup { id, parent: current })?;
			match entry.parent {
				Some(parent) => current = parent,
				None => return Ok(entry.path.clone()),
			}
		}

		Err(Error::GroupChainTooDeep(id))
	}
}

/// Menu/toolbar placement mask for one command; `None` when the command
/// enables neither and cannot be placed.
fn item_kinds(cmd: &CommandSpec) -> Option<ItemKinds> {
	let mut kinds = ItemKinds::empty();
	if cmd.has_menu() {
		kinds |= ItemKinds::MENU;
	}
	if cmd.has_toolbar() {
		kinds |= ItemKinds::TOOLBAR;
	}
	(!kinds.is_empty()).then_some(kinds)
}

/// Resolves the group's icons in exactly one of the two host forms.
///
/// The per-command strip is rendered only when at least one command
/// declares its own icon (commands without one fall back to the group
/// icon); otherwise the main icon output is reused for the command slot.
fn resolve_group_icons(
	resolver: &mut dyn IconResolver,
	high_res: bool,
	main: &Icon,
	commands: &[Rc<CommandSpec>],
) -> Result<GroupIcons, IconError> {
	let per_command: Option<Vec<Icon>> = commands
		.iter()
		.any(|c| c.icon_ref().is_some())
		.then(|| {
			commands
				.iter()
				.map(|c| c.icon_ref().cloned().unwrap_or_else(|| main.clone()))
				.collect()
		});

	if high_res {
		let main_list = resolver.icon_list(main)?;
		let command_list = match &per_command {
			Some(icons) => resolver.icon_list_batch(icons)?,
			None => main_list.clone(),
		};
		Ok(GroupIcons::HighRes { main: main_list, commands: command_list })
	} else {
		let main_files = resolver.legacy_files(main)?;
		let command_files = match &per_command {
			Some(icons) => resolver.legacy_files_batch(icons)?,
			None => main_files.clone(),
		};
		Ok(GroupIcons::Legacy { main: main_files, commands: command_files })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn item_kinds_maps_flags_to_host_mask() {
		let both = CommandSpec::new(UserId(1), "both", || {});
		assert_eq!(item_kinds(&both), Some(ItemKinds::MENU | ItemKinds::TOOLBAR));

		let menu_only = CommandSpec::new(UserId(2), "menu", || {}).toolbar(false);
		assert_eq!(item_kinds(&menu_only), Some(ItemKinds::MENU));

		let toolbar_only = CommandSpec::new(UserId(3), "toolbar", || {}).menu(false);
		assert_eq!(item_kinds(&toolbar_only), Some(ItemKinds::TOOLBAR));

		let neither = CommandSpec::new(UserId(4), "neither", || {})
			.menu(false)
			.toolbar(false);
		assert_eq!(item_kinds(&neither), None);
	}
}
