//! Scripted in-memory host for tests.
//!
//! [`MockHost`] implements the boundary traits over shared
//! [`Rc<RefCell<MockState>>`] state so a test can keep a handle to the state
//! while the manager owns the host box. Every host *mutation* is appended to
//! [`MockState::mutations`]; read-only calls (persisted snapshot, tab fetch,
//! box contents) are not recorded, which makes idempotence assertions a
//! simple length comparison.

use std::cell::RefCell;
use std::rc::Rc;

use rivet_spec::{DocumentType, GroupId, UserId};
use rustc_hash::FxHashMap;

use crate::{
	CommandHost, CommandItemRequest, GroupCreateStatus, GroupIcons, HostCommandGroup,
	HostCommandTab, HostTabBox, ItemKinds, SelectionFilter,
};

/// One recorded host mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostMutation {
	/// `create_command_group` with the reconciliation hint it received.
	CreateGroup {
		/// Group id.
		group: GroupId,
		/// Layout-changed hint.
		changed: bool,
	},
	/// `create_context_menu`.
	CreateContextMenu {
		/// Group id.
		group: GroupId,
	},
	/// `assign_icons` on a group.
	AssignIcons {
		/// Group id.
		group: GroupId,
	},
	/// `add_spacer` on a group.
	AddSpacer {
		/// Group id.
		group: GroupId,
	},
	/// `add_command_item` on a group.
	AddItem {
		/// Group id.
		group: GroupId,
		/// Caller-assigned command id suffix.
		user: UserId,
	},
	/// `activate` on a group.
	Activate {
		/// Group id.
		group: GroupId,
	},
	/// `add_command_tab`.
	AddTab {
		/// Document type the tab belongs to.
		doc: DocumentType,
	},
	/// `add_box` on a tab.
	AddBox {
		/// Document type the tab belongs to.
		doc: DocumentType,
	},
	/// `add_commands` on a tab box.
	BoxAddCommands {
		/// Document type the tab belongs to.
		doc: DocumentType,
		/// Command ids added.
		ids: Vec<i32>,
	},
	/// `remove_commands` on a tab box.
	BoxRemoveCommands {
		/// Document type the tab belongs to.
		doc: DocumentType,
		/// Command ids removed.
		ids: Vec<i32>,
	},
	/// `remove_command_group` during teardown.
	RemoveGroup {
		/// Group id.
		group: GroupId,
	},
}

/// State of one created group.
#[derive(Debug)]
pub struct GroupRecord {
	/// Group id.
	pub id: GroupId,
	/// Title (full menu path) the host received.
	pub title: String,
	/// Tooltip the host received.
	pub tooltip: String,
	/// Reconciliation hint; `None` for context menus.
	pub changed_hint: Option<bool>,
	/// Whether this is a context-menu group.
	pub context_menu: bool,
	/// Selection filter, if one was set.
	pub selection_filter: Option<SelectionFilter>,
	/// Assigned icons, if any.
	pub icons: Option<GroupIcons>,
	/// Created items in order.
	pub items: Vec<CommandItemRequest>,
	/// Host-assigned command id per item index.
	pub command_ids: Vec<i32>,
	/// Item indices a spacer was inserted before.
	pub spacers: Vec<usize>,
	/// Menu presentation toggle.
	pub menu_enabled: bool,
	/// Toolbar presentation toggle.
	pub toolbar_enabled: bool,
	/// Whether the group was activated.
	pub activated: bool,
}

/// State of one tab box.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BoxRecord {
	/// Command ids in order.
	pub ids: Vec<i32>,
	/// Text-style codes parallel to `ids`.
	pub styles: Vec<i32>,
}

/// State of one ribbon tab.
#[derive(Debug)]
pub struct TabRecord {
	/// Document type this tab belongs to.
	pub doc: DocumentType,
	/// Group name the tab was created for.
	pub name: String,
	/// Tab boxes in order.
	pub boxes: Vec<BoxRecord>,
}

/// Shared scripted host state.
#[derive(Debug, Default)]
pub struct MockState {
	/// Scripted high-resolution icon capability.
	pub high_res: bool,
	/// Scripted persisted command-id snapshots per group id.
	pub persisted: FxHashMap<i32, Vec<i32>>,
	/// Fail the next and all following group creations.
	pub fail_group_creation: bool,
	/// Make `add_command_tab` return no handle.
	pub deny_tabs: bool,
	/// Make tab boxes reject `add_commands`.
	pub reject_tab_commands: bool,
	/// Every recorded mutation, in call order.
	pub mutations: Vec<HostMutation>,
	/// Created groups, in creation order.
	pub groups: Vec<GroupRecord>,
	/// Created tabs, in creation order.
	pub tabs: Vec<TabRecord>,
	/// Group ids removed during teardown, in call order.
	pub removed_groups: Vec<GroupId>,
	next_command_id: i32,
}

impl MockState {
	/// Mutations recorded so far; idempotence checks diff this count.
	pub fn mutation_count(&self) -> usize {
		self.mutations.len()
	}

	/// The record for a group id; panics if the group was never created.
	pub fn group(&self, id: GroupId) -> &GroupRecord {
		self.groups
			.iter()
			.find(|g| g.id == id)
			.unwrap_or_else(|| panic!("no group {id} was created"))
	}

	/// The tab for a document type and name, if created or seeded.
	pub fn tab(&self, doc: DocumentType, name: &str) -> Option<&TabRecord> {
		self.tabs.iter().find(|t| t.doc == doc && t.name == name)
	}

	fn position(&self, doc: DocumentType, name: &str) -> Option<usize> {
		self.tabs.iter().position(|t| t.doc == doc && t.name == name)
	}
}

/// Scripted in-memory host.
#[derive(Debug, Default)]
pub struct MockHost {
	state: Rc<RefCell<MockState>>,
}

impl MockHost {
	/// Creates a host with default scripting: no high-res support, no
	/// persisted snapshots, everything succeeds.
	pub fn new() -> Self {
		Self::default()
	}

	/// Handle to the shared state for scripting and assertions.
	pub fn state(&self) -> Rc<RefCell<MockState>> {
		Rc::clone(&self.state)
	}

	/// Scripts the high-resolution icon capability.
	pub fn high_res(self, supported: bool) -> Self {
		self.state.borrow_mut().high_res = supported;
		self
	}

	/// Seeds a persisted command-id snapshot for a group id.
	pub fn persisted(self, group: GroupId, ids: Vec<i32>) -> Self {
		self.state.borrow_mut().persisted.insert(group.get(), ids);
		self
	}

	/// Seeds an existing ribbon tab with pre-populated boxes.
	pub fn seeded_tab(self, doc: DocumentType, name: &str, boxes: Vec<BoxRecord>) -> Self {
		self.state.borrow_mut().tabs.push(TabRecord {
			doc,
			name: name.to_string(),
			boxes,
		});
		self
	}
}

impl CommandHost for MockHost {
	fn supports_high_res_icons(&self) -> bool {
		self.state.borrow().high_res
	}

	fn persisted_command_ids(&self, group: GroupId) -> Option<Vec<i32>> {
		self.state.borrow().persisted.get(&group.get()).cloned()
	}

	fn create_command_group(
		&mut self,
		group: GroupId,
		title: &str,
		tooltip: &str,
		_position: i32,
		changed: bool,
	) -> (Box<dyn HostCommandGroup>, GroupCreateStatus) {
		let mut state = self.state.borrow_mut();
		state.mutations.push(HostMutation::CreateGroup { group, changed });

		let status = if state.fail_group_creation {
			GroupCreateStatus::Failed
		} else {
			GroupCreateStatus::Success
		};

		let index = state.groups.len();
		state.groups.push(GroupRecord {
			id: group,
			title: title.to_string(),
			tooltip: tooltip.to_string(),
			changed_hint: Some(changed),
			context_menu: false,
			selection_filter: None,
			icons: None,
			items: Vec::new(),
			command_ids: Vec::new(),
			spacers: Vec::new(),
			menu_enabled: false,
			toolbar_enabled: false,
			activated: false,
		});
		drop(state);

		(
			Box::new(MockGroup {
				state: Rc::clone(&self.state),
				index,
			}),
			status,
		)
	}

	fn create_context_menu(&mut self, group: GroupId, title: &str) -> Box<dyn HostCommandGroup> {
		let mut state = self.state.borrow_mut();
		state.mutations.push(HostMutation::CreateContextMenu { group });

		let index = state.groups.len();
		state.groups.push(GroupRecord {
			id: group,
			title: title.to_string(),
			tooltip: String::new(),
			changed_hint: None,
			context_menu: true,
			selection_filter: None,
			icons: None,
			items: Vec::new(),
			command_ids: Vec::new(),
			spacers: Vec::new(),
			menu_enabled: false,
			toolbar_enabled: false,
			activated: false,
		});
		drop(state);

		Box::new(MockGroup {
			state: Rc::clone(&self.state),
			index,
		})
	}

	fn command_tab(&mut self, doc: DocumentType, name: &str) -> Option<Box<dyn HostCommandTab>> {
		let index = self.state.borrow().position(doc, name)?;
		Some(Box::new(MockTab {
			state: Rc::clone(&self.state),
			index,
		}))
	}

	fn add_command_tab(
		&mut self,
		doc: DocumentType,
		name: &str,
	) -> Option<Box<dyn HostCommandTab>> {
		let mut state = self.state.borrow_mut();
		if state.deny_tabs {
			return None;
		}

		state.mutations.push(HostMutation::AddTab { doc });
		let index = state.tabs.len();
		state.tabs.push(TabRecord {
			doc,
			name: name.to_string(),
			boxes: Vec::new(),
		});
		drop(state);

		Some(Box::new(MockTab {
			state: Rc::clone(&self.state),
			index,
		}))
	}

	fn remove_command_group(&mut self, group: GroupId) {
		let mut state = self.state.borrow_mut();
		state.mutations.push(HostMutation::RemoveGroup { group });
		state.removed_groups.push(group);
	}
}

struct MockGroup {
	state: Rc<RefCell<MockState>>,
	index: usize,
}

impl HostCommandGroup for MockGroup {
	fn set_selection_filter(&mut self, filter: SelectionFilter) {
		self.state.borrow_mut().groups[self.index].selection_filter = Some(filter);
	}

	fn assign_icons(&mut self, icons: GroupIcons) {
		let mut state = self.state.borrow_mut();
		let group = state.groups[self.index].id;
		state.mutations.push(HostMutation::AssignIcons { group });
		state.groups[self.index].icons = Some(icons);
	}

	fn add_spacer(&mut self, _position: i32, _kinds: ItemKinds) {
		let mut state = self.state.borrow_mut();
		let group = state.groups[self.index].id;
		state.mutations.push(HostMutation::AddSpacer { group });
		let before = state.groups[self.index].items.len();
		state.groups[self.index].spacers.push(before);
	}

	fn add_command_item(&mut self, request: &CommandItemRequest) -> i32 {
		let mut state = self.state.borrow_mut();
		let group = state.groups[self.index].id;
		state.mutations.push(HostMutation::AddItem {
			group,
			user: request.user_id,
		});

		state.next_command_id += 1;
		let command_id = state.next_command_id;

		let record = &mut state.groups[self.index];
		record.items.push(request.clone());
		record.command_ids.push(command_id);
		(record.items.len() - 1) as i32
	}

	fn command_id(&self, index: i32) -> i32 {
		self.state.borrow().groups[self.index].command_ids[index as usize]
	}

	fn enable_menu(&mut self, enabled: bool) {
		self.state.borrow_mut().groups[self.index].menu_enabled = enabled;
	}

	fn enable_toolbar(&mut self, enabled: bool) {
		self.state.borrow_mut().groups[self.index].toolbar_enabled = enabled;
	}

	fn activate(&mut self) {
		let mut state = self.state.borrow_mut();
		let group = state.groups[self.index].id;
		state.mutations.push(HostMutation::Activate { group });
		state.groups[self.index].activated = true;
	}
}

struct MockTab {
	state: Rc<RefCell<MockState>>,
	index: usize,
}

impl HostCommandTab for MockTab {
	fn boxes(&mut self) -> Vec<Box<dyn HostTabBox>> {
		let count = self.state.borrow().tabs[self.index].boxes.len();
		(0..count)
			.map(|box_index| {
				Box::new(MockBox {
					state: Rc::clone(&self.state),
					tab: self.index,
					box_index,
				}) as Box<dyn HostTabBox>
			})
			.collect()
	}

	fn add_box(&mut self) -> Box<dyn HostTabBox> {
		let mut state = self.state.borrow_mut();
		let doc = state.tabs[self.index].doc;
		state.mutations.push(HostMutation::AddBox { doc });
		state.tabs[self.index].boxes.push(BoxRecord::default());
		let box_index = state.tabs[self.index].boxes.len() - 1;
		drop(state);

		Box::new(MockBox {
			state: Rc::clone(&self.state),
			tab: self.index,
			box_index,
		})
	}
}

struct MockBox {
	state: Rc<RefCell<MockState>>,
	tab: usize,
	box_index: usize,
}

impl HostTabBox for MockBox {
	fn commands(&self) -> (Vec<i32>, Vec<i32>) {
		let state = self.state.borrow();
		let record = &state.tabs[self.tab].boxes[self.box_index];
		(record.ids.clone(), record.styles.clone())
	}

	fn add_commands(&mut self, ids: &[i32], styles: &[i32]) -> bool {
		let mut state = self.state.borrow_mut();
		if state.reject_tab_commands {
			return false;
		}

		let doc = state.tabs[self.tab].doc;
		state.mutations.push(HostMutation::BoxAddCommands {
			doc,
			ids: ids.to_vec(),
		});
		let record = &mut state.tabs[self.tab].boxes[self.box_index];
		record.ids.extend_from_slice(ids);
		record.styles.extend_from_slice(styles);
		true
	}

	fn remove_commands(&mut self, ids: &[i32]) {
		let mut state = self.state.borrow_mut();
		let doc = state.tabs[self.tab].doc;
		state.mutations.push(HostMutation::BoxRemoveCommands {
			doc,
			ids: ids.to_vec(),
		});

		let record = &mut state.tabs[self.tab].boxes[self.box_index];
		let mut kept_ids = Vec::new();
		let mut kept_styles = Vec::new();
		for (id, style) in record.ids.iter().zip(&record.styles) {
			if !ids.contains(id) {
				kept_ids.push(*id);
				kept_styles.push(*style);
			}
		}
		record.ids = kept_ids;
		record.styles = kept_styles;
	}
}
