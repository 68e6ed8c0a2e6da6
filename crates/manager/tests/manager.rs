//! End-to-end scenarios against the scripted mock host.

use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use rivet_host::mock::{HostMutation, MockHost, MockState};
use rivet_host::{GroupIcons, ItemKinds, SelectionFilter};
use rivet_manager::{CommandManager, Error};
use rivet_spec::{
	CommandGroupSpec, CommandSpec, DocumentType, GroupId, Icon, IconError, IconFiles, IconList,
	IconResolver, TabTextStyle, UserId, Workspace,
};

/// Per-method call counts of the recording icon resolver.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct IconCalls {
	icon_list: u32,
	icon_list_batch: u32,
	legacy_files: u32,
	legacy_files_batch: u32,
}

/// Icon resolver that counts calls and renders deterministic paths.
#[derive(Default)]
struct RecordingIcons {
	calls: Rc<RefCell<IconCalls>>,
}

impl RecordingIcons {
	fn new() -> (Self, Rc<RefCell<IconCalls>>) {
		let resolver = Self::default();
		let calls = Rc::clone(&resolver.calls);
		(resolver, calls)
	}
}

impl IconResolver for RecordingIcons {
	fn icon_list(&mut self, icon: &Icon) -> Result<IconList, IconError> {
		self.calls.borrow_mut().icon_list += 1;
		Ok(IconList(
			Icon::HIGH_RES_SIZES
				.iter()
				.map(|size| PathBuf::from(format!("{}-{size}.png", icon.source().display())))
				.collect(),
		))
	}

	fn icon_list_batch(&mut self, icons: &[Icon]) -> Result<IconList, IconError> {
		self.calls.borrow_mut().icon_list_batch += 1;
		Ok(IconList(
			Icon::HIGH_RES_SIZES
				.iter()
				.map(|size| PathBuf::from(format!("batch{}-{size}.png", icons.len())))
				.collect(),
		))
	}

	fn legacy_files(&mut self, icon: &Icon) -> Result<IconFiles, IconError> {
		self.calls.borrow_mut().legacy_files += 1;
		Ok(IconFiles {
			small: PathBuf::from(format!("{}-16.bmp", icon.source().display())),
			large: PathBuf::from(format!("{}-24.bmp", icon.source().display())),
		})
	}

	fn legacy_files_batch(&mut self, icons: &[Icon]) -> Result<IconFiles, IconError> {
		self.calls.borrow_mut().legacy_files_batch += 1;
		Ok(IconFiles {
			small: PathBuf::from(format!("batch{}-16.bmp", icons.len())),
			large: PathBuf::from(format!("batch{}-24.bmp", icons.len())),
		})
	}
}

fn manager_over(host: MockHost) -> (CommandManager, Rc<RefCell<MockState>>, Rc<RefCell<IconCalls>>) {
	let state = host.state();
	let (icons, calls) = RecordingIcons::new();
	(CommandManager::new(Box::new(host), Box::new(icons)), state, calls)
}

fn plain_group(title: &str) -> CommandGroupSpec {
	CommandGroupSpec::new(title, Icon::new(format!("{title}.png")))
		.command(CommandSpec::new(UserId(1), "First", || {}))
		.command(CommandSpec::new(UserId(2), "Second", || {}))
}

#[test]
fn auto_ids_start_at_zero_and_follow_the_maximum() {
	let (mut manager, _state, _calls) = manager_over(MockHost::new());

	assert_eq!(manager.add_command_group(plain_group("A")).unwrap(), GroupId(0));
	assert_eq!(manager.add_command_group(plain_group("B")).unwrap(), GroupId(1));
	assert_eq!(
		manager
			.add_command_group(plain_group("C").id(GroupId(10)))
			.unwrap(),
		GroupId(10)
	);
	assert_eq!(manager.add_command_group(plain_group("D")).unwrap(), GroupId(11));
}

#[test]
fn duplicate_group_id_fails_without_any_host_call() {
	let (mut manager, state, _calls) = manager_over(MockHost::new());
	manager
		.add_command_group(plain_group("A").id(GroupId(5)))
		.unwrap();
	let mutations_before = state.borrow().mutation_count();

	let err = manager
		.add_command_group(plain_group("B").id(GroupId(5)))
		.unwrap_err();

	assert!(matches!(err, Error::GroupIdAlreadyExists(GroupId(5))));
	assert_eq!(state.borrow().mutation_count(), mutations_before);
	assert_eq!(manager.group_count(), 1);
}

#[test]
fn unknown_parent_fails_before_any_host_call() {
	let (mut manager, state, _calls) = manager_over(MockHost::new());

	let err = manager
		.add_command_group(plain_group("Orphan").parent(GroupId(42)))
		.unwrap_err();

	assert!(matches!(
		err,
		Error::UnknownParentGroup { parent: GroupId(42), .. }
	));
	assert_eq!(state.borrow().mutation_count(), 0);
}

#[test]
fn nested_groups_join_parent_titles_into_the_menu_path() {
	let (mut manager, state, _calls) = manager_over(MockHost::new());

	let root = manager.add_command_group(plain_group("Root")).unwrap();
	let child = manager
		.add_command_group(plain_group("Child").parent(root))
		.unwrap();
	manager
		.add_command_group(plain_group("Leaf").parent(child))
		.unwrap();

	let state = state.borrow();
	assert_eq!(state.group(root).title, "Root");
	assert_eq!(state.group(child).title, "Root\\Child");
	assert_eq!(state.group(GroupId(2)).title, "Root\\Child\\Leaf");
}

#[test]
fn reconciliation_hint_reflects_the_persisted_snapshot() {
	// No snapshot: first run, rebuild.
	let (mut manager, state, _calls) = manager_over(MockHost::new());
	let id = manager.add_command_group(plain_group("A")).unwrap();
	assert_eq!(state.borrow().group(id).changed_hint, Some(true));

	// Equal set, different order: cached layout is reused.
	let (mut manager, state, _calls) =
		manager_over(MockHost::new().persisted(GroupId(0), vec![2, 1]));
	let id = manager.add_command_group(plain_group("A")).unwrap();
	assert_eq!(state.borrow().group(id).changed_hint, Some(false));

	// Different set: rebuild.
	let (mut manager, state, _calls) =
		manager_over(MockHost::new().persisted(GroupId(0), vec![1, 2, 3]));
	let id = manager.add_command_group(plain_group("A")).unwrap();
	assert_eq!(state.borrow().group(id).changed_hint, Some(true));
}

#[test]
fn rejected_group_creation_is_fatal_and_not_retained() {
	let (mut manager, state, _calls) = manager_over(MockHost::new());
	state.borrow_mut().fail_group_creation = true;

	let err = manager.add_command_group(plain_group("A")).unwrap_err();

	assert!(matches!(err, Error::GroupCreationFailed { .. }));
	assert_eq!(manager.group_count(), 0);
}

#[test]
fn legacy_hosts_get_file_pairs_and_shared_command_fallback() {
	let (mut manager, state, calls) = manager_over(MockHost::new().high_res(false));

	let id = manager.add_command_group(plain_group("A")).unwrap();

	// One main-icon render, no batch: no command declares its own icon.
	assert_eq!(
		*calls.borrow(),
		IconCalls { legacy_files: 1, ..IconCalls::default() }
	);
	let state = state.borrow();
	match state.group(id).icons.as_ref().unwrap() {
		GroupIcons::Legacy { main, commands } => assert_eq!(main, commands),
		other => panic!("expected legacy icons, got {other:?}"),
	}
}

#[test]
fn legacy_hosts_batch_per_command_icons_separately() {
	let (mut manager, state, calls) = manager_over(MockHost::new().high_res(false));

	let group = CommandGroupSpec::new("A", Icon::new("A.png"))
		.command(CommandSpec::new(UserId(1), "First", || {}).icon(Icon::new("first.png")))
		.command(CommandSpec::new(UserId(2), "Second", || {}));
	let id = manager.add_command_group(group).unwrap();

	assert_eq!(
		*calls.borrow(),
		IconCalls { legacy_files: 1, legacy_files_batch: 1, ..IconCalls::default() }
	);
	let state = state.borrow();
	match state.group(id).icons.as_ref().unwrap() {
		GroupIcons::Legacy { main, commands } => assert_ne!(main, commands),
		other => panic!("expected legacy icons, got {other:?}"),
	}
}

#[test]
fn high_res_hosts_get_icon_lists_and_no_legacy_paths() {
	let (mut manager, state, calls) = manager_over(MockHost::new().high_res(true));

	let id = manager.add_command_group(plain_group("A")).unwrap();

	assert_eq!(
		*calls.borrow(),
		IconCalls { icon_list: 1, ..IconCalls::default() }
	);
	let state = state.borrow();
	match state.group(id).icons.as_ref().unwrap() {
		GroupIcons::HighRes { main, commands } => {
			assert_eq!(main, commands);
			assert_eq!(main.0.len(), Icon::HIGH_RES_SIZES.len());
		}
		other => panic!("expected high-res icons, got {other:?}"),
	}
}

#[test]
fn command_items_are_created_in_declared_order_with_wire_callbacks() {
	let (mut manager, state, _calls) = manager_over(MockHost::new());

	let group = CommandGroupSpec::new("A", Icon::new("A.png"))
		.command(CommandSpec::new(UserId(7), "Seven", || {}).tooltip("seventh"))
		.command(CommandSpec::new(UserId(3), "Three", || {}).spacer());
	let id = manager.add_command_group(group).unwrap();

	let state = state.borrow();
	let record = state.group(id);
	assert_eq!(record.items.len(), 2);

	let first = &record.items[0];
	assert_eq!(first.name, "Seven");
	assert_eq!(first.tooltip, "seventh");
	assert_eq!(first.image_list_index, 0);
	assert_eq!(first.click_callback, "on_command_click(0.7)");
	assert_eq!(first.enable_callback, "on_command_enable(0.7)");
	assert_eq!(first.kinds, ItemKinds::MENU | ItemKinds::TOOLBAR);

	assert_eq!(record.items[1].image_list_index, 1);
	assert_eq!(record.spacers, vec![1]);
	assert!(record.menu_enabled);
	assert!(record.toolbar_enabled);
	assert!(record.activated);
}

#[test]
fn invalid_menu_toolbar_options_fail_mid_group_leaving_earlier_commands() {
	let (mut manager, state, _calls) = manager_over(MockHost::new());

	let group = CommandGroupSpec::new("A", Icon::new("A.png"))
		.command(CommandSpec::new(UserId(1), "Ok", || {}))
		.command(CommandSpec::new(UserId(2), "Bad", || {}).menu(false).toolbar(false))
		.command(CommandSpec::new(UserId(3), "Never", || {}));
	let err = manager.add_command_group(group).unwrap_err();

	assert!(matches!(
		err,
		Error::InvalidMenuToolbarOptions { user: UserId(2), .. }
	));

	// Creation is command-by-command: the first command exists, the
	// offending one and everything after it were never created.
	{
		let state = state.borrow();
		let record = state.group(GroupId(0));
		assert_eq!(record.items.len(), 1);
		assert_eq!(record.items[0].name, "Ok");
	}

	// The group itself is retained and teardown still removes it.
	assert_eq!(manager.group_count(), 1);
	manager.shutdown();
	assert_eq!(state.borrow().removed_groups, vec![GroupId(0)]);
}

#[test]
fn click_and_enable_dispatch_through_the_wire_keys() {
	let (mut manager, _state, _calls) = manager_over(MockHost::new());
	let hits = Rc::new(Cell::new(0u32));
	let counter = Rc::clone(&hits);

	let group = CommandGroupSpec::new("A", Icon::new("A.png"))
		.command(CommandSpec::new(UserId(1), "Hit", move || {
			counter.set(counter.get() + 1);
		}))
		.command(
			CommandSpec::new(UserId(2), "Gated", || {})
				.enable(|| rivet_spec::EnableState::SelectDisable),
		);
	manager.add_command_group(group).unwrap();

	manager.on_command_click("0.1");
	manager.on_command_click("0.1");
	assert_eq!(hits.get(), 2);

	assert_eq!(manager.on_command_enable("0.1"), 1);
	assert_eq!(manager.on_command_enable("0.2"), 2);

	// Unknown and malformed keys degrade to deselect+disable.
	assert_eq!(manager.on_command_enable("9.9"), 0);
	assert_eq!(manager.on_command_enable("garbage"), 0);
}

#[test]
fn context_menus_carry_a_selection_filter_and_skip_reconciliation() {
	let (mut manager, state, _calls) = manager_over(MockHost::new());

	let id = manager
		.add_context_menu(plain_group("Ctx"), SelectionFilter::Faces)
		.unwrap();

	assert_eq!(manager.is_context_menu(id), Some(true));
	let state = state.borrow();
	let record = state.group(id);
	assert!(record.context_menu);
	assert_eq!(record.selection_filter, Some(SelectionFilter::Faces));
	assert_eq!(record.changed_hint, None);
}

#[test]
fn tab_boxes_are_laid_out_under_the_root_group_name() {
	let (mut manager, state, _calls) = manager_over(MockHost::new());

	let root = manager.add_command_group(plain_group("Root")).unwrap();
	let child = CommandGroupSpec::new("Child", Icon::new("child.png"))
		.parent(root)
		.command(
			CommandSpec::new(UserId(1), "Ribboned", || {})
				.workspace(Workspace::Part)
				.tab_box(TabTextStyle::TextBelow),
		);
	let child_id = manager.add_command_group(child).unwrap();

	let state = state.borrow();
	let ribbon_id = state.group(child_id).command_ids[0];
	let tab = state.tab(DocumentType::Part, "Root").unwrap();
	assert_eq!(tab.boxes.len(), 1);
	assert_eq!(tab.boxes[0].ids, vec![ribbon_id]);
	assert_eq!(tab.boxes[0].styles, vec![TabTextStyle::TextBelow.as_host_code()]);
}

#[test]
fn tab_box_failure_never_aborts_group_creation() {
	let (mut manager, state, _calls) = manager_over(MockHost::new());
	state.borrow_mut().deny_tabs = true;

	let group = CommandGroupSpec::new("A", Icon::new("A.png")).command(
		CommandSpec::new(UserId(1), "Ribboned", || {}).tab_box(TabTextStyle::NoText),
	);
	let id = manager.add_command_group(group).unwrap();

	assert_eq!(manager.group_count(), 1);
	assert!(state.borrow().group(id).activated);
}

#[test]
fn shutdown_removes_every_group_exactly_once() {
	let (mut manager, state, _calls) = manager_over(MockHost::new());
	let a = manager.add_command_group(plain_group("A")).unwrap();
	let b = manager.add_command_group(plain_group("B")).unwrap();
	assert!(!manager.registry().is_empty());

	manager.shutdown();

	assert_eq!(state.borrow().removed_groups, vec![a, b]);
	assert_eq!(manager.group_count(), 0);
	assert!(manager.registry().is_empty());

	// Second shutdown performs no host calls.
	let mutations = state.borrow().mutation_count();
	manager.shutdown();
	assert_eq!(state.borrow().mutation_count(), mutations);
}

#[test]
fn registration_after_shutdown_is_rejected() {
	let (mut manager, _state, _calls) = manager_over(MockHost::new());
	manager.shutdown();

	let err = manager.add_command_group(plain_group("A")).unwrap_err();
	assert!(matches!(err, Error::Disposed));
}

#[test]
fn dropping_the_manager_tears_down_like_an_explicit_shutdown() {
	let host = MockHost::new();
	let state = host.state();
	{
		let (icons, _calls) = RecordingIcons::new();
		let mut manager = CommandManager::new(Box::new(host), Box::new(icons));
		manager.add_command_group(plain_group("A")).unwrap();
	}

	assert_eq!(state.borrow().removed_groups, vec![GroupId(0)]);
	assert!(state
		.borrow()
		.mutations
		.contains(&HostMutation::RemoveGroup { group: GroupId(0) }));
}
