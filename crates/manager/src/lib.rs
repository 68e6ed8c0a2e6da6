//! Command-group manager for a CAD host add-in.
//!
//! [`CommandManager`] reconciles declared command groups against the host's
//! persisted layout state, drives group and command-item creation, lays out
//! ribbon tab boxes, retains dispatch state for the host's click and enable
//! callbacks, and guarantees teardown of every host resource it created.
//!
//! All operations run synchronously on the host's main thread: groups are
//! registered during add-in connection, callbacks dispatch between, and
//! [`CommandManager::shutdown`] (or drop) releases everything once at
//! disconnect. There is no individual group removal.
//!
//! ```no_run
//! use rivet_manager::CommandManager;
//! use rivet_spec::{CommandGroupSpec, CommandSpec, Icon, UserId};
//! # fn connect(host: Box<dyn rivet_host::CommandHost>,
//! #            icons: Box<dyn rivet_spec::IconResolver>) -> Result<(), rivet_manager::Error> {
//! let mut manager = CommandManager::new(host, icons);
//! let group = manager.add_command_group(
//!     CommandGroupSpec::new("My Tools", Icon::new("tools.png"))
//!         .command(CommandSpec::new(UserId(1), "Run", || println!("run"))),
//! )?;
//! # Ok(()) }
//! ```

use rivet_host::{CommandHost, HostCommandGroup, SelectionFilter};
use rivet_registry::CommandRegistry;
use rivet_spec::{CommandGroupSpec, GroupId, IconResolver};

mod builder;
mod error;
mod reconcile;
mod tabs;

pub use error::{Error, TabError};
pub use reconcile::needs_rebuild;

use builder::GroupKind;

/// One retained command group.
struct GroupEntry {
	id: GroupId,
	/// Own title segment, used when children join their menu paths.
	title: String,
	/// Full menu path handed to the host at creation.
	path: String,
	parent: Option<GroupId>,
	handle: Box<dyn HostCommandGroup>,
	context_menu: bool,
}

/// Owns the host command-manager handle and every group created through it.
///
/// Group handles live here for the add-in session; only teardown releases
/// them. The host handle itself is consumed exactly once: [`shutdown`]
/// (explicitly or via drop) removes each group by id, clears the dispatch
/// registry and drops the host box, after which every operation fails with
/// [`Error::Disposed`] and a second shutdown performs no host calls.
///
/// [`shutdown`]: CommandManager::shutdown
pub struct CommandManager {
	host: Option<Box<dyn CommandHost>>,
	icons: Box<dyn IconResolver>,
	registry: CommandRegistry,
	groups: Vec<GroupEntry>,
}

impl CommandManager {
	/// Creates a manager over a connected host and an icon resolver.
	pub fn new(host: Box<dyn CommandHost>, icons: Box<dyn IconResolver>) -> Self {
		Self {
			host: Some(host),
			icons,
			registry: CommandRegistry::new(),
			groups: Vec::new(),
		}
	}

	/// Registers a toolbar/menu command group and renders it.
	///
	/// Without an explicit id the next free id is assigned (highest existing
	/// plus one, zero for the first group). Returns the id under which the
	/// group is retained.
	pub fn add_command_group(&mut self, spec: CommandGroupSpec) -> Result<GroupId, Error> {
		self.build_group(spec, GroupKind::Toolbar)
	}

	/// Registers a context-menu command group with a selection-type filter.
	pub fn add_context_menu(
		&mut self,
		spec: CommandGroupSpec,
		filter: SelectionFilter,
	) -> Result<GroupId, Error> {
		self.build_group(spec, GroupKind::ContextMenu(filter))
	}

	/// Host click entry point; `key` is the `"{group}.{user}"` wire form
	/// embedded at command creation.
	pub fn on_command_click(&self, key: &str) {
		tracing::debug!(key, "command clicked");
		if let Err(err) = self.registry.dispatch_click_str(key) {
			tracing::error!(key, %err, "command click dispatch failed");
		}
	}

	/// Host enable-query entry point; returns the host code of the
	/// command's enable state, most restrictive for unknown keys.
	pub fn on_command_enable(&self, key: &str) -> i32 {
		self.registry.dispatch_enable_str(key).as_host_code()
	}

	/// The dispatch registry populated during group creation.
	pub fn registry(&self) -> &CommandRegistry {
		&self.registry
	}

	/// Number of retained groups.
	pub fn group_count(&self) -> usize {
		self.groups.len()
	}

	/// Ids of all retained groups, in registration order.
	pub fn group_ids(&self) -> impl Iterator<Item = GroupId> + '_ {
		self.groups.iter().map(|g| g.id)
	}

	/// Whether a retained group is a context menu; `None` for unknown ids.
	pub fn is_context_menu(&self, id: GroupId) -> Option<bool> {
		self.groups.iter().find(|g| g.id == id).map(|g| g.context_menu)
	}

	/// Releases every host resource this manager created.
	///
	/// Removes each retained group by id, clears the dispatch registry and
	/// drops the host handle. Idempotent: a second call finds no host and
	/// returns without any host call.
	pub fn shutdown(&mut self) {
		let Some(mut host) = self.host.take() else {
			return;
		};

		for entry in self.groups.drain(..) {
			tracing::info!(group = %entry.id, "removing command group");
			host.remove_command_group(entry.id);
		}
		self.registry.clear();
		// Dropping the box releases the host command-manager handle.
	}
}

impl Drop for CommandManager {
	fn drop(&mut self) {
		self.shutdown();
	}
}
