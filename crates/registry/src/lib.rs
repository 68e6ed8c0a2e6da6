//! Runtime dispatch registry.
//!
//! Maps the typed [`CommandTarget`] key to the [`CommandSpec`] whose
//! callbacks the host may later invoke. Entries accumulate for the module's
//! lifetime and are only cleared wholesale during teardown; there is no
//! per-entry removal.
//!
//! The host speaks the string wire form `"{group}.{user}"`; the
//! `*_str` helpers parse it exactly once at that boundary and everything
//! else routes by the typed key.

use std::rc::Rc;

use rivet_spec::{CommandSpec, CommandTarget, EnableState, ParseTargetError};
use rustc_hash::FxHashMap;
use thiserror::Error;

/// Error raised by registry operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
	/// The target was already registered; a programming error in group
	/// declaration, not a runtime condition.
	#[error("command target {0} is already registered")]
	DuplicateTarget(CommandTarget),
	/// No command is registered for the target. The host never invokes a
	/// callback id it was not given, so this indicates an internal
	/// consistency bug.
	#[error("no command registered for target {0}")]
	UnknownTarget(CommandTarget),
	/// The string wire form could not be parsed.
	#[error("malformed command key: {0}")]
	MalformedKey(#[from] ParseTargetError),
}

/// Registry of dispatchable commands keyed by [`CommandTarget`].
#[derive(Debug, Default)]
pub struct CommandRegistry {
	entries: FxHashMap<CommandTarget, Rc<CommandSpec>>,
}

impl CommandRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a command under its target key.
	///
	/// Duplicate targets are rejected; all callbacks must be registered
	/// exactly once during group construction.
	pub fn register(
		&mut self,
		target: CommandTarget,
		spec: Rc<CommandSpec>,
	) -> Result<(), RegistryError> {
		if self.entries.contains_key(&target) {
			tracing::error!(%target, "duplicate command target registration");
			return Err(RegistryError::DuplicateTarget(target));
		}
		self.entries.insert(target, spec);
		Ok(())
	}

	/// Looks up the command registered for a target.
	pub fn get(&self, target: CommandTarget) -> Option<&Rc<CommandSpec>> {
		self.entries.get(&target)
	}

	/// Invokes the click callback for a target.
	pub fn dispatch_click(&self, target: CommandTarget) -> Result<(), RegistryError> {
		match self.entries.get(&target) {
			Some(spec) => {
				spec.click();
				Ok(())
			}
			None => {
				tracing::error!(%target, "click dispatched for unregistered command");
				Err(RegistryError::UnknownTarget(target))
			}
		}
	}

	/// Queries the enable state for a target.
	///
	/// An unknown target is an internal consistency violation; it is logged
	/// and degrades to the most restrictive state.
	pub fn dispatch_enable(&self, target: CommandTarget) -> EnableState {
		match self.entries.get(&target) {
			Some(spec) => spec.enable_state(),
			None => {
				tracing::error!(%target, "enable query for unregistered command");
				EnableState::DeselectDisable
			}
		}
	}

	/// Parses a wire key and dispatches a click.
	pub fn dispatch_click_str(&self, key: &str) -> Result<(), RegistryError> {
		let target: CommandTarget = key.parse()?;
		self.dispatch_click(target)
	}

	/// Parses a wire key and queries the enable state; malformed keys
	/// degrade to the most restrictive state.
	pub fn dispatch_enable_str(&self, key: &str) -> EnableState {
		match key.parse::<CommandTarget>() {
			Ok(target) => self.dispatch_enable(target),
			Err(err) => {
				tracing::error!(key, %err, "malformed enable callback key");
				EnableState::DeselectDisable
			}
		}
	}

	/// Number of registered commands.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether the registry is empty.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Removes every entry; teardown only.
	pub fn clear(&mut self) {
		self.entries.clear();
	}
}
