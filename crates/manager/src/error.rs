use rivet_host::GroupCreateStatus;
use rivet_registry::RegistryError;
use rivet_spec::{DocumentType, GroupId, IconError, UserId};
use thiserror::Error;

/// Errors raised while registering command groups.
///
/// Configuration errors (duplicate ids, unknown parents, invalid
/// menu/toolbar options) are raised before the offending unit touches the
/// host; host and consistency failures are fatal to add-in initialization.
#[derive(Error, Debug)]
pub enum Error {
	/// A group with this id is already registered.
	#[error("command group {0} is already registered")]
	GroupIdAlreadyExists(GroupId),
	/// The group references a parent that was never registered.
	#[error("command group {id} references unknown parent group {parent}")]
	UnknownParentGroup {
		/// Group being registered.
		id: GroupId,
		/// Missing parent reference.
		parent: GroupId,
	},
	/// The parent chain exceeds the nesting cap, indicating a cyclic
	/// misconfiguration.
	#[error("parent chain of command group {0} exceeds the nesting limit")]
	GroupChainTooDeep(GroupId),
	/// A command enables neither menu nor toolbar presentation and cannot
	/// be placed anywhere.
	#[error("command {user} ({title:?}) in group {group} enables neither menu nor toolbar")]
	InvalidMenuToolbarOptions {
		/// Owning group.
		group: GroupId,
		/// Offending command.
		user: UserId,
		/// Offending command title.
		title: String,
	},
	/// The host rejected group creation; retrying with the same input would
	/// reproduce the failure.
	#[error("host rejected creation of command group {id}: {status}")]
	GroupCreationFailed {
		/// Group the host rejected.
		id: GroupId,
		/// Host status code.
		status: GroupCreateStatus,
	},
	/// Dispatch registration failed.
	#[error(transparent)]
	Registry(#[from] RegistryError),
	/// Icon resolution failed.
	#[error(transparent)]
	Icon(#[from] IconError),
	/// The manager has already been shut down.
	#[error("command manager is already shut down")]
	Disposed,
}

/// Errors raised during ribbon tab-box synchronization.
///
/// Tab placement is cosmetic and host-version-dependent; the build path
/// logs and swallows these instead of aborting group creation.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabError {
	/// The host produced no tab handle for this document type.
	#[error("no command tab available for {0:?} documents")]
	TabUnavailable(DocumentType),
	/// The host rejected ids it assigned itself, an unexpected host state.
	#[error("host rejected adding commands to the {0:?} tab box")]
	AddCommandsRejected(DocumentType),
}
