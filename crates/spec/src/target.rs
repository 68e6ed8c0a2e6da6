use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Numeric identifier for a command group.
///
/// Assigned by the add-in author or auto-incremented by the manager; unique
/// across all registered groups for the lifetime of the owning module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupId(pub i32);

impl GroupId {
	/// Returns the underlying numeric value.
	#[inline]
	pub fn get(self) -> i32 {
		self.0
	}
}

impl fmt::Display for GroupId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// Numeric identifier for a command within its group.
///
/// Doubles as the host command-id suffix and the menu ordering discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UserId(pub i32);

impl UserId {
	/// Returns the underlying numeric value.
	#[inline]
	pub fn get(self) -> i32 {
		self.0
	}
}

impl fmt::Display for UserId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// Typed dispatch key for a registered command.
///
/// The host only knows the string wire form `"{group}.{user}"` embedded in
/// the callback identifiers at command-creation time; [`Display`] renders it
/// and [`FromStr`] parses it back at the boundary. Everything internal routes
/// by this typed key.
///
/// [`Display`]: fmt::Display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommandTarget {
	/// Owning command group.
	pub group: GroupId,
	/// Command within the group.
	pub user: UserId,
}

impl CommandTarget {
	/// Creates a target from its two components.
	pub const fn new(group: GroupId, user: UserId) -> Self {
		Self { group, user }
	}
}

impl fmt::Display for CommandTarget {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}.{}", self.group, self.user)
	}
}

/// Error parsing the `"{group}.{user}"` wire form of a [`CommandTarget`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseTargetError {
	/// The separator between group and user id was missing.
	#[error("missing `.` separator in command key {0:?}")]
	MissingSeparator(String),
	/// One of the two components was not a valid integer.
	#[error("non-numeric component in command key {0:?}")]
	NotANumber(String),
}

impl FromStr for CommandTarget {
	type Err = ParseTargetError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let (group, user) = s
			.split_once('.')
			.ok_or_else(|| ParseTargetError::MissingSeparator(s.to_string()))?;

		let parse = |part: &str| {
			part.trim()
				.parse::<i32>()
				.map_err(|_| ParseTargetError::NotANumber(s.to_string()))
		};

		Ok(Self {
			group: GroupId(parse(group)?),
			user: UserId(parse(user)?),
		})
	}
}
