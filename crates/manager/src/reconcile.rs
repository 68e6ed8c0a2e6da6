//! Persisted-layout reconciliation.
//!
//! The host records the command ids it assigned to each group between
//! sessions. Comparing that snapshot against the currently declared user-id
//! set decides whether the host should discard its cached layout (icon
//! positions, toolbar state) when the group is recreated. The result is only
//! a hint into group creation; no write-back happens here.

use rivet_spec::UserId;

/// Decides whether a group's persisted layout is stale.
///
/// No snapshot means a first run and always rebuilds. Otherwise the two id
/// sets are compared as sorted multisets, order-insensitively, so a pure
/// reordering of declared ids does not force a rebuild while any addition
/// or removal does.
pub fn needs_rebuild(persisted: Option<&[i32]>, desired: &[UserId]) -> bool {
	let Some(persisted) = persisted else {
		return true;
	};

	let mut stored: Vec<i32> = persisted.to_vec();
	let mut declared: Vec<i32> = desired.iter().map(|id| id.get()).collect();
	stored.sort_unstable();
	declared.sort_unstable();

	stored != declared
}

#[cfg(test)]
mod tests {
	use super::*;

	fn ids(raw: &[i32]) -> Vec<UserId> {
		raw.iter().copied().map(UserId).collect()
	}

	#[test]
	fn first_run_always_rebuilds() {
		assert!(needs_rebuild(None, &ids(&[1, 2, 3])));
		assert!(needs_rebuild(None, &[]));
	}

	#[test]
	fn equal_sets_reuse_cached_layout() {
		assert!(!needs_rebuild(Some(&[1, 2, 3]), &ids(&[1, 2, 3])));
	}

	#[test]
	fn comparison_is_order_insensitive() {
		// Stored order reflects a previous session's creation order; a pure
		// reordering of the declaration must not force a rebuild.
		assert!(!needs_rebuild(Some(&[3, 1, 2]), &ids(&[1, 2, 3])));
		assert!(!needs_rebuild(Some(&[2, 3, 1]), &ids(&[3, 2, 1])));
	}

	#[test]
	fn added_or_removed_ids_rebuild() {
		assert!(needs_rebuild(Some(&[1, 2]), &ids(&[1, 2, 3])));
		assert!(needs_rebuild(Some(&[1, 2, 3]), &ids(&[1, 2])));
		assert!(needs_rebuild(Some(&[1, 2, 3]), &ids(&[1, 2, 4])));
	}

	#[test]
	fn duplicate_ids_compare_as_multisets() {
		assert!(needs_rebuild(Some(&[1, 1, 2]), &ids(&[1, 2, 2])));
		assert!(!needs_rebuild(Some(&[2, 1, 1]), &ids(&[1, 1, 2])));
	}
}
