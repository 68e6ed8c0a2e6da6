//! Ribbon tab-box synchronization.
//!
//! Every command flagged for ribbon placement is expanded across the
//! document types its workspace mask covers, then each document type's tab
//! is reconciled against the desired (id, text-style) run: reuse the
//! best-matching existing box, skip it entirely when it already holds the
//! exact run, rebuild it otherwise, or create a fresh box when nothing
//! overlaps. A second pass over an unchanged desired set issues zero host
//! mutations.

use std::rc::Rc;

use rivet_host::{CommandHost, HostTabBox};
use rivet_spec::{CommandSpec, DocumentType};

use crate::error::TabError;

/// Reconciles the ribbon tab boxes of one root group against the commands
/// just created for it.
pub(crate) fn sync_tab_boxes(
	host: &mut dyn CommandHost,
	group_name: &str,
	created: &[(Rc<CommandSpec>, i32)],
) -> Result<(), TabError> {
	for doc in [DocumentType::Part, DocumentType::Assembly, DocumentType::Drawing] {
		let mut ids = Vec::new();
		let mut styles = Vec::new();
		for (cmd, cmd_id) in created {
			if cmd.has_tab_box() && cmd.workspace_set().document_types().any(|d| d == doc) {
				ids.push(*cmd_id);
				styles.push(cmd.tab_text_style().as_host_code());
			}
		}

		if ids.is_empty() {
			continue;
		}

		sync_document_tab(host, doc, group_name, &ids, &styles)?;
	}

	Ok(())
}

fn sync_document_tab(
	host: &mut dyn CommandHost,
	doc: DocumentType,
	group_name: &str,
	ids: &[i32],
	styles: &[i32],
) -> Result<(), TabError> {
	let mut tab = match host.command_tab(doc, group_name) {
		Some(tab) => tab,
		None => host
			.add_command_tab(doc, group_name)
			.ok_or(TabError::TabUnavailable(doc))?,
	};

	let mut target = match find_reusable_box(tab.boxes(), ids) {
		None => tab.add_box(),
		Some(mut existing) => {
			let (existing_ids, existing_styles) = existing.commands();
			if existing_ids == ids && existing_styles == styles {
				// Already holds the exact desired run; nothing to mutate.
				tracing::debug!(?doc, "tab box already up to date");
				return Ok(());
			}
			existing.remove_commands(&existing_ids);
			existing
		}
	};

	if !target.add_commands(ids, styles) {
		return Err(TabError::AddCommandsRejected(doc));
	}

	tracing::debug!(?doc, count = ids.len(), "populated tab box");
	Ok(())
}

/// Picks the existing box with the largest overlap with the desired ids;
/// first-found wins ties and zero overlap means no reuse.
fn find_reusable_box(
	mut boxes: Vec<Box<dyn HostTabBox>>,
	ids: &[i32],
) -> Option<Box<dyn HostTabBox>> {
	let mut best: Option<(usize, usize)> = None;

	for (index, tab_box) in boxes.iter().enumerate() {
		let (existing, _) = tab_box.commands();
		let overlap = existing.iter().filter(|id| ids.contains(id)).count();
		if overlap > best.map_or(0, |(_, count)| count) {
			best = Some((index, overlap));
		}
	}

	best.map(|(index, _)| boxes.swap_remove(index))
}
