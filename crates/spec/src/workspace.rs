/// A workspace kind a command can be available in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Workspace {
	/// Part modelling workspace.
	Part,
	/// Assembly workspace.
	Assembly,
	/// Drawing workspace.
	Drawing,
}

bitflags::bitflags! {
	/// A set of workspaces a command supports.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
	pub struct WorkspaceSet: u8 {
		/// Part modelling workspace.
		const PART = 1 << 0;
		/// Assembly workspace.
		const ASSEMBLY = 1 << 1;
		/// Drawing workspace.
		const DRAWING = 1 << 2;
	}
}

impl WorkspaceSet {
	/// Every workspace kind.
	pub const ALL: Self = Self::PART.union(Self::ASSEMBLY).union(Self::DRAWING);

	/// Expands the mask into concrete document types, in Part, Assembly,
	/// Drawing order.
	pub fn document_types(self) -> impl Iterator<Item = DocumentType> {
		[
			(Self::PART, DocumentType::Part),
			(Self::ASSEMBLY, DocumentType::Assembly),
			(Self::DRAWING, DocumentType::Drawing),
		]
		.into_iter()
		.filter_map(move |(flag, doc)| self.contains(flag).then_some(doc))
	}
}

impl Default for WorkspaceSet {
	fn default() -> Self {
		Self::ALL
	}
}

impl Workspace {
	/// Returns the single-workspace mask for this kind.
	pub const fn as_set(self) -> WorkspaceSet {
		match self {
			Self::Part => WorkspaceSet::PART,
			Self::Assembly => WorkspaceSet::ASSEMBLY,
			Self::Drawing => WorkspaceSet::DRAWING,
		}
	}
}

impl From<Workspace> for WorkspaceSet {
	fn from(ws: Workspace) -> Self {
		ws.as_set()
	}
}

/// A host document type; each has its own ribbon command tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentType {
	/// Part document.
	Part,
	/// Assembly document.
	Assembly,
	/// Drawing document.
	Drawing,
}

impl DocumentType {
	/// Host integer code for this document type.
	pub const fn as_host_code(self) -> i32 {
		match self {
			Self::Part => 1,
			Self::Assembly => 2,
			Self::Drawing => 3,
		}
	}
}
