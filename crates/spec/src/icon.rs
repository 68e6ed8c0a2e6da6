use std::path::{Path, PathBuf};

use thiserror::Error;

/// A logical command or group icon.
///
/// Carries the source image path only; the [`IconResolver`] turns it into
/// whatever bitmap form the connected host version accepts. The size tables
/// are fixed by the host UI guidelines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Icon {
	source: PathBuf,
}

impl Icon {
	/// Pixel sizes rendered for hosts without high-resolution icon support.
	pub const STANDARD_SIZES: &'static [u32] = &[16, 24];

	/// Pixel sizes rendered for hosts with high-resolution icon support.
	pub const HIGH_RES_SIZES: &'static [u32] = &[20, 32, 40, 64, 96, 128];

	/// Creates an icon from a source image path.
	pub fn new(source: impl Into<PathBuf>) -> Self {
		Self {
			source: source.into(),
		}
	}

	/// Returns the source image path.
	pub fn source(&self) -> &Path {
		&self.source
	}
}

/// Legacy icon form: one small and one large bitmap strip path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconFiles {
	/// Small (16px row) bitmap path.
	pub small: PathBuf,
	/// Large (24px row) bitmap path.
	pub large: PathBuf,
}

/// High-resolution icon form: one bitmap path per entry in
/// [`Icon::HIGH_RES_SIZES`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconList(pub Vec<PathBuf>);

/// Error raised by an [`IconResolver`] implementation.
#[derive(Error, Debug, Clone)]
pub enum IconError {
	/// The source image could not be read.
	#[error("cannot read icon source {path:?}: {message}")]
	Unreadable {
		/// Source image path.
		path: PathBuf,
		/// Underlying failure description.
		message: String,
	},
	/// The converted bitmap could not be produced.
	#[error("icon conversion failed: {0}")]
	Conversion(String),
}

/// Converts logical icons into host-consumable bitmap paths.
///
/// The manager picks exactly one family per group, decided once from the
/// host's high-resolution capability: either the `icon_list` pair (newer
/// hosts, resolution-independent lists) or the `legacy_files` pair (older
/// hosts, fixed small/large strips). The two families are never mixed within
/// one group.
pub trait IconResolver {
	/// Renders one high-resolution list for a single icon.
	fn icon_list(&mut self, icon: &Icon) -> Result<IconList, IconError>;

	/// Renders one high-resolution list for a batch of icons, one strip
	/// entry per icon.
	fn icon_list_batch(&mut self, icons: &[Icon]) -> Result<IconList, IconError>;

	/// Renders the small/large file pair for a single icon.
	fn legacy_files(&mut self, icon: &Icon) -> Result<IconFiles, IconError>;

	/// Renders the small/large strip pair for a batch of icons.
	fn legacy_files_batch(&mut self, icons: &[Icon]) -> Result<IconFiles, IconError>;
}
