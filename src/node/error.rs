use std::fmt;

/// Reason why a quadtree couldn't be rendered to an image buffer.
#[derive(Debug, PartialEq, Eq)]
pub enum DrawError {
	/// A scale of zero would produce an image with no pixels.
	ZeroScale,
	/// The tree has been cleared and has nothing left to draw.
	EmptyTree,
	/// The scaled width or height does not fit in a `u32`.
	TooLarge,
}

/// Reason why an image couldn't be turned into a quadtree.
#[derive(Debug, PartialEq, Eq)]
pub enum AnalyzeError {
	/// The image has zero width or zero height.
	EmptyImage,
}

impl fmt::Display for DrawError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			DrawError::ZeroScale => write!(f, "render scale must be at least 1"),
			DrawError::EmptyTree => write!(f, "quadtree has no nodes to render"),
			DrawError::TooLarge => write!(f, "scaled image dimensions are too large"),
		}
	}
}

impl fmt::Display for AnalyzeError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			AnalyzeError::EmptyImage => write!(f, "image has no pixels"),
		}
	}
}

impl std::error::Error for DrawError {}

impl std::error::Error for AnalyzeError {}
