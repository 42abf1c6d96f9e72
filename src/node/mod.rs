pub mod color;
pub mod error;

use color::{weighted_average, Color};

/// Inclusive pixel coordinate of a region corner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
	pub x: u32,
	pub y: u32,
}

impl Point {
	/// Point at column `x`, row `y`.
	pub fn new(x: u32, y: u32) -> Self {
		Self { x, y }
	}
}

/// Slot of a child within its parent.
///
/// The slot names where the child is drawn, not where it was first built;
/// after a flip or rotation the contents move between slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Quadrant {
	NorthWest = 0,
	NorthEast = 1,
	SouthWest = 2,
	SouthEast = 3,
}

impl Quadrant {
	/// Every slot, in storage order.
	pub const ALL: [Quadrant; 4] = [
		Quadrant::NorthWest,
		Quadrant::NorthEast,
		Quadrant::SouthWest,
		Quadrant::SouthEast,
	];
}

type Children = [Option<Box<QuadtreeNode>>; 4];

/// Node in a quadtree for storing an image.
///
/// Covers the rectangle from `upper_left` to `lower_right` (both inclusive)
/// and always carries the average color of that rectangle, so that a node
/// whose children were pruned still renders meaningfully.
///
/// Each child slot is either empty or exclusively owned by this node.
#[derive(Clone, Debug, PartialEq)]
pub struct QuadtreeNode {
	pub(crate) upper_left: Point,
	pub(crate) lower_right: Point,
	pub(crate) average: Color,
	pub(crate) children: Children,
}

impl QuadtreeNode {
	fn new(upper_left: Point, lower_right: Point, average: Color) -> Self {
		Self {
			upper_left,
			lower_right,
			average,
			children: Default::default(),
		}
	}

	/// Recursively splits the region `ul..=lr` of `img` into a subtree.
	///
	/// The extra column of an odd split goes west, the extra row goes north.
	/// Single-column regions only fill the northwest/southwest slots, and
	/// single-row regions only fill northwest/northeast.
	fn build(img: &image::RgbImage, ul: Point, lr: Point) -> Box<QuadtreeNode> {
		if ul == lr {
			return Box::new(QuadtreeNode::new(ul, lr, *img.get_pixel(ul.x, ul.y)));
		}

		let vertical = ul.x + (lr.x - ul.x) / 2;
		let horizontal = ul.y + (lr.y - ul.y) / 2;

		let mut node = QuadtreeNode::new(ul, lr, image::Rgb([0; 3]));
		if ul.x == lr.x {
			node.set_child(Quadrant::NorthWest, Self::build(img, ul, Point::new(ul.x, horizontal)));
			node.set_child(Quadrant::SouthWest, Self::build(img, Point::new(ul.x, horizontal + 1), lr));
		} else if ul.y == lr.y {
			node.set_child(Quadrant::NorthWest, Self::build(img, ul, Point::new(vertical, ul.y)));
			node.set_child(Quadrant::NorthEast, Self::build(img, Point::new(vertical + 1, ul.y), lr));
		} else {
			node.set_child(Quadrant::NorthWest,
				Self::build(img, ul, Point::new(vertical, horizontal)));
			node.set_child(Quadrant::NorthEast,
				Self::build(img, Point::new(vertical + 1, ul.y), Point::new(lr.x, horizontal)));
			node.set_child(Quadrant::SouthWest,
				Self::build(img, Point::new(ul.x, horizontal + 1), Point::new(vertical, lr.y)));
			node.set_child(Quadrant::SouthEast,
				Self::build(img, Point::new(vertical + 1, horizontal + 1), lr));
		}

		// Constant time per node: children's averages are reused, pixels are not rescanned.
		node.average = weighted_average(node.children().map(|c| (c.average, c.area())));
		Box::new(node)
	}

	fn set_child(&mut self, quadrant: Quadrant, child: Box<QuadtreeNode>) {
		self.children[quadrant as usize] = Some(child);
	}

	/// Top-left corner of the region, inclusive.
	pub fn upper_left(&self) -> Point {
		self.upper_left
	}

	/// Bottom-right corner of the region, inclusive.
	pub fn lower_right(&self) -> Point {
		self.lower_right
	}

	/// Average color of the region.
	pub fn average(&self) -> Color {
		self.average
	}

	/// Number of pixels covered by this node's rectangle.
	pub fn area(&self) -> u64 {
		let w = (self.lower_right.x - self.upper_left.x + 1) as u64;
		let h = (self.lower_right.y - self.upper_left.y + 1) as u64;
		w * h
	}

	/// The child drawn in `quadrant`, if that slot is filled.
	pub fn child(&self, quadrant: Quadrant) -> Option<&QuadtreeNode> {
		self.children[quadrant as usize].as_deref()
	}

	/// Iterates over the non-empty child slots in NW, NE, SW, SE order.
	pub fn children(&self) -> impl Iterator<Item = &QuadtreeNode> {
		self.children.iter().filter_map(|c| c.as_deref())
	}

	/// True if every child slot is empty.
	pub fn is_leaf(&self) -> bool {
		self.children.iter().all(Option::is_none)
	}

	/// Drops every descendant, turning this node into a leaf that keeps
	/// its average color.
	pub(crate) fn clear_children(&mut self) {
		for slot in self.children.iter_mut() {
			if let Some(mut child) = slot.take() {
				child.clear_children();
			}
		}
	}

	fn count_nodes(&self) -> usize {
		1 + self.children().map(QuadtreeNode::count_nodes).sum::<usize>()
	}

	fn count_leaves(&self) -> usize {
		if self.is_leaf() {
			1
		} else {
			self.children().map(QuadtreeNode::count_leaves).sum()
		}
	}
}

/// A region quadtree over an RGB image.
///
/// Owns the whole node graph through `root`; `width` and `height` are the
/// dimensions of the image the tree currently renders to, which swap on
/// rotation.
#[derive(Debug, PartialEq)]
pub struct Quadtree {
	pub(crate) root: Option<Box<QuadtreeNode>>,
	pub(crate) width: u32,
	pub(crate) height: u32,
}

impl Quadtree {
	/// Width in pixels of the image the tree renders at scale 1.
	pub fn width(&self) -> u32 {
		self.width
	}

	/// Height in pixels of the image the tree renders at scale 1.
	pub fn height(&self) -> u32 {
		self.height
	}

	/// The node covering the whole image, or `None` once cleared.
	pub fn root(&self) -> Option<&QuadtreeNode> {
		self.root.as_deref()
	}

	/// True once the tree has been cleared.
	pub fn is_empty(&self) -> bool {
		self.root.is_none()
	}

	/// Number of nodes in the tree, inner nodes included.
	pub fn node_count(&self) -> usize {
		self.root().map_or(0, QuadtreeNode::count_nodes)
	}

	/// Number of leaves, i.e. solid blocks drawn by `render`.
	pub fn leaf_count(&self) -> usize {
		self.root().map_or(0, QuadtreeNode::count_leaves)
	}

	/// Releases every node, children before parents, leaving an empty tree.
	///
	/// The dimensions are kept.
	pub fn clear(&mut self) {
		if let Some(mut root) = self.root.take() {
			root.clear_children();
		}
	}
}

impl Clone for Quadtree {
	/// Deep copy; the new tree shares no nodes with `self`.
	fn clone(&self) -> Self {
		Self {
			root: self.root.clone(),
			width: self.width,
			height: self.height,
		}
	}

	/// Releases the receiver's current graph, then copies `source`.
	fn clone_from(&mut self, source: &Self) {
		self.clear();
		self.root = source.root.clone();
		self.width = source.width;
		self.height = source.height;
	}
}

mod raster;
mod transform;
