pub mod node;

pub use node::*;

use node::color::{Color, ColorMetric, Euclidean};

use log::{debug, trace};

impl QuadtreeNode {
	/// Whether every leaf under this node lies within `tolerance` of `target`.
	fn leaves_within<M: ColorMetric>(&self, target: &Color, tolerance: f64, metric: &M) -> bool {
		if self.is_leaf() {
			return metric.distance(&self.average, target) <= tolerance;
		}
		self.children().all(|c| c.leaves_within(target, tolerance, metric))
	}

	/// Collapses the highest subtrees whose leaves all sit within
	/// `tolerance` of the subtree root's own color.
	fn prune<M: ColorMetric>(&mut self, tolerance: f64, metric: &M) {
		if self.is_leaf() {
			return;
		}
		if self.leaves_within(&self.average, tolerance, metric) {
			trace!("collapsing {:?}..={:?}", self.upper_left, self.lower_right);
			self.clear_children();
			return;
		}
		for child in self.children.iter_mut().flatten() {
			child.prune(tolerance, metric);
		}
	}
}

impl Quadtree {
	/// "Trims" the tree by turning color-homogeneous subtrees into leaves,
	/// using Euclidean RGB distance.
	///
	/// See `prune_with`.
	pub fn prune(&mut self, tolerance: f64) {
		self.prune_with(tolerance, &Euclidean);
	}

	/// "Trims" the tree by turning color-homogeneous subtrees into leaves.
	///
	/// A subtree is collapsed when all of its leaves are within `tolerance`
	/// (inclusive) of the average color stored at the subtree's root. The
	/// highest such subtree wins; nothing below it is examined.
	///
	/// The test is only meaningful against the leaves of a freshly built
	/// tree, so this should be called at most once, and not on a copy of a
	/// pruned tree.
	pub fn prune_with<M: ColorMetric>(&mut self, tolerance: f64, metric: &M) {
		let before = self.leaf_count();
		if let Some(root) = self.root.as_mut() {
			root.prune(tolerance, metric);
		}
		debug!("pruned with tolerance {}: {} leaves down to {}", tolerance, before, self.leaf_count());
	}
}
