use log::debug;

use super::{Point, Quadrant, Quadtree, QuadtreeNode};

impl QuadtreeNode {
	/// Mirrors this subtree across the vertical axis of an image `width`
	/// pixels wide.
	fn flip_horizontal(&mut self, width: u32) {
		self.children.swap(Quadrant::NorthWest as usize, Quadrant::NorthEast as usize);
		self.children.swap(Quadrant::SouthWest as usize, Quadrant::SouthEast as usize);

		for child in self.children.iter_mut().flatten() {
			child.flip_horizontal(width);
		}

		let left = width - 1 - self.lower_right.x;
		let right = width - 1 - self.upper_left.x;
		self.upper_left.x = left;
		self.lower_right.x = right;
	}

	/// Rotates this subtree a quarter turn counter-clockwise.
	///
	/// `span` is the extent of the x axis before the turn; old x coordinates
	/// become new y coordinates counted up from the bottom of that span.
	fn rotate_ccw(&mut self, span: u32) {
		for child in self.children.iter_mut().flatten() {
			child.rotate_ccw(span);
		}

		// Slot order is NW, NE, SW, SE. Shifting NE->NW, SE->NE, SW->SE and
		// NW->SW is one left rotation of the cycle NW, NE, SE, SW.
		let [nw, ne, sw, se] = std::mem::take(&mut self.children);
		self.children = [ne, se, nw, sw];

		let upper_left = Point::new(self.upper_left.y, span - 1 - self.lower_right.x);
		let lower_right = Point::new(self.lower_right.y, span - 1 - self.upper_left.x);
		self.upper_left = upper_left;
		self.lower_right = lower_right;
	}
}

impl Quadtree {
	/// Rearranges the tree so that it renders mirrored across a vertical
	/// axis.
	///
	/// May be called on a pruned, flipped or rotated tree. Afterwards each
	/// slot still names the corner its child is drawn in, but single-column
	/// nodes may hold their children in the east slots.
	pub fn flip_horizontal(&mut self) {
		let width = self.width;
		if let Some(root) = self.root.as_mut() {
			root.flip_horizontal(width);
		}
		debug!("flipped {}x{} quadtree horizontally", self.width, self.height);
	}

	/// Rearranges the tree so that it renders rotated 90 degrees
	/// counter-clockwise, swapping its width and height.
	///
	/// May be called on a pruned, flipped or rotated tree. Afterwards
	/// single-row or single-column nodes may hold their children in any two
	/// adjacent slots.
	pub fn rotate_ccw(&mut self) {
		std::mem::swap(&mut self.width, &mut self.height);
		// The old width is now the height.
		let span = self.height;
		if let Some(root) = self.root.as_mut() {
			root.rotate_ccw(span);
		}
		debug!("rotated quadtree counter-clockwise to {}x{}", self.width, self.height);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use image::imageops;

	fn sample(w: u32, h: u32) -> image::RgbImage {
		image::RgbImage::from_fn(w, h, |x, y| {
			image::Rgb([(x * 31 + 7) as u8, (y * 17 + 3) as u8, ((x + 2 * y) * 9) as u8])
		})
	}

	#[test]
	fn flip_matches_mirrored_image() {
		for &(w, h) in &[(1, 1), (2, 3), (5, 4), (1, 6), (7, 1)] {
			let img = sample(w, h);
			let mut tree = Quadtree::from_image(&img).unwrap();
			tree.flip_horizontal();
			assert_eq!(tree.width(), w);
			assert_eq!(tree.height(), h);
			assert_eq!(tree.render(1).unwrap(), imageops::flip_horizontal(&img));
		}
	}

	#[test]
	fn double_flip_restores_render() {
		let img = sample(6, 5);
		let mut tree = Quadtree::from_image(&img).unwrap();
		tree.prune(40.0);
		let before = tree.render(2).unwrap();
		tree.flip_horizontal();
		tree.flip_horizontal();
		assert_eq!(tree.render(2).unwrap(), before);
	}

	#[test]
	fn flip_moves_column_children_east() {
		let mut tree = Quadtree::from_image(&sample(1, 4)).unwrap();
		tree.flip_horizontal();
		let root = tree.root().unwrap();
		assert!(root.child(Quadrant::NorthWest).is_none());
		assert!(root.child(Quadrant::SouthWest).is_none());
		assert!(root.child(Quadrant::NorthEast).is_some());
		assert!(root.child(Quadrant::SouthEast).is_some());
	}

	#[test]
	fn rotate_matches_rotated_image() {
		for &(w, h) in &[(1, 1), (3, 2), (2, 5), (6, 4), (1, 5), (8, 1)] {
			let img = sample(w, h);
			let mut tree = Quadtree::from_image(&img).unwrap();
			tree.rotate_ccw();
			assert_eq!(tree.width(), h);
			assert_eq!(tree.height(), w);
			// A clockwise turn of 270 degrees is a counter-clockwise quarter turn.
			assert_eq!(tree.render(1).unwrap(), imageops::rotate270(&img));
		}
	}

	#[test]
	fn rotate_moves_top_right_corner_to_top_left() {
		let img = sample(4, 2);
		let mut tree = Quadtree::from_image(&img).unwrap();
		tree.rotate_ccw();
		let out = tree.render(1).unwrap();
		assert_eq!(out.get_pixel(0, 0), img.get_pixel(3, 0));
		assert_eq!(out.get_pixel(1, 3), img.get_pixel(0, 1));
	}

	#[test]
	fn four_rotations_restore_render() {
		let img = sample(7, 3);
		let mut tree = Quadtree::from_image(&img).unwrap();
		tree.prune(25.0);
		let before = tree.render(1).unwrap();
		for _ in 0..4 {
			tree.rotate_ccw();
		}
		assert_eq!(tree.width(), 7);
		assert_eq!(tree.height(), 3);
		assert_eq!(tree.render(1).unwrap(), before);
	}

	#[test]
	fn transforms_compose() {
		let img = sample(5, 3);
		let mut tree = Quadtree::from_image(&img).unwrap();
		tree.rotate_ccw();
		tree.flip_horizontal();
		let expected = imageops::flip_horizontal(&imageops::rotate270(&img));
		assert_eq!(tree.render(1).unwrap(), expected);
	}

	#[test]
	fn transforms_on_cleared_tree_only_touch_dimensions() {
		let mut tree = Quadtree::from_image(&sample(3, 2)).unwrap();
		tree.clear();
		tree.flip_horizontal();
		tree.rotate_ccw();
		assert!(tree.is_empty());
		assert_eq!((tree.width(), tree.height()), (2, 3));
	}
}
