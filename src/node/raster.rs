use log::debug;

use super::error::*;
use super::{Point, Quadtree, QuadtreeNode};

impl QuadtreeNode {
	/// Paints every leaf under this node into `img`, each leaf's rectangle
	/// blown up by `scale` and filled with its average color.
	///
	/// `img` must be at least the tree's dimensions times `scale`, which
	/// `Quadtree::render` checks before allocating it.
	fn draw(&self, img: &mut image::RgbImage, scale: u32) {
		if !self.is_leaf() {
			for child in self.children() {
				child.draw(img, scale);
			}
			return;
		}

		let start_x = self.upper_left.x * scale;
		let start_y = self.upper_left.y * scale;
		let end_x = (self.lower_right.x + 1) * scale;
		let end_y = (self.lower_right.y + 1) * scale;
		for row in start_y..end_y {
			for col in start_x..end_x {
				img.put_pixel(col, row, self.average);
			}
		}
	}
}

impl Quadtree {
	/// Analyzes an image into a quadtree with one leaf per pixel.
	///
	/// Every inner node's color is the area-weighted average of its
	/// children's colors, computed bottom-up in constant time per node.
	/// Nodes near the root therefore accumulate truncation error relative to
	/// an exact mean over their pixels.
	pub fn from_image(img: &image::RgbImage) -> Result<Quadtree, AnalyzeError> {
		let (width, height) = img.dimensions();
		if width == 0 || height == 0 {
			return Err(AnalyzeError::EmptyImage);
		}

		let root = QuadtreeNode::build(img, Point::new(0, 0), Point::new(width - 1, height - 1));
		let tree = Quadtree {
			root: Some(root),
			width,
			height,
		};
		if log::log_enabled!(log::Level::Debug) {
			debug!("built {}x{} quadtree with {} nodes", width, height, tree.node_count());
		}
		Ok(tree)
	}

	/// Generates an image of `width * scale` by `height * scale` pixels from
	/// the leaves of the tree.
	///
	/// Works on pruned and transformed trees alike. No interpolation is
	/// done; each leaf becomes a solid block.
	///
	/// Fails with `DrawError::TooLarge` if either scaled dimension does not
	/// fit in a `u32`.
	pub fn render(&self, scale: u32) -> Result<image::RgbImage, DrawError> {
		if scale == 0 {
			return Err(DrawError::ZeroScale);
		}
		let root = self.root().ok_or(DrawError::EmptyTree)?;

		let width = self.width.checked_mul(scale).ok_or(DrawError::TooLarge)?;
		let height = self.height.checked_mul(scale).ok_or(DrawError::TooLarge)?;
		let mut img = image::RgbImage::new(width, height);
		root.draw(&mut img, scale);
		Ok(img)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn checker(w: u32, h: u32) -> image::RgbImage {
		image::RgbImage::from_fn(w, h, |x, y| {
			if (x + y) % 2 == 0 { image::Rgb([250, 10, 10]) } else { image::Rgb([5, 5, 200]) }
		})
	}

	#[test]
	fn unpruned_render_is_lossless() {
		for &(w, h) in &[(1, 1), (4, 4), (5, 3), (1, 7), (6, 1), (17, 10)] {
			let img = image::RgbImage::from_fn(w, h, |x, y| {
				image::Rgb([(x * 13) as u8, (y * 29) as u8, ((x ^ y) * 7) as u8])
			});
			let tree = Quadtree::from_image(&img).unwrap();
			assert_eq!(tree.render(1).unwrap(), img);
		}
	}

	#[test]
	fn render_scales_each_pixel_to_a_block() {
		let img = checker(3, 2);
		let tree = Quadtree::from_image(&img).unwrap();
		let out = tree.render(3).unwrap();
		assert_eq!(out.dimensions(), (9, 6));
		for y in 0..6 {
			for x in 0..9 {
				assert_eq!(out.get_pixel(x, y), img.get_pixel(x / 3, y / 3));
			}
		}
	}

	#[test]
	fn uniform_image_renders_uniformly_at_scale() {
		let img = image::RgbImage::from_pixel(2, 2, image::Rgb([10, 20, 30]));
		let mut tree = Quadtree::from_image(&img).unwrap();
		tree.prune(0.0);
		assert_eq!(tree.render(1).unwrap(), img);
		let big = tree.render(2).unwrap();
		assert_eq!(big, image::RgbImage::from_pixel(4, 4, image::Rgb([10, 20, 30])));
	}

	#[test]
	fn empty_image_is_rejected() {
		let img = image::RgbImage::new(0, 4);
		assert_eq!(Quadtree::from_image(&img).unwrap_err(), AnalyzeError::EmptyImage);
	}

	#[test]
	fn zero_scale_is_rejected() {
		let tree = Quadtree::from_image(&checker(2, 2)).unwrap();
		assert_eq!(tree.render(0).unwrap_err(), DrawError::ZeroScale);
	}

	#[test]
	fn oversized_scale_is_rejected() {
		let tree = Quadtree::from_image(&checker(3, 1)).unwrap();
		assert_eq!(tree.render(1 << 31).unwrap_err(), DrawError::TooLarge);

		let mut tall = Quadtree::from_image(&checker(1, 3)).unwrap();
		assert_eq!(tall.render(1 << 31).unwrap_err(), DrawError::TooLarge);
		tall.rotate_ccw();
		assert_eq!(tall.render(1 << 31).unwrap_err(), DrawError::TooLarge);
	}

	#[test]
	fn cleared_tree_cannot_render() {
		let mut tree = Quadtree::from_image(&checker(2, 2)).unwrap();
		tree.clear();
		assert_eq!(tree.render(1).unwrap_err(), DrawError::EmptyTree);
	}
}
