/// Color stored in every quadtree node.
pub type Color = image::Rgb<u8>;

/// Accumulator for area-weighted channel sums.
type BigColor = image::Rgb<u64>;

/// Trait for types that measure how far apart two colors are.
///
/// Implementors must be symmetric and never return a negative value;
/// pruning compares the result against a caller-supplied tolerance.
pub trait ColorMetric {
	fn distance(&self, a: &Color, b: &Color) -> f64;
}

/// Straight-line distance between two colors in RGB space.
#[derive(Clone, Copy, Debug, Default)]
pub struct Euclidean;

impl ColorMetric for Euclidean {
	fn distance(&self, a: &Color, b: &Color) -> f64 {
		a.0.iter()
			.zip(b.0.iter())
			.map(|(&x, &y)| {
				let d = x as f64 - y as f64;
				d * d
			})
			.sum::<f64>()
			.sqrt()
	}
}

fn color_add_big(a: BigColor, b: BigColor) -> BigColor {
	image::Rgb::<u64>([
		a.0[0] + b.0[0],
		a.0[1] + b.0[1],
		a.0[2] + b.0[2],
	])
}

fn color_mul(a: &Color, b: u64) -> BigColor {
	image::Rgb::<u64>([
		a.0[0] as u64 * b,
		a.0[1] as u64 * b,
		a.0[2] as u64 * b,
	])
}

fn color_div(a: BigColor, b: u64) -> Color {
	image::Rgb::<u8>([
		(a.0[0] / b) as u8,
		(a.0[1] / b) as u8,
		(a.0[2] / b) as u8,
	])
}

/// Combines `(color, area)` pairs into one color, weighting each by its area.
///
/// Each channel is truncated independently. An empty input gives black.
pub fn weighted_average<I: IntoIterator<Item = (Color, u64)>>(parts: I) -> Color {
	let (sum, total) = parts.into_iter()
		.fold((image::Rgb::<u64>([0; 3]), 0u64), |(sum, total), (col, area)| {
			(color_add_big(sum, color_mul(&col, area)), total + area)
		});
	if total == 0 {
		return image::Rgb([0; 3]);
	}
	color_div(sum, total)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn euclidean_is_zero_for_equal_colors() {
		let c = image::Rgb([12, 200, 7]);
		assert_eq!(Euclidean.distance(&c, &c), 0.0);
	}

	#[test]
	fn euclidean_is_symmetric() {
		let a = image::Rgb([0, 0, 0]);
		let b = image::Rgb([3, 4, 0]);
		assert_eq!(Euclidean.distance(&a, &b), 5.0);
		assert_eq!(Euclidean.distance(&b, &a), 5.0);
	}

	#[test]
	fn weighted_average_truncates_each_channel() {
		let avg = weighted_average(vec![
			(image::Rgb([0, 10, 255]), 2),
			(image::Rgb([2, 11, 254]), 1),
		]);
		// (0*2 + 2) / 3, (20 + 11) / 3, (510 + 254) / 3
		assert_eq!(avg, image::Rgb([0, 10, 254]));
	}

	#[test]
	fn weighted_average_of_nothing_is_black() {
		assert_eq!(weighted_average(Vec::<(Color, u64)>::new()), image::Rgb([0, 0, 0]));
	}
}
