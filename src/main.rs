use image::error::ImageError;

use log::info;

use qtree_img::Quadtree;
use qtree_img::error::DrawError;

use std::path::{Path, PathBuf};

/// Helper function for `main`.
fn error_exit(msg: &str, code: i32) -> ! {
	eprintln!("{}", msg);
	std::process::exit(code)
}

/// Maps an `image` crate error onto a message and exit code.
fn image_error_exit(e: ImageError, io_msg: &str) -> ! {
	let (msg, code) = match e {
		ImageError::Decoding(_) => ("Invalid image data", 4),
		ImageError::Limits(_) => ("Computation limits exceeded", 5),
		ImageError::IoError(_) => (io_msg, 3),
		_ => ("An error occurred", 10)
	};
	error_exit(msg, code)
}

/// `clap`-based CLI for compressing and transforming images through a quadtree.
///
/// May exit process with status code if there are errors:
///
/// 1: `clap` error
///
/// 2: invalid arguments
///
/// 3: file I/O issues
///
/// 4: invalid image data
///
/// 5: computation limits exceeded
///
/// 10: other, potentially unknown error
fn main() {
	let clap_matches = clap::App::new("qtree_img")
		.version("0.1.0")
		.author("vkcz")
		.about("Builds a quadtree from an image, optionally prunes, flips and rotates it, and renders it back.")
		.arg_from_usage("-t, --tolerance=[N] 'Prune subtrees whose pixels are all within N of their average color; no pruning if absent'")
		.arg_from_usage("-s, --scale=[N] 'Output scale factor; defaults to 1'")
		.arg_from_usage("-f, --flip 'Mirror the image horizontally'")
		.arg_from_usage("-r, --rotate=[N] 'Number of counter-clockwise quarter turns; defaults to 0'")
		.arg_from_usage("-v... 'Increase log verbosity (RUST_LOG overrides)'")
		.arg_from_usage("<INPUT> 'Path to input image'")
		.arg_from_usage("[OUTPUT] 'Path to output PNG; defaults to INPUT with a .qt.png extension'")
		.get_matches();

	let level = match clap_matches.occurrences_of("v") {
		0 => "warn",
		1 => "info",
		2 => "debug",
		_ => "trace",
	};
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
		.format_timestamp(None)
		.init();

	let tolerance = match clap_matches.value_of("tolerance").map(str::parse::<f64>) {
		None => None,
		Some(Ok(n)) if n >= 0. => Some(n),
		Some(_) => error_exit("Tolerance must be a non-negative number", 2)
	};
	let scale = match clap_matches.value_of("scale").unwrap_or("1").parse::<u32>() {
		Ok(n) if n > 0 => n,
		_ => error_exit("Scale must be a positive integer", 2)
	};
	let turns = match clap_matches.value_of("rotate").unwrap_or("0").parse::<u32>() {
		Ok(n) => n % 4,
		Err(_) => error_exit("Non-numeric value for rotate", 2)
	};

	let input_path = match clap_matches.value_of("INPUT") {
		Some(p) => p,
		None => error_exit("Missing input path", 2)
	};
	let source = match image::open(input_path) {
		Ok(i) => i.into_rgb8(),
		Err(e) => image_error_exit(e, "File not found or could not be read")
	};

	let mut tree = match Quadtree::from_image(&source) {
		Ok(t) => t,
		Err(e) => error_exit(&e.to_string(), 4)
	};
	info!("{} leaves before pruning", tree.leaf_count());

	if let Some(tolerance) = tolerance {
		tree.prune(tolerance);
		info!("{} leaves after pruning with tolerance {}", tree.leaf_count(), tolerance);
	}
	if clap_matches.is_present("flip") {
		tree.flip_horizontal();
	}
	for _ in 0..turns {
		tree.rotate_ccw();
	}

	let output = match tree.render(scale) {
		Ok(img) => img,
		Err(DrawError::TooLarge) => error_exit("Computation limits exceeded", 5),
		Err(e) => error_exit(&e.to_string(), 2)
	};
	let output_path = clap_matches.value_of("OUTPUT")
		.map(PathBuf::from)
		.unwrap_or_else(|| Path::new(input_path).with_extension("qt.png"));
	info!("writing {}x{} image to {}", output.width(), output.height(), output_path.display());
	if let Err(e) = output.save(&output_path) {
		image_error_exit(e, "Could not save output")
	}
}
