/// Untrained forward-pass demo.
///
/// Loads the MNIST test set, picks one random digit, shows it in the
/// terminal (and saves it as sample.png), then runs a freshly initialized
/// classifier on it and prints the raw scores. The weights are random, so
/// treat the "predicted class" line as a coin toss over ten sides.
///
/// Data files must be present at data/ (IDX binary format):
///   data/t10k-images-idx3-ubyte
///   data/t10k-labels-idx1-ubyte

use rand::SeedableRng;
use rand::rngs::StdRng;

use graphite_nn::{argmax, Classifier, MnistSet, viz};

fn main() {
    let images_path = "data/t10k-images-idx3-ubyte";
    let labels_path = "data/t10k-labels-idx1-ubyte";

    println!("Loading MNIST data...");
    let set = MnistSet::load(images_path, labels_path)
        .unwrap_or_else(|e| panic!("Failed to load MNIST: {}", e));
    println!("  {} images, {}×{} pixels each", set.len(), set.rows, set.cols);

    let mut rng = StdRng::from_entropy();

    let idx = set.random_index(&mut rng).expect("Dataset is empty");
    let (pixels, true_label) = set.get(idx).expect("Sample index out of range");

    println!("\nDigit: {} (sample #{})", true_label, idx);
    let art = viz::render_ascii(pixels, set.rows, set.cols)
        .unwrap_or_else(|e| panic!("Failed to render sample: {}", e));
    print!("{}", art);

    let png_path = "sample.png";
    viz::save_png(pixels, set.rows, set.cols, png_path)
        .unwrap_or_else(|e| panic!("Failed to save {}: {}", png_path, e));
    println!("Saved sample image to {}", png_path);

    let net = Classifier::new(&mut rng);
    let scores = net.forward(pixels)
        .unwrap_or_else(|e| panic!("Forward pass failed: {}", e));

    println!("\nTrue digit:      {}", true_label);
    println!(
        "Raw scores:      [{}]",
        scores
            .iter()
            .map(|s| format!("{:.4}", s))
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!(
        "Predicted class: {} (untrained network — expect ~10% accuracy)",
        argmax(&scores).expect("Score vector is non-empty")
    );
}
