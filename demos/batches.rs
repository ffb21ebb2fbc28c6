//! An example of appending per-step text to the frame.

use paso::ProgressBar;
use rand::Rng;
use std::time::Duration;

const BATCHES: usize = 20;

fn main() -> Result<(), paso::Error> {
    println!("Starting bar...");

    let mut rng = rand::thread_rng();
    let mut bar = ProgressBar::new(BATCHES)?.glyphs('#', '>', '-');

    for batch in 1..=BATCHES {
        // Simulate batches of uneven size, so the s/sample average moves.
        let wait: u64 = rng.gen_range(25..250);
        std::thread::sleep(Duration::from_millis(wait));

        bar.update_with(&format!("batch {}", batch));
    }

    println!("Complete!");
    Ok(())
}
