//! An example of finishing a bar explicitly.
//!
//! See the `single` example for overall usage of the library.

use paso::ProgressBar;
use std::time::Duration;

fn main() -> Result<(), paso::Error> {
    let mut bar = ProgressBar::with_length(10, 40)?.manual_finish();

    for _ in 0..10 {
        std::thread::sleep(Duration::from_millis(100));
        bar.update();
    }

    // The summary line only appears once we ask for it.
    bar.finish_with("all batches done");
    Ok(())
}
