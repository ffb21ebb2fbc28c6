use paso::ProgressBar;
use std::time::Duration;

fn main() -> Result<(), paso::Error> {
    println!("Starting bar...");

    let mut bar = ProgressBar::new(50)?;

    for _ in 0..50 {
        // Simulated work. The fiftieth update finishes the bar on its own.
        std::thread::sleep(Duration::from_millis(60));
        bar.update();
    }

    println!("Complete!");
    Ok(())
}
