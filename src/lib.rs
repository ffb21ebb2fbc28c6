//! Simple single-line progress bars.
//!
//! # Features
//!
//! - Intuitive API.
//! - In-place redraws via carriage return; no ANSI codes required.
//! - Per-step timing with a running `s/sample` average.
//! - Configurable width and glyphs.
//! - Light-weight.
//!
//! # Usage
//!
//! A [`ProgressBar`] is built for a known number of steps, then advanced once
//! per completed unit of work:
//!
//! ```
//! use paso::ProgressBar;
//!
//! # fn main() -> Result<(), paso::Error> {
//! let mut bar = ProgressBar::new(20)?;
//!
//! for _ in 0..20 {
//!     // ... your logic ...
//!     bar.update();
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Each call rewrites the current terminal line. The final call prints the
//! total elapsed time, terminates the line with a newline, and resets the bar
//! so the same instance can be driven again.
//!
//! Free-form text can be appended to any frame, e.g. to name the batch or
//! file currently being processed:
//!
//! ```
//! # use paso::ProgressBar;
//! # fn main() -> Result<(), paso::Error> {
//! let mut bar = ProgressBar::new(3)?;
//! bar.update_with("batch 1");
//! # Ok(())
//! # }
//! ```
//!
//! ## Manual completion
//!
//! By default the bar finishes itself on its final step. Disabling that with
//! [`ProgressBar::manual_finish`] leaves the summary line to the caller:
//!
//! ```
//! # use paso::ProgressBar;
//! # fn main() -> Result<(), paso::Error> {
//! let mut bar = ProgressBar::new(2)?.manual_finish();
//! bar.update();
//! bar.update();
//! bar.finish_with("all done");
//! # Ok(())
//! # }
//! ```
//!
//! # Caveats
//!
//! - Your terminal must return to column zero on `\r`.
//! - One bar at a time; no multi-bar coordination.
//! - No terminal-width detection. The bar is as wide as you make it.
//! - No colours, to avoid dependencies.
//! - A bar is driven by a single thread. Concurrent producers must serialize
//!   their calls externally, e.g. through one owning task behind a `Mutex`.
//!
//! # Trivia
//!
//! *Paso* is the Spanish word for "step".

#![doc(html_root_url = "https://docs.rs/paso/0.1.0")]

use std::io::{Stdout, Write};
use std::time::{Duration, Instant};

/// Bar width used by [`ProgressBar::new`], in glyph columns.
const DEFAULT_LENGTH: usize = 30;

/// Errors detected while constructing a [`ProgressBar`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A bar must expect at least one step.
    #[error("total steps must be at least 1")]
    ZeroTotalSteps,
    /// A bar must be at least one column wide.
    #[error("bar length must be at least 1")]
    ZeroLength,
}

/// A single-line, self-overwriting progress bar.
pub struct ProgressBar {
    /// Total units of work expected. Fixed for the bar's lifetime.
    total_steps: usize,
    /// Visual bar width in glyph columns.
    length: usize,
    /// Glyph for the filled region.
    fill: char,
    /// Glyph for the leading edge of the filled region.
    cap: char,
    /// Glyph for the unfilled region.
    space: char,
    /// Columns gained per visual advance. Computed once at construction.
    increment: usize,
    /// Whether reaching the last step triggers [`ProgressBar::finish`] from
    /// within [`ProgressBar::update`].
    finish_on_last_step: bool,
    /// The step the next frame will report, starting at 1.
    current_step: usize,
    /// Columns currently drawn as filled. Never shrinks until reset.
    filled_columns: usize,
    /// When the previous tick was measured, or `None` before the first.
    last_tick: Option<Instant>,
    /// Gaps between successive ticks, for the running average.
    durations: Vec<Duration>,
    /// A handle to `Stdout`, for buffer flushing.
    out: Stdout,
}

impl ProgressBar {
    /// Initialize a bar for `total_steps` units of work, 30 columns wide.
    ///
    /// Glyphs default to `=` for fill, `>` for the leading edge, and a blank
    /// for unfilled space, rendering like `[===>      ]`.
    pub fn new(total_steps: usize) -> Result<ProgressBar, Error> {
        ProgressBar::with_length(total_steps, DEFAULT_LENGTH)
    }

    /// Like [`ProgressBar::new`] but with an explicit bar width.
    pub fn with_length(total_steps: usize, length: usize) -> Result<ProgressBar, Error> {
        if total_steps == 0 {
            return Err(Error::ZeroTotalSteps);
        }
        if length == 0 {
            return Err(Error::ZeroLength);
        }

        let mut bar = ProgressBar {
            total_steps,
            length,
            fill: '=',
            cap: '>',
            space: ' ',
            increment: (length / total_steps).max(1),
            finish_on_last_step: true,
            current_step: 1,
            filled_columns: 0,
            last_tick: None,
            durations: Vec::new(),
            out: std::io::stdout(),
        };
        bar.reset();
        Ok(bar)
    }

    /// Set the three render glyphs: fill, leading edge, and unfilled space.
    ///
    /// ```
    /// # use paso::ProgressBar;
    /// # fn main() -> Result<(), paso::Error> {
    /// let bar = ProgressBar::new(10)?.glyphs('#', '>', '-');
    /// # Ok(())
    /// # }
    /// ```
    pub fn glyphs(mut self, fill: char, cap: char, space: char) -> ProgressBar {
        self.fill = fill;
        self.cap = cap;
        self.space = space;
        self
    }

    /// Don't finish automatically on the last step; wait for an explicit
    /// [`ProgressBar::finish`] instead.
    pub fn manual_finish(mut self) -> ProgressBar {
        self.finish_on_last_step = false;
        self
    }

    /// Restore the bar to its freshly constructed state.
    ///
    /// Runs automatically at the end of [`ProgressBar::finish`], so an
    /// instance can be reused for another run without rebuilding it.
    pub fn reset(&mut self) {
        self.filled_columns = self.increment;
        self.current_step = 1;
        self.last_tick = None;
        self.durations.clear();
    }

    /// Advance the bar by one step and redraw it in place.
    ///
    /// Past the final step this triggers [`ProgressBar::finish`], unless
    /// [`ProgressBar::manual_finish`] was requested, in which case nothing
    /// further happens.
    pub fn update(&mut self) {
        self.advance(None)
    }

    /// Like [`ProgressBar::update`], appending ` - {extra}` to the frame.
    pub fn update_with(&mut self, extra: &str) {
        self.advance(Some(extra))
    }

    /// Force the bar to completion: draw the full bar with the total elapsed
    /// time, terminate the line, and reset.
    pub fn finish(&mut self) {
        self.complete(None)
    }

    /// Like [`ProgressBar::finish`], appending ` - {extra}` to the frame.
    pub fn finish_with(&mut self, extra: &str) {
        self.complete(Some(extra))
    }

    fn advance(&mut self, extra: Option<&str>) {
        self.tick();

        if self.current_step <= self.total_steps {
            self.draw(extra);
        } else if self.finish_on_last_step {
            self.complete(extra);
        }
    }

    /// Advance the counters and record the gap since the previous tick.
    fn tick(&mut self) {
        // One visual advance roughly every `total_steps / length` steps, so
        // the bar reaches full width near the final step either way.
        let stride = self.total_steps as f64 / self.length as f64;
        if (self.current_step as f64) % stride < 1.0 {
            self.filled_columns = (self.filled_columns + self.increment).min(self.length);
        }
        self.current_step += 1;

        let now = Instant::now();
        if let Some(last) = self.last_tick {
            let gap = now.duration_since(last);
            if gap > Duration::ZERO {
                self.durations.push(gap);
            }
        }
        self.last_tick = Some(now);
    }

    fn complete(&mut self, extra: Option<&str>) {
        if let Some(last) = self.last_tick {
            self.durations.push(last.elapsed());
        }
        self.current_step = self.total_steps;
        self.filled_columns = self.length;

        let total: f64 = self.durations.iter().map(|d| d.as_secs_f64()).sum();
        println!("\r{}", self.frame(&format!(" {:.2}s ", total), extra));
        self.reset();
    }

    /// Overwrite the current terminal line with an in-progress frame.
    fn draw(&mut self, extra: Option<&str>) {
        print!("\r{}", self.frame(" ", extra));

        // Very important, or the frame won't appear until the buffer fills.
        self.out.flush().unwrap();
    }

    /// Compose one full frame, without the leading carriage return.
    fn frame(&self, total_sec: &str, extra: Option<&str>) -> String {
        let mut line = format!(
            "{} {} -{}{:.4}s/sample",
            self.step_info(),
            self.bar_glyphs(),
            total_sec,
            self.avg_secs_per_step()
        );

        if let Some(extra) = extra {
            line.push_str(" - ");
            line.push_str(extra);
        }

        line
    }

    /// `current/total`, with the current step right-justified to the digit
    /// count of the total.
    fn step_info(&self) -> String {
        let digits = self.total_steps.to_string().len();
        format!(
            "{:>width$}/{}",
            self.current_step,
            self.total_steps,
            width = digits
        )
    }

    /// The bracketed glyph run. The cap column collapses into fill once no
    /// unfilled space remains.
    fn bar_glyphs(&self) -> String {
        let remaining = self.length - self.filled_columns;
        let cap = if remaining == 0 { self.fill } else { self.cap };

        let mut bar = String::with_capacity(self.length + 3);
        bar.push('[');
        (0..self.filled_columns).for_each(|_| bar.push(self.fill));
        bar.push(cap);
        (0..remaining).for_each(|_| bar.push(self.space));
        bar.push(']');
        bar
    }

    fn avg_secs_per_step(&self) -> f64 {
        if self.durations.is_empty() {
            0.0
        } else {
            let sum: f64 = self.durations.iter().map(|d| d.as_secs_f64()).sum();
            sum / self.durations.len() as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_total_steps() {
        assert_eq!(Err(Error::ZeroTotalSteps), ProgressBar::new(0).map(|_| ()));
    }

    #[test]
    fn rejects_zero_length() {
        assert_eq!(
            Err(Error::ZeroLength),
            ProgressBar::with_length(10, 0).map(|_| ())
        );
    }

    #[test]
    fn increment_is_at_least_one() {
        assert_eq!(1, ProgressBar::new(100).unwrap().increment);
        assert_eq!(10, ProgressBar::new(3).unwrap().increment);
        assert_eq!(1, ProgressBar::with_length(4, 4).unwrap().increment);
    }

    #[test]
    fn step_info_is_right_justified() {
        let mut bar = ProgressBar::new(10).unwrap();
        assert_eq!(" 1/10", bar.step_info());

        bar.current_step = 10;
        assert_eq!("10/10", bar.step_info());
    }

    #[test]
    fn fresh_average_is_zero() {
        let bar = ProgressBar::new(5).unwrap();
        assert!(bar.durations.is_empty());
        assert_eq!(0.0, bar.avg_secs_per_step());
    }

    #[test]
    fn first_tick_records_no_duration() {
        let mut bar = ProgressBar::new(3).unwrap();
        bar.update();
        assert!(bar.durations.is_empty());

        std::thread::sleep(Duration::from_millis(10));
        bar.update();
        assert_eq!(1, bar.durations.len());
        assert!(bar.avg_secs_per_step() > 0.0);
    }

    #[test]
    fn fill_never_shrinks_nor_overflows() {
        let mut bar = ProgressBar::new(100).unwrap().manual_finish();
        let mut prev = bar.filled_columns;

        for _ in 0..100 {
            bar.update();
            assert!(bar.filled_columns >= prev);
            assert!(bar.filled_columns <= bar.length);
            prev = bar.filled_columns;
        }

        assert_eq!(bar.length, bar.filled_columns);
    }

    #[test]
    fn four_step_walkthrough() {
        let mut bar = ProgressBar::with_length(4, 4).unwrap();

        bar.update();
        assert_eq!("2/4", bar.step_info());
        assert_eq!(2, bar.filled_columns);

        bar.update();
        bar.update();
        assert_eq!(4, bar.filled_columns);

        // The fourth call finishes and resets.
        bar.update();
        assert_eq!(1, bar.current_step);
        assert_eq!(1, bar.filled_columns);
        assert!(bar.durations.is_empty());
        assert!(bar.last_tick.is_none());
    }

    #[test]
    fn reset_matches_fresh_state() {
        let mut bar = ProgressBar::new(20).unwrap();
        bar.update();
        bar.update();

        bar.reset();
        assert_eq!(1, bar.current_step);
        assert_eq!(bar.increment, bar.filled_columns);
        assert!(bar.durations.is_empty());
        assert!(bar.last_tick.is_none());
    }

    #[test]
    fn in_progress_frame_layout() {
        let bar = ProgressBar::with_length(10, 10).unwrap();
        assert_eq!(" 1/10 [=>         ] - 0.0000s/sample", bar.frame(" ", None));
    }

    #[test]
    fn finish_frame_layout() {
        let bar = ProgressBar::with_length(10, 10).unwrap();
        assert_eq!(
            " 1/10 [=>         ] - 12.34s 0.0000s/sample",
            bar.frame(" 12.34s ", None)
        );
    }

    #[test]
    fn extra_text_is_appended_once() {
        let bar = ProgressBar::with_length(10, 10).unwrap();
        let plain = bar.frame(" ", None);
        let with_extra = bar.frame(" ", Some("batch 3"));
        assert_eq!(format!("{} - batch 3", plain), with_extra);
    }

    #[test]
    fn cap_collapses_into_fill_when_full() {
        let mut bar = ProgressBar::with_length(5, 5).unwrap().glyphs('#', '>', '-');
        assert_eq!("[#>----]", bar.bar_glyphs());

        bar.filled_columns = 5;
        assert_eq!("[######]", bar.bar_glyphs());
    }

    #[test]
    fn manual_finish_waits_for_the_caller() {
        let mut bar = ProgressBar::with_length(3, 6).unwrap().manual_finish();
        bar.update();
        bar.update();
        bar.update();
        assert_eq!(4, bar.current_step);

        bar.finish();
        assert_eq!(1, bar.current_step);
        assert_eq!(bar.increment, bar.filled_columns);
    }
}
