//! Status display trait

/// Single-line status display
///
/// `show` is best-effort: a display that fails to update must not stall
/// the control loop, so no error is returned.
pub trait Display {
    /// Replace whatever is on screen with `text`
    fn show(&mut self, text: &str);
}

impl<T: Display + ?Sized> Display for &mut T {
    fn show(&mut self, text: &str) {
        (**self).show(text)
    }
}
