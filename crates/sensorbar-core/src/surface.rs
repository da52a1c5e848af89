//! Display surface abstraction.

/// Style classes a sensor module manages on its surface.
pub const STATE_CLASSES: [&str; 2] = ["warning", "critical"];

/// Anything a sensor module can draw its label on.
pub trait Surface {
    /// Adds a style class. Adding a class twice has no extra effect.
    fn add_class(&mut self, class: &str);

    /// Removes a style class if present.
    fn remove_class(&mut self, class: &str);

    /// Makes the label visible.
    fn show(&mut self);

    /// Hides the label.
    fn hide(&mut self);

    /// Sets the label text.
    fn set_text(&mut self, text: &str);

    /// Sets the tooltip text.
    fn set_tooltip(&mut self, text: &str);
}
