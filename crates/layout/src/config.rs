/// Settings of the font-sizing pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizingConfig {
    /// Multiplier applied to every computed size, after the per-kind floor.
    ///
    /// Use values below `1.0` to shrink a whole run (e.g. for printers that
    /// over-ink) and above `1.0` to enlarge it. Non-positive or non-finite
    /// values are treated as `1.0`.
    ///
    /// Defaults to `1.0`.
    pub scale: f32,
}

impl SizingConfig {
    pub fn effective_scale(&self) -> f32 {
        if self.scale.is_finite() && self.scale > 0.0 {
            self.scale
        } else {
            1.0
        }
    }
}

impl Default for SizingConfig {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}
