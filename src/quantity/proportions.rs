quantity!(Percentage, via: f64, suffix: "%", precision: 1);

impl Percentage {
    pub const FULL: Self = Self(100.0);

    /// Convert the percentage into `0.0..=1.0`.
    pub const fn to_ratio(self) -> f64 {
        self.0 / 100.0
    }
}
