// src/models/model.rs
/// One-period price evolution used by the path generator.
pub trait PriceModel {
    /// Advance `s_t` by `dt` years given a standard normal draw.
    fn exact_step(&self, s_t: f64, dt: f64, normal_draw: f64) -> f64;
}
