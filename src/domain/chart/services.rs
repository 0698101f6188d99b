use super::value_objects::MAX_TICKS;

/// Step between price ticks so that roughly `density` ticks span `range`.
///
/// The raw step is rounded to the nearest 1000 once it reaches 1000, to the
/// nearest 100 below that, and never drops under `min_step`.
pub fn tick_step(range: f64, density: usize, min_step: f64) -> f64 {
    let raw = range.abs() / density.max(1) as f64;
    let unit = if raw >= 1000.0 { 1000.0 } else { 100.0 };
    let nice = (raw / unit).round() * unit;
    nice.max(min_step)
}

/// Ticks stepping up from `min` by `step`, up to and including `max`.
pub fn generate_ticks(min: f64, max: f64, step: f64) -> Vec<f64> {
    if !(step > 0.0) || !step.is_finite() || !min.is_finite() || !max.is_finite() || max < min {
        return Vec::new();
    }

    let steps = ((max - min) / step).floor();
    if !steps.is_finite() {
        return Vec::new();
    }
    let count = (steps as usize).saturating_add(1).min(MAX_TICKS);
    (0..count).map(|i| min + i as f64 * step).collect()
}

/// Ticks for a domain at the given density
pub fn ticks_for_domain(min: f64, max: f64, density: usize, min_step: f64) -> Vec<f64> {
    generate_ticks(min, max, tick_step(max - min, density, min_step))
}
