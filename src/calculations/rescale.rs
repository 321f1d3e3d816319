use super::forward_pass::{DayWindow, horizon};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rescale {
    /// Unscaled span produced by the forward pass.
    pub horizon: f64,
    pub scale_factor: f64,
}

/// Compresses windows so the schedule ends within `total_days`.
///
/// Schedules that already fit are left untouched (factor exactly 1). Scaled end
/// days are clamped to `total_days` so rounding never pushes a task past it.
pub fn fit_to_horizon(windows: &mut [DayWindow], total_days: f64) -> Rescale {
    let horizon = horizon(windows);
    if horizon <= total_days || horizon <= 0.0 {
        return Rescale {
            horizon,
            scale_factor: 1.0,
        };
    }

    let scale_factor = total_days / horizon;
    for window in windows.iter_mut() {
        let end_day = (window.end_day * scale_factor).min(total_days);
        let start_day = (window.start_day * scale_factor).min(end_day);
        *window = DayWindow { start_day, end_day };
    }

    Rescale {
        horizon,
        scale_factor,
    }
}
