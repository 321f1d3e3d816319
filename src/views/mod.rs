//! Plain-text renderings of a scheduled [`Goal`](crate::Goal).
//!
//! Views only read the stored schedule and critical path.

pub mod daily;
pub mod dependency;
pub mod summary;
pub mod table;
pub mod timeline;

pub use daily::render_days;
pub use dependency::{Phase, phases, render_dependencies};
pub use summary::render_stats;
pub use table::{render_df_as_text_table, render_table};
pub use timeline::{render_timeline, timeline_markers};

pub(crate) fn format_days(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        format!("{rounded}")
    }
}
