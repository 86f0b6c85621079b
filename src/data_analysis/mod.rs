// src/data_analysis/mod.rs

pub mod apex_fit;
pub mod fit_window;
pub mod parabola_fit;
pub mod stage_merge;

// src/data_analysis/mod.rs
