// src/plot_functions/mod.rs

pub mod plot_apex_fit;
pub mod plot_flight_profile;

// src/plot_functions/mod.rs
