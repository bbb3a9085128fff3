pub mod geometry;
pub mod error;
pub mod states;
pub mod params;
pub mod engine;
pub mod forces;
pub mod integrator;
pub mod forms;
pub mod scene;
