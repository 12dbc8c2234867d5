mod interval;

pub use interval::importance_ci;
