//! Typed view of the Lottie fields that cropping reads and writes.

pub mod model;
