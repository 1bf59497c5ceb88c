pub mod call;
pub mod normalize;
pub mod sample;
pub mod stats;
pub mod store;
