pub mod architecture;
pub mod dependency;
pub mod export;
pub mod graph;
pub mod noise;
pub mod pipeline;
pub mod ports;
pub mod type_descriptor;
