pub mod container;
pub mod controller;
pub mod router;

pub use container::{expand_tilde, Container, ContainerConfig};
pub use router::Router;
