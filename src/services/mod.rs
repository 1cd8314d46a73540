pub mod build_kubernetes;
pub mod kubernetes;
