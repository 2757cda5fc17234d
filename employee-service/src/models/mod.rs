pub mod employee;

pub use employee::{Employee, PartialEmployee};
