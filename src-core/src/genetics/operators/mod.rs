pub mod mutation;
pub mod selection;
