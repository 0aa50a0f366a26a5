pub mod column;
pub mod layout;
pub mod read;
pub mod write;
