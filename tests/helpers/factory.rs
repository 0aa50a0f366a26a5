pub use super::factories::{ColfFileFactory, RawTableFactory};

pub struct Factory;

impl Factory {
    pub fn raw_table() -> RawTableFactory {
        RawTableFactory::new()
    }

    pub fn colf_file() -> ColfFileFactory {
        ColfFileFactory::new()
    }
}
