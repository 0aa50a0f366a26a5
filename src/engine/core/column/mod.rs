pub mod compression;
pub mod decoder;
pub mod encoder;
pub mod format;
pub mod le_slice_reader;
pub mod null_bitmap;

pub use decoder::decode_column;
pub use encoder::{EncodedColumn, encode_column};
pub use format::{DType, FormatVersion, PayloadHeader};
pub use le_slice_reader::{LeSliceReader, SIZE_U32, SIZE_U64};
pub use null_bitmap::{NullBitmap, NullBitmapBuilder};

#[cfg(test)]
mod format_test;
#[cfg(test)]
mod le_slice_reader_test;
#[cfg(test)]
mod null_bitmap_test;
