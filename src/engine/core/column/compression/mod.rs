pub mod compression_codec;

pub use compression_codec::{
    CompressionAlgo, CompressionCodec, Lz4Codec, ZlibCodec, ZstdCodec, codec_for,
};
