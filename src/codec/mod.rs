pub mod reader;
pub mod writer;
pub mod types;
pub mod strings;
pub mod record;

pub use reader::BinaryReader;
pub use writer::BinaryWriter;
pub use types::*;
pub use record::{Record, decode_all, encode_all};
