//! Label persistence: the TXT codec, path mapping, and file I/O.

mod error;
mod label_txt;

#[cfg(test)]
mod tests;

pub use error::LabelError;
pub use label_txt::{
    decode, encode, label_path_for_image, read_label_file, write_label_file, DecodeReport,
    DecodeWarning, NORMALIZED_MAX,
};
