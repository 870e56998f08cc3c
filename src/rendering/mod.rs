pub mod codec;

pub use codec::{decode_image, encode_png, is_allowed_file, ALLOWED_EXTENSIONS};
