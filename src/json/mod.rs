pub mod coerce;
pub mod encoding;
pub mod value;

pub use coerce::{coerce, coerce_str};
pub use encoding::decode_probe_text;
pub use value::TypedValue;
