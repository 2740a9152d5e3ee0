pub mod editor;
pub mod errors;
pub mod one_or_many;
pub mod platform;

pub use editor::{EditorFamily, EditorType};
pub use errors::{
    CodecError, ConfigError, ExportSkipReason, FormatError, MappingError, OnekeymapError,
    ParseError,
};
pub use one_or_many::OneOrMany;
pub use platform::Platform;

pub type Result<T> = std::result::Result<T, OnekeymapError>;
