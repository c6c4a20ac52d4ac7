pub mod buffer;
pub mod encoder;
pub mod error;
pub mod model;
pub mod types;


pub use encoder::encode;
pub use error::{EncodingError, EncodingResult, ModelError, ModelResult};
pub use model::{ColumnDescriptor, InputKind, ResultSet, Row, Scalar};
pub use types::{ColumnType, WireEncoding};
