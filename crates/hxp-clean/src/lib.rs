pub mod frame;
pub mod ops;
pub mod pipeline;
pub mod retype;
pub mod spec;

pub use frame::RecordFrame;
pub use ops::apply;
pub use pipeline::{TableSource, clean, write_frame};
pub use retype::{DATE_FORMATS, parse_date};
pub use spec::{load_spec, parse_spec};
