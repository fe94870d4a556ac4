mod context;

pub use context::{MockContext, MockValue};
