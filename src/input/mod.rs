mod reader;

pub use reader::{InputReader, MAX_INPUT_SIZE, sanitize};
