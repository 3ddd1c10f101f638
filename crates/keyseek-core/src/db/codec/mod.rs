pub(crate) mod cursor;

pub use cursor::CursorDecodeError;
