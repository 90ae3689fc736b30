mod column;
mod table;

pub use self::column::*;
pub use self::table::*;
