//! DML expression model: function columns, predicates and requests.

mod column;
pub mod functions;
mod request;
mod term;

pub use column::{FunctionColumn, InsertColumn, SelectColumn, UpdateColumn};
pub use functions::{NativeFunction, SqlFunction};
pub use request::{DeleteRequest, InsertRequest, Paging, SelectRequest, SortOrder, UpdateRequest};
pub use term::{term, CompareOp, Term, TermBuilder};
