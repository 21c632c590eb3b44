//! Students record store.
//!
//! In-memory student roster with validated CRUD, letter grading, synchronous
//! notifications and bulk loading from `id/name/gender/score` flat files.

pub mod gender;
pub mod list;
pub mod student;

pub use gender::Gender;
pub use list::{StudentList, StudentPatch};
pub use student::Student;
