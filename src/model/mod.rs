pub mod attendance;
pub mod department;
pub mod employee;
pub mod shift;
pub mod warehouse;

pub use attendance::{AttendanceEvent, AttendanceRecord, AttendanceStatus};
pub use department::Department;
pub use employee::Employee;
pub use shift::Shift;
