pub mod employee;
pub mod page;
pub mod vacation;

pub use employee::{Employee, EmployeePayload, Role};
pub use page::{ListPayload, Page};
pub use vacation::{DateSuggestion, Decision, FieldError, NewVacation, VacationRequest, VacationStatus};
