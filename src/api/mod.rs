pub mod admin;
pub mod attendance;
pub mod department;
pub mod employee;
pub mod payroll;
pub mod position;
