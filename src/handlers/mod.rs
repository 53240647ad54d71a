pub mod appointments;
pub mod login;
pub mod observations;
pub mod patients;
pub mod prescriptions;
