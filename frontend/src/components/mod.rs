pub mod appointment_form;
pub mod appointment_modals;
pub mod calendar;
pub mod event_chip;
pub mod header;
pub mod modal;
