//! Domain types for dentamap

pub mod dentist;

pub use dentist::{Dentist, DentistInput, DentistUpdate, NewDentist};
