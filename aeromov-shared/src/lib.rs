pub mod models;

pub use models::{Airline, Airport, Flight, MovementType};
