pub mod charge;
pub mod deadline;
pub mod optimal_hours;
pub mod price_area;
pub mod quote;
pub mod selector;
pub mod session;
