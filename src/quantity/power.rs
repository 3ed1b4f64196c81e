quantity!(
    /// Charging power, or the energy a charger delivers in one hour.
    Kilowatts, f64, "kW"
);
