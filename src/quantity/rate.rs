quantity!(
    /// Norwegian krone per kilowatt-hour.
    KilowattHourRate, f64, "NOK/kWh"
);
