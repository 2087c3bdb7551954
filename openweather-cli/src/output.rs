use std::fmt::Display;

use openweather_core::model::{
    AirPollutionDetails, DailyWeather, Forecast, Location, OneCallHistorical, OneCallWeather,
    SolarRadiation,
};

pub fn print_lines<T: Display>(items: &[T]) {
    if items.is_empty() {
        println!("No results.");
    }
    for item in items {
        println!("{item}");
    }
}

pub fn print_forecast(forecast: &Forecast) {
    println!("Location: {}", forecast.location);
    print_lines(&forecast.items);
}

pub fn print_daily(location: &Location, items: &[DailyWeather]) {
    println!("Location: {location}");
    print_lines(items);
}

pub fn print_air_pollution(details: &AirPollutionDetails) {
    println!("Coordinate: {}", details.coordinate);
    for record in &details.records {
        println!(
            "{}: {} | {}",
            record.forecast_time.format("%Y-%m-%d %H:%M"),
            record.air_quality_index,
            record.concentration
        );
    }
}

pub fn print_solar_radiation(radiation: &SolarRadiation) {
    println!("Coordinate: {}", radiation.coordinate);
    for record in &radiation.records {
        println!(
            "{}: GHI {:.1}, DNI {:.1}, DHI {:.1} W/m² (clear sky GHI {:.1})",
            record.measurement_time.format("%Y-%m-%d %H:%M"),
            record.ghi,
            record.dni,
            record.dhi,
            record.ghi_clear_sky
        );
    }
}

pub fn print_one_call(weather: &OneCallWeather) {
    println!("{} ({}), {}", weather.coordinate, weather.timezone, weather.timezone_offset);

    if let Some(current) = &weather.current {
        println!("Now: {current}");
    }
    if !weather.hourly.is_empty() {
        println!("Hourly: {} entries", weather.hourly.len());
    }
    for day in &weather.daily {
        print!("{}: {}", day.forecast_time.format("%Y-%m-%d"), day.temperature);
        if let Some(summary) = &day.summary {
            print!(" | {summary}");
        }
        println!();
    }
    for alert in &weather.alerts {
        println!("Alert: {alert}");
    }
}

pub fn print_historical(historical: &OneCallHistorical) {
    println!("{} ({})", historical.coordinate, historical.timezone);
    print_lines(&historical.data);
}
