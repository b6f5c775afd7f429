//! Hand-authored city metrics.
//!
//! Order matters: lookups are first-match over this slice, so entries keep the
//! order they were authored in.

use super::metrics::{CityEntry, CityMetrics, RiskLevel};
use RiskLevel::{High, Low, Medium};

#[allow(clippy::too_many_arguments)]
const fn m(
    wealth_multiplier_1: f64,
    wealth_multiplier_5: f64,
    risk_score: f64,
    quality_score: f64,
    cost_increase: f64,
    tax_burden: f64,
    hidden_costs: f64,
    risk_level: RiskLevel,
) -> CityMetrics {
    CityMetrics {
        wealth_multiplier_1,
        wealth_multiplier_5,
        risk_score,
        quality_score,
        cost_increase,
        tax_burden,
        hidden_costs,
        risk_level,
    }
}

const fn city(
    name: &'static str,
    aliases: &'static [&'static str],
    metrics: CityMetrics,
) -> CityEntry {
    CityEntry {
        name,
        aliases,
        metrics,
    }
}

#[rustfmt::skip]
pub(crate) static CITIES: &[CityEntry] = &[
    city("Singapore", &[], m(0.82, 1.58, 0.12, 0.95, 22.1, 18.5, 15200.0, Low)),
    city("Berlin, Germany", &[], m(0.92, 1.62, 0.18, 0.91, 8.7, 38.2, 9600.0, Low)),
    city("Tokyo, Japan", &[], m(0.78, 1.48, 0.15, 0.93, 18.5, 28.5, 14200.0, Low)),
    city("London, UK", &[], m(0.85, 1.45, 0.25, 0.88, 15.2, 32.5, 12800.0, Medium)),
    city("New York, USA", &[], m(0.80, 1.55, 0.22, 0.86, 25.8, 35.2, 18500.0, Medium)),
    city("Dubai, UAE", &[], m(0.88, 1.72, 0.20, 0.84, 12.5, 5.0, 11000.0, Medium)),
    city("Amsterdam, Netherlands", &[], m(0.90, 1.58, 0.16, 0.92, 10.2, 42.5, 8800.0, Low)),
    city("Sydney, Australia", &[], m(0.84, 1.52, 0.14, 0.94, 19.8, 32.0, 13500.0, Low)),
    city("Toronto, Canada", &[], m(0.88, 1.55, 0.17, 0.90, 14.5, 33.8, 10200.0, Low)),
    city("Lisbon, Portugal", &[], m(0.94, 1.68, 0.19, 0.87, 5.2, 28.0, 7500.0, Low)),
    city("Paris, France", &[], m(0.82, 1.42, 0.24, 0.89, 20.5, 45.0, 14800.0, Medium)),
    city("Zurich, Switzerland", &[], m(0.75, 1.65, 0.10, 0.97, 35.2, 22.0, 16500.0, Low)),
    city("Hong Kong", &[], m(0.79, 1.52, 0.23, 0.85, 28.5, 15.0, 17200.0, Medium)),
    city("Seoul, South Korea", &[], m(0.86, 1.56, 0.16, 0.91, 12.8, 26.5, 11800.0, Low)),
    city("Barcelona, Spain", &["Barcelona"], m(0.91, 1.54, 0.21, 0.88, 8.5, 36.0, 9200.0, Medium)),
    city("Prague, Czech Republic", &["Prague"], m(0.96, 1.82, 0.14, 0.89, 4.2, 23.0, 5200.0, Low)),
    city("Krakow, Poland", &["Krakow"], m(0.98, 1.95, 0.16, 0.86, 3.5, 19.0, 4100.0, Low)),
    city("Warsaw, Poland", &["Warsaw"], m(0.95, 1.85, 0.15, 0.87, 4.8, 19.0, 4800.0, Low)),
    city("Budapest, Hungary", &["Budapest"], m(0.97, 1.88, 0.18, 0.84, 3.8, 15.0, 3900.0, Low)),
    city("Bucharest, Romania", &["Bucharest"], m(0.99, 2.05, 0.22, 0.78, 2.9, 10.0, 3200.0, Medium)),
    city("Dublin, Ireland", &["Dublin"], m(0.86, 1.58, 0.15, 0.91, 12.5, 40.0, 11500.0, Low)),
    city("Cork, Ireland", &["Cork"], m(0.91, 1.72, 0.13, 0.90, 8.2, 40.0, 8200.0, Low)),
    city("Galway, Ireland", &["Galway"], m(0.93, 1.78, 0.12, 0.89, 6.5, 40.0, 7500.0, Low)),
    city("Stockholm, Sweden", &["Stockholm"], m(0.83, 1.52, 0.11, 0.96, 15.8, 52.0, 12200.0, Low)),
    city("Copenhagen, Denmark", &["Copenhagen"], m(0.81, 1.48, 0.10, 0.97, 18.2, 55.0, 13800.0, Low)),
    city("Oslo, Norway", &["Oslo"], m(0.78, 1.45, 0.09, 0.98, 22.5, 46.0, 15500.0, Low)),
    city("Helsinki, Finland", &["Helsinki"], m(0.84, 1.55, 0.10, 0.95, 14.2, 51.0, 11800.0, Low)),
    city("Madrid, Spain", &["Madrid"], m(0.89, 1.58, 0.19, 0.88, 7.8, 37.0, 8500.0, Low)),
    city("Milan, Italy", &["Milan"], m(0.85, 1.48, 0.22, 0.87, 11.5, 43.0, 10200.0, Medium)),
    city("Rome, Italy", &["Rome"], m(0.87, 1.52, 0.24, 0.85, 9.2, 43.0, 9800.0, Medium)),
    city("Athens, Greece", &["Athens"], m(0.92, 1.65, 0.26, 0.82, 5.5, 44.0, 6800.0, Medium)),
    city("Munich, Germany", &["Munich"], m(0.85, 1.55, 0.12, 0.94, 14.5, 42.0, 12500.0, Low)),
    city("Frankfurt, Germany", &["Frankfurt"], m(0.87, 1.58, 0.14, 0.92, 12.8, 42.0, 11200.0, Low)),
    city("Vienna, Austria", &["Vienna"], m(0.88, 1.62, 0.11, 0.96, 9.8, 42.0, 9200.0, Low)),
    city("Brussels, Belgium", &["Brussels"], m(0.86, 1.52, 0.17, 0.90, 11.2, 50.0, 10800.0, Low)),
    city("Bangkok, Thailand", &["Bangkok"], m(0.95, 1.92, 0.24, 0.78, 3.2, 35.0, 4500.0, Medium)),
    city("Kuala Lumpur, Malaysia", &["Kuala Lumpur"], m(0.94, 1.85, 0.20, 0.82, 4.5, 28.0, 5200.0, Low)),
    city("Vancouver, Canada", &["Vancouver"], m(0.84, 1.52, 0.14, 0.93, 16.5, 33.0, 12800.0, Low)),
    city("Montreal, Canada", &["Montreal"], m(0.90, 1.62, 0.15, 0.91, 10.2, 37.0, 9500.0, Low)),
    city("Austin, USA", &["Austin"], m(0.88, 1.68, 0.18, 0.88, 12.5, 25.0, 10200.0, Low)),
    city("Miami, USA", &["Miami"], m(0.86, 1.62, 0.22, 0.84, 15.8, 22.0, 11500.0, Medium)),
    city("Melbourne, Australia", &["Melbourne"], m(0.86, 1.55, 0.13, 0.95, 16.2, 32.0, 12200.0, Low)),
    city("Auckland, New Zealand", &["Auckland"], m(0.87, 1.58, 0.12, 0.94, 14.5, 33.0, 11000.0, Low)),
    city("Pune, India", &["Pune"], m(0.65, 1.15, 0.28, 0.72, 6.5, 30.0, 2800.0, Medium)),
    city("Mumbai, India", &["Mumbai"], m(0.62, 1.18, 0.30, 0.70, 8.5, 30.0, 4200.0, Medium)),
    city("Bangalore, India", &["Bangalore", "Bengaluru, India", "Bengaluru"], m(0.68, 1.22, 0.26, 0.74, 7.2, 30.0, 3500.0, Medium)),
    city("Delhi, India", &["Delhi", "New Delhi, India"], m(0.60, 1.12, 0.35, 0.65, 7.8, 30.0, 3800.0, High)),
    city("Hyderabad, India", &["Hyderabad"], m(0.66, 1.20, 0.27, 0.73, 6.2, 30.0, 3200.0, Medium)),
    city("Chennai, India", &["Chennai"], m(0.64, 1.16, 0.28, 0.71, 5.8, 30.0, 3000.0, Medium)),
    city("Ahmedabad, India", &["Ahmedabad"], m(0.67, 1.18, 0.26, 0.72, 5.5, 30.0, 2600.0, Medium)),
    city("Kolkata, India", &["Kolkata"], m(0.62, 1.12, 0.30, 0.68, 4.8, 30.0, 2400.0, Medium)),
    city("Jaipur, India", &["Jaipur"], m(0.68, 1.20, 0.27, 0.70, 4.5, 30.0, 2200.0, Medium)),
    city("Surat, India", &["Surat"], m(0.70, 1.22, 0.25, 0.71, 4.2, 30.0, 2100.0, Medium)),
    city("Gurgaon, India", &["Gurgaon", "Gurugram, India", "Gurugram"], m(0.69, 1.24, 0.26, 0.74, 7.5, 30.0, 3600.0, Medium)),
    city("Noida, India", &["Noida"], m(0.67, 1.21, 0.27, 0.72, 6.8, 30.0, 3200.0, Medium)),
    city("Antwerp, Belgium", &["Antwerp"], m(0.87, 1.55, 0.15, 0.91, 9.8, 50.0, 9800.0, Low)),
    city("Bilbao, Spain", &["Bilbao"], m(0.90, 1.56, 0.18, 0.89, 7.2, 36.0, 8200.0, Low)),
    city("Valencia, Spain", &["Valencia"], m(0.92, 1.58, 0.19, 0.87, 6.5, 36.0, 7800.0, Low)),
    city("Seville, Spain", &["Seville"], m(0.93, 1.60, 0.20, 0.86, 5.8, 36.0, 7200.0, Low)),
    city("Wellington, New Zealand", &["Wellington"], m(0.88, 1.60, 0.11, 0.95, 12.5, 33.0, 10500.0, Low)),
    city("Christchurch, New Zealand", &["Christchurch"], m(0.89, 1.62, 0.12, 0.93, 10.8, 33.0, 9800.0, Low)),
    city("Hubli-Dharwad, India", &["Hubli-Dharwad", "Hubli", "Dharwad"], m(0.72, 1.28, 0.24, 0.68, 3.5, 30.0, 1800.0, Medium)),
    city("Coimbatore, India", &["Coimbatore"], m(0.70, 1.25, 0.25, 0.70, 4.2, 30.0, 2000.0, Medium)),
    city("Indore, India", &["Indore"], m(0.71, 1.26, 0.24, 0.71, 3.8, 30.0, 1900.0, Medium)),
    city("Lucknow, India", &["Lucknow"], m(0.69, 1.22, 0.26, 0.69, 4.0, 30.0, 2100.0, Medium)),
    city("Nagpur, India", &["Nagpur"], m(0.70, 1.24, 0.25, 0.70, 3.6, 30.0, 1850.0, Medium)),
    city("Visakhapatnam, India", &["Visakhapatnam", "Vizag"], m(0.69, 1.23, 0.26, 0.69, 4.1, 30.0, 2050.0, Medium)),
    city("Bhopal, India", &["Bhopal"], m(0.71, 1.25, 0.25, 0.70, 3.5, 30.0, 1800.0, Medium)),
    city("Chandigarh, India", &["Chandigarh"], m(0.72, 1.28, 0.22, 0.76, 5.2, 30.0, 2400.0, Low)),
    city("Kochi, India", &["Kochi"], m(0.70, 1.24, 0.24, 0.72, 4.5, 30.0, 2200.0, Medium)),
    city("Thiruvananthapuram, India", &["Thiruvananthapuram"], m(0.69, 1.22, 0.25, 0.71, 4.2, 30.0, 2100.0, Medium)),
    city("Los Angeles, USA", &["Los Angeles"], m(0.76, 1.48, 0.22, 0.85, 24.5, 33.0, 19500.0, Medium)),
    city("Chicago, USA", &["Chicago"], m(0.84, 1.58, 0.20, 0.86, 14.2, 32.0, 13500.0, Medium)),
    city("Seattle, USA", &["Seattle"], m(0.82, 1.55, 0.18, 0.89, 18.5, 28.0, 15200.0, Low)),
    city("Boston, USA", &["Boston"], m(0.80, 1.52, 0.19, 0.90, 20.2, 32.0, 16800.0, Low)),
    city("Denver, USA", &["Denver"], m(0.86, 1.62, 0.17, 0.88, 12.8, 28.0, 11200.0, Low)),
    city("Manchester, UK", &["Manchester"], m(0.88, 1.55, 0.18, 0.87, 10.5, 32.0, 9800.0, Low)),
    city("Edinburgh, UK", &["Edinburgh"], m(0.87, 1.54, 0.16, 0.90, 11.2, 32.0, 10200.0, Low)),
    city("Birmingham, UK", &["Birmingham"], m(0.89, 1.58, 0.19, 0.86, 9.2, 32.0, 9200.0, Low)),
    city("Glasgow, UK", &["Glasgow"], m(0.90, 1.60, 0.18, 0.85, 8.5, 32.0, 8800.0, Low)),
    city("Shanghai, China", &["Shanghai"], m(0.80, 1.55, 0.25, 0.82, 15.5, 45.0, 12500.0, Medium)),
    city("Beijing, China", &["Beijing"], m(0.78, 1.50, 0.28, 0.80, 14.8, 45.0, 13200.0, Medium)),
    city("Shenzhen, China", &["Shenzhen"], m(0.82, 1.58, 0.24, 0.83, 16.2, 45.0, 11800.0, Medium)),
    city("Ho Chi Minh City, Vietnam", &["Ho Chi Minh City"], m(0.92, 1.85, 0.26, 0.75, 4.5, 35.0, 4200.0, Medium)),
    city("Hanoi, Vietnam", &["Hanoi"], m(0.93, 1.82, 0.27, 0.74, 4.2, 35.0, 3800.0, Medium)),
    city("Jakarta, Indonesia", &["Jakarta"], m(0.90, 1.78, 0.30, 0.72, 5.2, 30.0, 4800.0, Medium)),
    city("Manila, Philippines", &["Manila"], m(0.88, 1.72, 0.32, 0.70, 4.8, 32.0, 4500.0, Medium)),
    city("Taipei, Taiwan", &["Taipei"], m(0.84, 1.62, 0.14, 0.91, 10.5, 20.0, 8500.0, Low)),
    city("Kaohsiung, Taiwan", &["Kaohsiung"], m(0.88, 1.72, 0.13, 0.89, 7.2, 20.0, 6500.0, Low)),
    city("Taichung, Taiwan", &["Taichung"], m(0.89, 1.75, 0.12, 0.90, 6.5, 20.0, 6000.0, Low)),
    city("Cebu, Philippines", &["Cebu"], m(0.92, 1.82, 0.30, 0.72, 3.8, 32.0, 3800.0, Medium)),
    city("Bali, Indonesia", &["Bali"], m(0.94, 1.88, 0.28, 0.76, 3.2, 30.0, 3500.0, Medium)),
    city("Phuket, Thailand", &["Phuket"], m(0.93, 1.85, 0.26, 0.78, 4.0, 35.0, 4000.0, Medium)),
    city("Chiang Mai, Thailand", &["Chiang Mai"], m(0.96, 1.95, 0.22, 0.80, 2.5, 35.0, 3200.0, Low)),
    city("Penang, Malaysia", &["Penang"], m(0.95, 1.88, 0.18, 0.84, 3.8, 28.0, 4200.0, Low)),
    city("Abu Dhabi, UAE", &["Abu Dhabi"], m(0.90, 1.75, 0.18, 0.86, 10.5, 0.0, 10200.0, Low)),
    city("Doha, Qatar", &["Doha"], m(0.88, 1.70, 0.20, 0.84, 12.8, 0.0, 11500.0, Low)),
    city("Riyadh, Saudi Arabia", &["Riyadh"], m(0.92, 1.78, 0.22, 0.80, 8.5, 0.0, 9200.0, Medium)),
    city("Sao Paulo, Brazil", &["Sao Paulo"], m(0.82, 1.55, 0.32, 0.75, 8.5, 27.5, 7200.0, High)),
    city("Buenos Aires, Argentina", &["Buenos Aires"], m(0.85, 1.58, 0.35, 0.78, 6.2, 35.0, 5800.0, High)),
    city("Mexico City, Mexico", &["Mexico City"], m(0.88, 1.65, 0.30, 0.76, 5.5, 35.0, 5200.0, Medium)),
    city("Cape Town, South Africa", &["Cape Town"], m(0.86, 1.62, 0.28, 0.78, 5.8, 45.0, 5500.0, Medium)),
    city("Johannesburg, South Africa", &["Johannesburg"], m(0.84, 1.58, 0.32, 0.74, 5.2, 45.0, 5200.0, High)),
    city("Cairo, Egypt", &["Cairo"], m(0.90, 1.72, 0.35, 0.68, 4.2, 22.5, 3800.0, High)),
    city("Ankara, Turkey", &["Ankara"], m(0.88, 1.65, 0.28, 0.76, 5.5, 35.0, 4500.0, Medium)),
    city("Istanbul, Turkey", &["Istanbul"], m(0.85, 1.58, 0.30, 0.78, 7.2, 35.0, 5200.0, Medium)),
    city("Izmir, Turkey", &["Izmir"], m(0.90, 1.70, 0.26, 0.77, 4.8, 35.0, 4000.0, Medium)),
    city("Suva, Fiji", &["Suva"], m(0.92, 1.55, 0.35, 0.65, 3.5, 20.0, 3200.0, High)),
    city("Port Moresby, Papua New Guinea", &["Port Moresby"], m(0.88, 1.45, 0.42, 0.55, 4.2, 30.0, 4500.0, High)),
    city("Faridabad, India", &["Faridabad"], m(0.68, 1.20, 0.28, 0.70, 5.8, 30.0, 2800.0, Medium)),
    city("Ghaziabad, India", &["Ghaziabad"], m(0.67, 1.18, 0.29, 0.68, 5.5, 30.0, 2600.0, Medium)),
    city("Vadodara, India", &["Vadodara"], m(0.71, 1.24, 0.25, 0.72, 4.2, 30.0, 2200.0, Medium)),
    city("Rajkot, India", &["Rajkot"], m(0.72, 1.26, 0.24, 0.71, 3.8, 30.0, 2000.0, Medium)),
    city("Nashik, India", &["Nashik"], m(0.70, 1.22, 0.26, 0.70, 4.0, 30.0, 2100.0, Medium)),
    city("Mysore, India", &["Mysore", "Mysuru, India", "Mysuru"], m(0.71, 1.24, 0.24, 0.73, 3.8, 30.0, 2000.0, Medium)),
    city("Mangalore, India", &["Mangalore"], m(0.70, 1.23, 0.25, 0.72, 4.2, 30.0, 2150.0, Medium)),
    city("Trivandrum, India", &["Trivandrum"], m(0.69, 1.22, 0.25, 0.71, 4.2, 30.0, 2100.0, Medium)),
    city("Moscow, Russia", &["Moscow"], m(0.82, 1.52, 0.35, 0.78, 8.5, 13.0, 8500.0, High)),
    city("St Petersburg, Russia", &["St Petersburg"], m(0.85, 1.58, 0.32, 0.80, 6.2, 13.0, 6800.0, High)),
    city("Lima, Peru", &["Lima"], m(0.88, 1.68, 0.30, 0.72, 4.8, 30.0, 4200.0, Medium)),
    city("Bogota, Colombia", &["Bogota"], m(0.86, 1.62, 0.32, 0.70, 4.5, 33.0, 4000.0, Medium)),
    city("Santiago, Chile", &["Santiago"], m(0.84, 1.58, 0.25, 0.80, 6.2, 35.0, 5500.0, Medium)),
    city("Medellin, Colombia", &["Medellin"], m(0.90, 1.75, 0.28, 0.76, 3.5, 33.0, 3500.0, Medium)),
    city("Lagos, Nigeria", &["Lagos"], m(0.85, 1.62, 0.40, 0.58, 5.5, 24.0, 4800.0, High)),
    city("Nairobi, Kenya", &["Nairobi"], m(0.88, 1.68, 0.35, 0.65, 4.2, 30.0, 4000.0, High)),
    city("Casablanca, Morocco", &["Casablanca"], m(0.90, 1.72, 0.28, 0.72, 3.8, 38.0, 3500.0, Medium)),
    city("San Francisco, USA", &["San Francisco"], m(0.72, 1.45, 0.20, 0.88, 32.5, 35.0, 22000.0, Medium)),
    city("Washington DC, USA", &["Washington DC"], m(0.78, 1.52, 0.18, 0.89, 22.5, 34.0, 16500.0, Low)),
    city("Philadelphia, USA", &["Philadelphia"], m(0.85, 1.58, 0.22, 0.84, 12.5, 32.0, 11500.0, Medium)),
    city("Phoenix, USA", &["Phoenix"], m(0.88, 1.65, 0.20, 0.82, 10.5, 25.0, 9500.0, Low)),
    city("San Diego, USA", &["San Diego"], m(0.82, 1.55, 0.18, 0.90, 18.5, 33.0, 14500.0, Low)),
    city("Dallas, USA", &["Dallas"], m(0.88, 1.68, 0.19, 0.84, 11.2, 22.0, 10200.0, Low)),
    city("Houston, USA", &["Houston"], m(0.90, 1.72, 0.21, 0.82, 9.8, 22.0, 9800.0, Low)),
    city("Atlanta, USA", &["Atlanta"], m(0.87, 1.65, 0.20, 0.83, 10.8, 28.0, 10500.0, Low)),
    city("Lyon, France", &["Lyon"], m(0.86, 1.52, 0.18, 0.90, 12.5, 45.0, 10200.0, Low)),
    city("Marseille, France", &["Marseille"], m(0.88, 1.55, 0.22, 0.86, 10.2, 45.0, 9500.0, Medium)),
    city("Nice, France", &["Nice"], m(0.82, 1.48, 0.16, 0.92, 16.5, 45.0, 12500.0, Low)),
    city("Porto, Portugal", &["Porto"], m(0.92, 1.72, 0.17, 0.88, 5.8, 28.0, 6800.0, Low)),
    city("Osaka, Japan", &["Osaka"], m(0.80, 1.52, 0.14, 0.92, 15.2, 28.5, 12800.0, Low)),
    city("Kyoto, Japan", &["Kyoto"], m(0.82, 1.55, 0.12, 0.94, 14.5, 28.5, 11500.0, Low)),
    city("Fukuoka, Japan", &["Fukuoka"], m(0.85, 1.62, 0.13, 0.91, 11.8, 28.5, 10200.0, Low)),
    city("Busan, South Korea", &["Busan"], m(0.88, 1.62, 0.15, 0.90, 10.5, 26.5, 10500.0, Low)),
    city("Incheon, South Korea", &["Incheon"], m(0.87, 1.60, 0.16, 0.89, 11.2, 26.5, 10800.0, Low)),
];
