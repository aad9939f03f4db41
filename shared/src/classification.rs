//! Rule-based threat classification.
//!
//! `classify` combines an event's hazard category with a weather reading into
//! a narrative summary, three display stats and a status level. It is total:
//! a missing reading (or a missing field in a present one) falls back to
//! [`WeatherReading::NEUTRAL`].

use rand::Rng;

use crate::models::{Analysis, Event, HazardCategory, Stat, StatusLevel, WeatherReading};

/// Wind above which fires are critical (km/h)
pub const FIRE_CRITICAL_WIND_KMH: f64 = 30.0;
/// Air temperature above which ice is melting (°C)
pub const ICE_MELTING_TEMP_C: f64 = 0.0;
/// Wind above which storms are dangerous (km/h)
pub const STORM_DANGEROUS_WIND_KMH: f64 = 80.0;
/// Humidity below which fires spread rapidly (%)
pub const FIRE_RAPID_SPREAD_HUMIDITY_PCT: f64 = 30.0;

const HIGH_WIND_KMH: f64 = 40.0;
const LOW_PRESSURE_HPA: f64 = 1000.0;
const EXTREME_HEAT_C: f64 = 30.0;
const FREEZING_C: f64 = 0.0;

/// Upper bound of the simulated storm precipitation (mm)
pub const PRECIP_ESTIMATE_MAX_MM: f64 = 50.0;
/// Upper bound of the simulated volcanic SO2 flux (t/d)
pub const SO2_ESTIMATE_MAX_TPD: f64 = 1000.0;

/// Source of placeholder values for quantities the weather provider does not
/// report. These are not physically derived.
pub trait EstimateSource {
    /// Simulated storm precipitation in `[0, PRECIP_ESTIMATE_MAX_MM)`
    fn precipitation_mm(&mut self) -> f64;
    /// Simulated sulphur dioxide flux in `[0, SO2_ESTIMATE_MAX_TPD)`
    fn so2_flux_tpd(&mut self) -> f64;
}

/// Uniform estimates drawn from any random generator
pub struct RandomEstimates<R>(pub R);

impl<R: Rng> EstimateSource for RandomEstimates<R> {
    fn precipitation_mm(&mut self) -> f64 {
        self.0.gen_range(0.0..PRECIP_ESTIMATE_MAX_MM)
    }

    fn so2_flux_tpd(&mut self) -> f64 {
        self.0.gen_range(0.0..SO2_ESTIMATE_MAX_TPD)
    }
}

/// Pinned estimates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedEstimates {
    pub precipitation_mm: f64,
    pub so2_flux_tpd: f64,
}

impl EstimateSource for FixedEstimates {
    fn precipitation_mm(&mut self) -> f64 {
        self.precipitation_mm
    }

    fn so2_flux_tpd(&mut self) -> f64 {
        self.so2_flux_tpd
    }
}

/// Weather with every classifier input filled in
#[derive(Debug, Clone, Copy)]
struct Conditions {
    temperature_c: f64,
    wind_kmh: f64,
    pressure_hpa: f64,
    humidity_pct: f64,
}

impl Conditions {
    fn resolve(weather: Option<&WeatherReading>) -> Self {
        let neutral = WeatherReading::NEUTRAL;
        let w = weather.unwrap_or(&neutral);
        let pick = |value: Option<f64>, fallback: Option<f64>| {
            value
                .filter(|v| v.is_finite())
                .or(fallback)
                .unwrap_or_default()
        };

        Self {
            temperature_c: pick(w.temperature_c, neutral.temperature_c),
            wind_kmh: pick(w.wind_speed_kmh, neutral.wind_speed_kmh),
            pressure_hpa: pick(w.surface_pressure_hpa, neutral.surface_pressure_hpa),
            humidity_pct: pick(w.relative_humidity_pct, neutral.relative_humidity_pct),
        }
    }

    fn wind_text(&self) -> &'static str {
        if self.wind_kmh > HIGH_WIND_KMH {
            "High velocity winds detected, exacerbating conditions."
        } else {
            "Wind patterns are currently stable."
        }
    }

    fn pressure_text(&self) -> &'static str {
        if self.pressure_hpa < LOW_PRESSURE_HPA {
            "Low pressure system contributing to instability."
        } else {
            "Barometric pressure remains nominal."
        }
    }

    fn temperature_text(&self) -> &'static str {
        if self.temperature_c > EXTREME_HEAT_C {
            "Extreme heat signatures observed."
        } else if self.temperature_c < FREEZING_C {
            "Sub-zero temperatures confirmed."
        } else {
            "Ambient temperature within expected range."
        }
    }

    fn wind_stat(&self, label: &str) -> Stat {
        Stat::new(label, format!("{:.1}", self.wind_kmh), "km/h")
    }

    fn temperature_stat(&self, label: &str) -> Stat {
        Stat::new(label, format!("{:.1}", self.temperature_c), "°C")
    }

    fn pressure_stat(&self) -> Stat {
        Stat::new("Pressure", format!("{:.0}", self.pressure_hpa), "hPa")
    }

    fn humidity_stat(&self) -> Stat {
        Stat::new("Humidity", format!("{}", self.humidity_pct), "%")
    }
}

/// Classify with placeholder estimates drawn from the thread-local generator
pub fn classify(event: &Event, weather: Option<&WeatherReading>) -> Analysis {
    classify_with(event, weather, &mut RandomEstimates(rand::thread_rng()))
}

/// Classify with an explicit estimate source
pub fn classify_with(
    event: &Event,
    weather: Option<&WeatherReading>,
    estimates: &mut dyn EstimateSource,
) -> Analysis {
    classify_category(event.category, weather, estimates)
}

/// Classification keyed directly on the hazard category
pub fn classify_category(
    category: HazardCategory,
    weather: Option<&WeatherReading>,
    estimates: &mut dyn EstimateSource,
) -> Analysis {
    let c = Conditions::resolve(weather);

    match category {
        HazardCategory::Wildfire => {
            let spread = if c.humidity_pct < FIRE_RAPID_SPREAD_HUMIDITY_PCT {
                "rapid spread potential"
            } else {
                "moderate containment chance"
            };
            Analysis {
                summary: format!(
                    "Thermal imaging confirms active combustion. {} {} Humidity at {}% suggests {}. Recommendation: Deploy aerial suppressants.",
                    c.temperature_text(),
                    c.wind_text(),
                    c.humidity_pct,
                    spread
                ),
                stats: vec![c.wind_stat("Wind"), c.temperature_stat("Temp"), c.humidity_stat()],
                status: if c.wind_kmh > FIRE_CRITICAL_WIND_KMH {
                    StatusLevel::Critical
                } else {
                    StatusLevel::Warning
                },
            }
        }
        HazardCategory::SeaLakeIce => Analysis {
            summary: format!(
                "Cryospheric assessment initiated. {} Surface integrity compromised. {} Monitoring drift vectors for navigation hazards.",
                c.temperature_text(),
                c.wind_text()
            ),
            stats: vec![c.temperature_stat("Air Temp"), c.pressure_stat(), c.wind_stat("Wind")],
            status: if c.temperature_c > ICE_MELTING_TEMP_C {
                StatusLevel::Melting
            } else {
                StatusLevel::Stable
            },
        },
        HazardCategory::SevereStorm => Analysis {
            summary: format!(
                "Meteorological scan complete. {} {} Convective available potential energy is rising. Rain bands intensifying.",
                c.pressure_text(),
                c.wind_text()
            ),
            stats: vec![
                c.wind_stat("Wind"),
                c.pressure_stat(),
                Stat::new("Precip", format!("{:.1}", estimates.precipitation_mm()), "mm"),
            ],
            status: if c.wind_kmh > STORM_DANGEROUS_WIND_KMH {
                StatusLevel::Dangerous
            } else {
                StatusLevel::Tracking
            },
        },
        HazardCategory::Volcano => Analysis {
            summary: format!(
                "Geological disturbance active. {} (Ash plume dispersal vector). Seismic activity correlates with observed thermal anomalies.",
                c.wind_text()
            ),
            stats: vec![
                c.wind_stat("Wind (Ash)"),
                c.temperature_stat("Temp"),
                Stat::new("SO2 Flux", format!("{:.0}", estimates.so2_flux_tpd()), "t/d"),
            ],
            status: StatusLevel::Eruption,
        },
        HazardCategory::Other => Analysis {
            summary: format!(
                "Global sensor network report. Local conditions: {}°C, {}hPa. {} Data correlation in progress.",
                c.temperature_c,
                c.pressure_hpa,
                c.wind_text()
            ),
            stats: vec![c.temperature_stat("Temp"), c.wind_stat("Wind"), c.humidity_stat()],
            status: StatusLevel::Analyzing,
        },
    }
}
