//! Fixture catalogs shared by unit and behaviour tests.

use crate::{BodyStyle, Drivetrain, ExtrasTag, UsageTag, Vehicle, VehicleDetails};

/// Small catalog spanning every body style the behaviour tests touch.
///
/// Rows are returned in a fixed order that is *not* sorted by id, so callers
/// can observe catalog-order tie-breaking.
#[must_use]
pub fn sample_catalog() -> Vec<Vehicle> {
    [
        Vehicle::builder("toyota-corolla-2020", "Toyota", "Corolla")
            .trim("LE")
            .years([2020, 2021, 2022])
            .msrp(20_000, 24_500)
            .body_style(BodyStyle::Sedan)
            .iihs_top_safety_pick(true)
            .nhtsa_overall(5)
            .safety_features(["Automatic emergency braking", "Lane tracing assist"])
            .fit_tags([UsageTag::DailyCommute, UsageTag::HighwayMiles])
            .extras_tags([ExtrasTag::EcoConscious])
            .details(VehicleDetails {
                fuel_economy_mpg: Some(34),
                sources: vec!["iihs.org".into()],
                ..VehicleDetails::default()
            }),
        Vehicle::builder("honda-fit-2019", "Honda", "Fit")
            .years([2018, 2019, 2020])
            .msrp(16_500, 21_000)
            .body_style(BodyStyle::Hatchback)
            .nhtsa_overall(4)
            .safety_features(["Collision mitigation braking"])
            .fit_tags([UsageTag::DailyCommute])
            .extras_tags([ExtrasTag::BrightColor, ExtrasTag::EcoConscious]),
        Vehicle::builder("subaru-crosstrek-2023", "Subaru", "Crosstrek")
            .years([2023, 2024])
            .msrp(24_000, 30_500)
            .body_style(BodyStyle::Suv)
            .drivetrain(Drivetrain::Awd)
            .iihs_top_safety_pick(true)
            .nhtsa_overall(5)
            .safety_features([
                "EyeSight driver assist",
                "Blind-spot detection",
                "Rear cross-traffic alert",
            ])
            .fit_tags([UsageTag::WeekendAdventure, UsageTag::DailyCommute])
            .extras_tags([ExtrasTag::HigherSeating, ExtrasTag::BrightColor]),
        Vehicle::builder("ford-maverick-2022", "Ford", "Maverick")
            .years([2022, 2023])
            .msrp(23_500, 35_000)
            .body_style(BodyStyle::Truck)
            .nhtsa_overall(3)
            .fit_tags([UsageTag::WeekendAdventure])
            .extras_tags([ExtrasTag::AmericanMade, ExtrasTag::HigherSeating]),
        Vehicle::builder("honda-odyssey-2021", "Honda", "Odyssey")
            .years([2021])
            .msrp(32_000, 48_000)
            .body_style(BodyStyle::Minivan)
            .iihs_top_safety_pick(true)
            .nhtsa_overall(5)
            .safety_features(["Honda Sensing", "Rear seat reminder"])
            .fit_tags([UsageTag::SharedFamily, UsageTag::HighwayMiles]),
    ]
    .into_iter()
    .filter_map(|builder| builder.build().ok())
    .collect()
}

/// Vehicle A of the budget-and-safety scenario: cheap and as safe as it gets.
#[must_use]
pub fn safe_budget_vehicle() -> Vehicle {
    Vehicle {
        id: "vehicle-a".into(),
        make: "Mazda".into(),
        model: "3".into(),
        trim: None,
        years: [2022].into(),
        msrp_min: 17_000,
        msrp_max: 19_000,
        body_style: BodyStyle::Sedan,
        drivetrain: Drivetrain::Fwd,
        safety_iihs_top_safety_pick: true,
        safety_nhtsa_overall: Some(5),
        safety_notable_features: vec![
            "Smart brake support".into(),
            "Blind-spot monitoring".into(),
            "Driver attention alert".into(),
        ],
        fit_tags: [UsageTag::DailyCommute].into(),
        extras_tags: [ExtrasTag::SportyLook].into(),
        details: VehicleDetails::default(),
    }
}

/// Vehicle B of the budget-and-safety scenario: over budget and poorly rated.
#[must_use]
pub fn risky_pricey_vehicle() -> Vehicle {
    Vehicle {
        id: "vehicle-b".into(),
        make: "Dodge".into(),
        model: "Challenger".into(),
        trim: None,
        years: [2019].into(),
        msrp_min: 22_000,
        msrp_max: 25_000,
        body_style: BodyStyle::Coupe,
        drivetrain: Drivetrain::Rwd,
        safety_iihs_top_safety_pick: false,
        safety_nhtsa_overall: Some(3),
        safety_notable_features: Vec::new(),
        fit_tags: [UsageTag::WeekendAdventure].into(),
        extras_tags: [ExtrasTag::SportyLook, ExtrasTag::AmericanMade].into(),
        details: VehicleDetails::default(),
    }
}

/// Schema for the `vehicles` table read by the SQLite catalog.
#[cfg(feature = "store-sqlite")]
pub const CREATE_VEHICLES_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS vehicles (
    id TEXT PRIMARY KEY,
    make TEXT NOT NULL,
    model TEXT NOT NULL,
    trim TEXT,
    years TEXT NOT NULL,
    msrp_min INTEGER NOT NULL,
    msrp_max INTEGER NOT NULL,
    body_style TEXT NOT NULL,
    drivetrain TEXT NOT NULL,
    safety_iihs_top_safety_pick INTEGER NOT NULL DEFAULT 0,
    safety_nhtsa_overall INTEGER,
    safety_notable_features TEXT NOT NULL DEFAULT '[]',
    fit_tags TEXT NOT NULL DEFAULT '[]',
    extras_tags TEXT NOT NULL DEFAULT '[]',
    details TEXT NOT NULL DEFAULT '{}'
)";

/// Errors raised while writing a fixture catalog.
#[cfg(feature = "store-sqlite")]
#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    /// SQLite rejected a statement.
    #[error(transparent)]
    Database(#[from] rusqlite::Error),
    /// A column could not be encoded.
    #[error(transparent)]
    Encode(#[from] serde_json::Error),
    /// An enum did not encode to a plain string.
    #[error("column {0} did not encode as a string")]
    NotAString(&'static str),
}

/// Create (or extend) an SQLite catalog at `path` holding `vehicles`.
///
/// # Errors
/// Returns [`FixtureError`] when the database cannot be written.
#[cfg(feature = "store-sqlite")]
pub fn write_sqlite_catalog(
    path: &std::path::Path,
    vehicles: &[Vehicle],
) -> Result<(), FixtureError> {
    let mut connection = rusqlite::Connection::open(path)?;
    connection.execute(CREATE_VEHICLES_TABLE_SQL, [])?;
    let tx = connection.transaction()?;
    {
        let mut insert = tx.prepare(
            "INSERT INTO vehicles (id, make, model, trim, years, msrp_min, msrp_max, \
             body_style, drivetrain, safety_iihs_top_safety_pick, safety_nhtsa_overall, \
             safety_notable_features, fit_tags, extras_tags, details) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
        )?;
        for vehicle in vehicles {
            insert.execute(rusqlite::params![
                vehicle.id,
                vehicle.make,
                vehicle.model,
                vehicle.trim,
                serde_json::to_string(&vehicle.years)?,
                vehicle.msrp_min,
                vehicle.msrp_max,
                wire_name(&vehicle.body_style, "body_style")?,
                wire_name(&vehicle.drivetrain, "drivetrain")?,
                vehicle.safety_iihs_top_safety_pick,
                vehicle.safety_nhtsa_overall,
                serde_json::to_string(&vehicle.safety_notable_features)?,
                serde_json::to_string(&vehicle.fit_tags)?,
                serde_json::to_string(&vehicle.extras_tags)?,
                serde_json::to_string(&vehicle.details)?,
            ])?;
        }
    }
    tx.commit()?;
    Ok(())
}

#[cfg(feature = "store-sqlite")]
fn wire_name<T: serde::Serialize>(
    value: &T,
    column: &'static str,
) -> Result<String, FixtureError> {
    match serde_json::to_value(value)? {
        serde_json::Value::String(name) => Ok(name),
        _ => Err(FixtureError::NotAString(column)),
    }
}
