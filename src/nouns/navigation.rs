//! Nouns rendered directly from live vessel telemetry.

use super::format::{fixed_digits, zero_pad, Clock};
use super::{Noun, NounContext, NounError, NounPayload, NounReadout};

#[derive(Debug, Default)]
pub struct Noun17;

impl Noun for Noun17 {
    fn description(&self) -> &str {
        "Attitude (Roll, Pitch, Yaw)"
    }

    fn return_data(&self, ctx: &mut NounContext<'_>) -> Result<NounReadout, NounError> {
        let roll = ctx.telemetry("roll")?;
        let pitch = ctx.telemetry("pitch")?;
        let yaw = ctx.telemetry("heading")?;

        Ok(NounReadout::Display(NounPayload::new(
            [fixed_digits(roll, 1), fixed_digits(pitch, 1), fixed_digits(yaw, 1)],
            false,
            [Some("Roll (0xxx.x°)"), Some("Pitch (0xxx.x°)"), Some("Yaw (0xxx.x°)")],
        )))
    }
}

#[derive(Debug, Default)]
pub struct Noun36;

impl Noun for Noun36 {
    fn description(&self) -> &str {
        "Mission Elapsed Time (MET) (dddhh, bbbmm, bss.ss)"
    }

    fn return_data(&self, ctx: &mut NounContext<'_>) -> Result<NounReadout, NounError> {
        let clock = Clock::with_days(ctx.telemetry("missionTime")?);

        Ok(NounReadout::Display(NounPayload::new(
            [
                format!("{:02}b{:02}", clock.days, clock.hours),
                format!("bbb{:02}", clock.minutes),
                format!("b{}", zero_pad(&fixed_digits(clock.seconds, 2), 4)),
            ],
            false,
            [
                Some("Mission Elapsed Time (ddbhh)"),
                Some("Mission Elapsed Time (bbbmm)"),
                Some("Mission Elapsed Time (bss.ss)"),
            ],
        )))
    }
}

#[derive(Debug, Default)]
pub struct Noun43;

impl Noun for Noun43 {
    fn description(&self) -> &str {
        "Geographic Position (Latitude, Longitude, Altitude)"
    }

    fn return_data(&self, ctx: &mut NounContext<'_>) -> Result<NounReadout, NounError> {
        let latitude = ctx.telemetry("lat")?;
        let longitude = ctx.telemetry("long")?;
        let altitude = ctx.telemetry("altitude")? / 1000.0;

        // The altitude unit of this register is still unsettled.
        Ok(NounReadout::Display(NounPayload::new(
            [
                fixed_digits(latitude, 2),
                fixed_digits(longitude, 2),
                fixed_digits(altitude, 1),
            ],
            false,
            [Some("Latitude (xxx.xx°)"), Some("Longitude (xxx.xx°)"), Some("Altitude")],
        )))
    }
}

#[derive(Debug, Default)]
pub struct Noun44;

impl Noun for Noun44 {
    fn description(&self) -> &str {
        "Apoapsis (xxx.xx km), Periapsis (xxx.xx km), Time To Apoapsis (hmmss)"
    }

    fn return_data(&self, ctx: &mut NounContext<'_>) -> Result<NounReadout, NounError> {
        let apoapsis = ctx.telemetry("ApA")? / 100.0;
        let periapsis = ctx.telemetry("PeA")? / 100.0;
        let time_to_apoapsis = Clock::with_hours(ctx.telemetry("timeToAp")?.trunc());

        Ok(NounReadout::Display(NounPayload::new(
            [
                fixed_digits(apoapsis, 1),
                fixed_digits(periapsis, 1),
                format!(
                    "{}{:02}{:02}",
                    time_to_apoapsis.hours,
                    time_to_apoapsis.minutes,
                    time_to_apoapsis.whole_seconds()
                ),
            ],
            false,
            [
                Some("Apoapsis Altitude (xxx.xx km)"),
                Some("Periapsis Altitude (xxx.xx km)"),
                Some("Time to Apoapsis (hmmss)"),
            ],
        )))
    }
}

#[derive(Debug, Default)]
pub struct Noun50;

impl Noun for Noun50 {
    fn description(&self) -> &str {
        "Surface Velocity Display (X, Y, Z in xxxx.x m/s)"
    }

    fn return_data(&self, ctx: &mut NounContext<'_>) -> Result<NounReadout, NounError> {
        let x = ctx.telemetry("surfaceVelocityx")?;
        let y = ctx.telemetry("surfaceVelocityy")?;
        let z = ctx.telemetry("surfaceVelocityz")?;

        Ok(NounReadout::Display(NounPayload::new(
            [fixed_digits(x, 1), fixed_digits(y, 1), fixed_digits(z, 1)],
            false,
            [
                Some("Surface Velocity X (xxxx.x m/s)"),
                Some("Surface Velocity Y (xxxx.x m/s)"),
                Some("Surface Velocity Z (xxxx.x m/s)"),
            ],
        )))
    }
}

#[derive(Debug, Default)]
pub struct Noun62;

impl Noun for Noun62 {
    fn description(&self) -> &str {
        "Orbital Velocity, Altitude Rate, Altitude"
    }

    fn return_data(&self, ctx: &mut NounContext<'_>) -> Result<NounReadout, NounError> {
        let velocity = ctx.telemetry("relativeVelocity")?;
        let altitude_rate = ctx.telemetry("verticalSpeed")?;
        let altitude = ctx.telemetry("altitude")? / 1000.0;

        Ok(NounReadout::Display(NounPayload::new(
            [
                fixed_digits(velocity, 1),
                fixed_digits(altitude_rate, 1),
                fixed_digits(altitude, 1),
            ],
            false,
            [
                Some("Inertial Velocity (xxxx.x m/s)"),
                Some("Altitude Rate (xxxx.x m/s)"),
                Some("Altitude (xxxx.x km)"),
            ],
        )))
    }
}
