//! Nouns that describe the planned burn. Each raises program alarm 115 and
//! shows nothing when no burn is loaded.

use super::format::{countdown_minutes_seconds, fixed_digits, whole_digits, Clock};
use super::{Noun, NounContext, NounError, NounPayload, NounReadout};
use crate::computer::{FlightComputer, ALARM_NO_BURN_DATA};

const NO_BURN_MESSAGE: &str = "No burn data loaded";

// Values copied out of the computer so it can be borrowed mutably afterwards.
#[derive(Debug, Clone, Copy)]
struct BurnSnapshot {
    velocity_at_cutoff: f64,
    time_until_ignition: f64,
    accumulated_delta_v: f64,
    delta_v_required: f64,
    burn_duration: f64,
    time_to_ignition: f64,
}

impl BurnSnapshot {
    fn capture(computer: &dyn FlightComputer) -> Option<Self> {
        computer.next_burn().map(|burn| Self {
            velocity_at_cutoff: burn.velocity_at_cutoff(),
            time_until_ignition: burn.time_until_ignition(),
            accumulated_delta_v: burn.accumulated_delta_v(),
            delta_v_required: burn.delta_v_required(),
            burn_duration: burn.burn_duration(),
            time_to_ignition: burn.calculate_time_to_ignition(),
        })
    }
}

fn loaded_burn(ctx: &mut NounContext<'_>) -> Option<BurnSnapshot> {
    let snapshot = BurnSnapshot::capture(&*ctx.computer);
    if snapshot.is_none() {
        ctx.computer
            .program_alarm(ALARM_NO_BURN_DATA, Some(NO_BURN_MESSAGE));
    }
    snapshot
}

const NO_BURN: NounReadout = NounReadout::Alarm {
    code: ALARM_NO_BURN_DATA,
};

#[derive(Debug, Default)]
pub struct Noun14;

impl Noun for Noun14 {
    fn description(&self) -> &str {
        "Burn error display (Expected Δv at cutoff (xxxxx m/s), Actual Δv at cutoff (xxxxx m/s), Difference (xxxx.x m/s))"
    }

    fn return_data(&self, ctx: &mut NounContext<'_>) -> Result<NounReadout, NounError> {
        let Some(burn) = loaded_burn(ctx) else {
            return Ok(NO_BURN);
        };

        let expected = burn.velocity_at_cutoff;
        let actual = ctx.telemetry("orbitalVelocity")?;
        let error = actual - expected;

        Ok(NounReadout::Display(NounPayload::new(
            [whole_digits(expected), whole_digits(actual), fixed_digits(error, 1)],
            false,
            [
                Some("Expected velocity at cutoff (xxxxx m/s)"),
                Some("Actual velocity at cutoff (xxxxx m/s)"),
                Some("Velocity error (xxxx.x m/s)"),
            ],
        )))
    }
}

#[derive(Debug, Default)]
pub struct Noun33;

impl Noun for Noun33 {
    fn description(&self) -> &str {
        "Time to Ignition (00xxx hours, 000xx minutes, 0xx.xx seconds)"
    }

    fn return_data(&self, ctx: &mut NounContext<'_>) -> Result<NounReadout, NounError> {
        let Some(burn) = loaded_burn(ctx) else {
            return Ok(NO_BURN);
        };

        let clock = Clock::with_hours(burn.time_to_ignition);
        Ok(NounReadout::Display(NounPayload::new(
            [
                format!("-{:04}", clock.hours),
                format!("-bb{:02}", clock.minutes),
                format!("-bb{:02}", clock.whole_seconds()),
            ],
            false,
            [
                Some("Time To Ignition (hhhhh)"),
                Some("Time To Ignition (bbbmm)"),
                Some("Time To Ignition (bbbss)"),
            ],
        )))
    }
}

#[derive(Debug, Default)]
pub struct Noun40;

impl Noun for Noun40 {
    fn description(&self) -> &str {
        "Burn Data (Time from ignition, orbital velocity, accumulated Δv)"
    }

    fn return_data(&self, ctx: &mut NounContext<'_>) -> Result<NounReadout, NounError> {
        let Some(burn) = loaded_burn(ctx) else {
            return Ok(NO_BURN);
        };

        let velocity = ctx.telemetry("orbitalVelocity")?;
        Ok(NounReadout::Display(NounPayload::new(
            [
                countdown_minutes_seconds(burn.time_until_ignition),
                whole_digits(velocity),
                whole_digits(burn.accumulated_delta_v),
            ],
            false,
            [
                Some("Time From Ignition (mmbss minutes, seconds)"),
                Some("Orbital Velocity (xxxxx m/s)"),
                Some("Accumulated Δv (xxxxx m/s)"),
            ],
        )))
    }
}

#[derive(Debug, Default)]
pub struct Noun95;

impl Noun for Noun95 {
    fn description(&self) -> &str {
        "TMI Burn Data Display"
    }

    fn return_data(&self, ctx: &mut NounContext<'_>) -> Result<NounReadout, NounError> {
        let Some(burn) = loaded_burn(ctx) else {
            return Ok(NO_BURN);
        };

        Ok(NounReadout::Display(NounPayload::new(
            [
                countdown_minutes_seconds(burn.time_until_ignition),
                whole_digits(burn.delta_v_required),
                whole_digits(burn.burn_duration),
            ],
            false,
            [
                Some("Time To Ignition (TIG) (xxbxx mins, seconds)"),
                Some("Δv (xxxxx m/s)"),
                Some("Burn duration (xxxxx seconds)"),
            ],
        )))
    }
}
