//! Nouns backed by onboard-computer state rather than live telemetry.

use super::format::BLANK_REGISTER;
use super::{Noun, NounCode, NounContext, NounError, NounPayload, NounReadout};
use crate::computer::FlightComputer;

// Ground-entered value for `code` at `index`, blank when nothing was entered.
fn ground_value(computer: &dyn FlightComputer, code: &str, index: usize) -> String {
    computer
        .noun_data(code)
        .and_then(|values| values.get(index))
        .cloned()
        .unwrap_or_else(|| BLANK_REGISTER.to_string())
}

#[derive(Debug, Default)]
pub struct Noun09;

impl Noun for Noun09 {
    fn description(&self) -> &str {
        "Alarm Codes"
    }

    fn return_data(&self, ctx: &mut NounContext<'_>) -> Result<NounReadout, NounError> {
        let [first, second, last] = ctx.computer.alarm_codes();
        Ok(NounReadout::Display(NounPayload::new(
            [first.to_string(), second.to_string(), last.to_string()],
            true,
            [
                Some("First alarm code"),
                Some("Second alarm code"),
                Some("Last alarm code"),
            ],
        )))
    }
}

#[derive(Debug, Default)]
pub struct Noun25;

impl Noun for Noun25 {
    fn description(&self) -> &str {
        "Spacecraft mass"
    }

    fn return_data(&self, ctx: &mut NounContext<'_>) -> Result<NounReadout, NounError> {
        let computer = &*ctx.computer;
        Ok(NounReadout::Display(NounPayload::new(
            [
                ground_value(computer, "25", 0),
                ground_value(computer, "25", 1),
                BLANK_REGISTER.to_string(),
            ],
            true,
            [Some("Spacecraft mass"), None, None],
        )))
    }
}

#[derive(Debug, Default)]
pub struct Noun30;

impl Noun for Noun30 {
    fn description(&self) -> &str {
        "Octal Target ID (000XX)"
    }

    fn return_data(&self, ctx: &mut NounContext<'_>) -> Result<NounReadout, NounError> {
        Ok(NounReadout::Display(NounPayload::new(
            [
                ground_value(&*ctx.computer, "30", 0),
                BLANK_REGISTER.to_string(),
                BLANK_REGISTER.to_string(),
            ],
            true,
            [Some("Target Octal ID"), None, None],
        )))
    }

    fn accepts_data(&self) -> bool {
        true
    }

    fn receive_data(
        &self,
        code: NounCode,
        ctx: &mut NounContext<'_>,
        data: Vec<String>,
    ) -> Result<(), NounError> {
        ctx.computer.set_noun_data(code.as_str(), data);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct Noun31;

impl Noun for Noun31 {
    fn description(&self) -> &str {
        "Stage Max Thrust"
    }

    fn return_data(&self, ctx: &mut NounContext<'_>) -> Result<NounReadout, NounError> {
        let computer = &*ctx.computer;
        Ok(NounReadout::Display(NounPayload::new(
            [
                ground_value(computer, "31", 0),
                ground_value(computer, "31", 1),
                BLANK_REGISTER.to_string(),
            ],
            false,
            [Some("Stage Max Thrust (s)"), None, None],
        )))
    }
}

#[derive(Debug, Default)]
pub struct Noun38;

impl Noun for Noun38 {
    fn description(&self) -> &str {
        "Specific Impulse"
    }

    fn return_data(&self, ctx: &mut NounContext<'_>) -> Result<NounReadout, NounError> {
        Ok(NounReadout::Display(NounPayload::new(
            [
                ground_value(&*ctx.computer, "38", 0),
                BLANK_REGISTER.to_string(),
                BLANK_REGISTER.to_string(),
            ],
            false,
            [Some("Stage Specific Impulse (s)"), None, None],
        )))
    }
}
