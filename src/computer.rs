//! Boundary to the onboard computer.
//!
//! Noun formatters only need a narrow view of the computer: the planned burn,
//! ground-entered noun values, the alarm register and the ability to raise an
//! alarm. Mission logic lives behind these traits.

use heapless::Vec;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

pub const ALARM_SLOTS: usize = 3;
pub const MAX_ALARM_HISTORY: usize = 64;

/// Alarm raised when a display needs a burn and none is loaded.
pub const ALARM_NO_BURN_DATA: u16 = 115;

pub trait BurnPlan {
    fn velocity_at_cutoff(&self) -> f64;
    fn time_until_ignition(&self) -> f64;
    fn accumulated_delta_v(&self) -> f64;
    fn delta_v_required(&self) -> f64;
    fn burn_duration(&self) -> f64;
    fn calculate_time_to_ignition(&self) -> f64;
}

pub trait FlightComputer {
    fn next_burn(&self) -> Option<&dyn BurnPlan>;
    fn noun_data(&self, code: &str) -> Option<&[String]>;
    fn set_noun_data(&mut self, code: &str, data: std::vec::Vec<String>);
    fn alarm_codes(&self) -> [u16; ALARM_SLOTS];
    fn program_alarm(&mut self, code: u16, message: Option<&str>);
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlannedBurn {
    pub velocity_at_cutoff: f64,
    pub time_until_ignition: f64,
    pub accumulated_delta_v: f64,
    pub delta_v_required: f64,
    pub burn_duration: f64,
}

impl BurnPlan for PlannedBurn {
    fn velocity_at_cutoff(&self) -> f64 {
        self.velocity_at_cutoff
    }

    fn time_until_ignition(&self) -> f64 {
        self.time_until_ignition
    }

    fn accumulated_delta_v(&self) -> f64 {
        self.accumulated_delta_v
    }

    fn delta_v_required(&self) -> f64 {
        self.delta_v_required
    }

    fn burn_duration(&self) -> f64 {
        self.burn_duration
    }

    fn calculate_time_to_ignition(&self) -> f64 {
        self.time_until_ignition
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlarmRecord {
    pub code: u16,
    pub message: Option<String>,
}

/// In-memory computer state.
///
/// The alarm register keeps the first two alarms raised and always
/// overwrites the last slot with the most recent one. The alarm log keeps the
/// latest `MAX_ALARM_HISTORY` records.
#[derive(Debug, Default)]
pub struct OnboardState {
    pub next_burn: Option<PlannedBurn>,
    noun_data: HashMap<String, std::vec::Vec<String>>,
    alarm_codes: Vec<u16, ALARM_SLOTS>,
    alarm_log: Vec<AlarmRecord, MAX_ALARM_HISTORY>,
}

impl OnboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_burn(mut self, burn: PlannedBurn) -> Self {
        self.next_burn = Some(burn);
        self
    }

    pub fn alarm_log(&self) -> &[AlarmRecord] {
        &self.alarm_log
    }
}

impl FlightComputer for OnboardState {
    fn next_burn(&self) -> Option<&dyn BurnPlan> {
        self.next_burn.as_ref().map(|burn| burn as &dyn BurnPlan)
    }

    fn noun_data(&self, code: &str) -> Option<&[String]> {
        self.noun_data.get(code).map(std::vec::Vec::as_slice)
    }

    fn set_noun_data(&mut self, code: &str, data: std::vec::Vec<String>) {
        self.noun_data.insert(code.to_string(), data);
    }

    fn alarm_codes(&self) -> [u16; ALARM_SLOTS] {
        let mut codes = [0; ALARM_SLOTS];
        codes[..self.alarm_codes.len()].copy_from_slice(&self.alarm_codes);
        codes
    }

    fn program_alarm(&mut self, code: u16, message: Option<&str>) {
        warn!("Program alarm {}: {}", code, message.unwrap_or("-"));

        if self.alarm_codes.is_full() {
            self.alarm_codes.pop();
        }
        let _ = self.alarm_codes.push(code);

        if self.alarm_log.is_full() {
            self.alarm_log.remove(0);
        }
        let _ = self.alarm_log.push(AlarmRecord {
            code,
            message: message.map(str::to_string),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alarm_register_keeps_first_two_and_latest() {
        let mut state = OnboardState::new();
        assert_eq!(state.alarm_codes(), [0, 0, 0]);

        state.program_alarm(110, None);
        state.program_alarm(115, Some("No burn data loaded"));
        assert_eq!(state.alarm_codes(), [110, 115, 0]);

        state.program_alarm(220, None);
        state.program_alarm(223, None);
        assert_eq!(state.alarm_codes(), [110, 115, 223]);
        assert_eq!(state.alarm_log().len(), 4);
        assert_eq!(state.alarm_log()[1].message.as_deref(), Some("No burn data loaded"));
    }

    #[test]
    fn test_alarm_log_drops_oldest_when_full() {
        let mut state = OnboardState::new();
        for code in 0..(MAX_ALARM_HISTORY as u16 + 10) {
            state.program_alarm(code, None);
        }

        assert_eq!(state.alarm_log().len(), MAX_ALARM_HISTORY);
        assert_eq!(state.alarm_log()[0].code, 10);
        assert_eq!(state.alarm_log().last().unwrap().code, MAX_ALARM_HISTORY as u16 + 9);
        assert_eq!(state.alarm_codes(), [0, 1, MAX_ALARM_HISTORY as u16 + 9]);
    }

    #[test]
    fn test_noun_data_overwrite() {
        let mut state = OnboardState::new();
        assert!(state.noun_data("30").is_none());

        state.set_noun_data("30", vec!["00012".to_string()]);
        state.set_noun_data("30", vec!["00017".to_string()]);
        assert_eq!(state.noun_data("30"), Some(&["00017".to_string()][..]));
    }
}
