//! Hours-of-service duty-cycle simulation
//!
//! Walks a trip's driving time forward in one-hour steps and inserts
//! breaks, daily rests, and cycle resets where federal limits require
//! them. Pure integer-minute arithmetic, no clock access, so results
//! are fully deterministic.

use crate::error::PlanError;

/// Maximum driving time per day: 11 hours
pub const MAX_DAY_DRIVING_MINUTES: i64 = 660;

/// Maximum on-duty time per day: 14 hours
pub const MAX_DAY_ON_DUTY_MINUTES: i64 = 840;

/// Driving time after which a 30-minute break is due: 8 hours
pub const BREAK_AFTER_DRIVING_MINUTES: i64 = 480;

/// Mandatory break duration: 30 minutes
pub const BREAK_MINUTES: i64 = 30;

/// Daily off-duty rest duration: 10 hours
pub const REST_MINUTES: i64 = 600;

/// 70-hour/8-day cycle limit
pub const CYCLE_LIMIT_MINUTES: i64 = 4200;

/// 34-hour cycle restart duration
pub const CYCLE_RESET_MINUTES: i64 = 2040;

/// Time spent at each fuel stop
pub const FUEL_STOP_MINUTES: i64 = 60;

/// Simulation advances in steps of at most one hour
const STEP_MINUTES: i64 = 60;

/// Upper bound on plannable driving time: one simulated year
const MAX_DRIVING_MINUTES: i64 = 527_040;

/// A mandatory stop along a trip, its duration fixed by the kind
///
/// The simulator emits the duty variants (Break, Rest, Reset). Fuel
/// stops are scheduled by distance instead and only their time flows
/// into the simulation total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopEvent {
    /// 30-minute break after 8 hours of driving
    Break,
    /// 10-hour daily rest
    Rest,
    /// 34-hour cycle restart
    Reset,
    /// One-hour refueling stop
    Fuel,
}

impl StopEvent {
    /// Duration of this stop in minutes
    pub const fn duration_minutes(&self) -> i64 {
        match self {
            StopEvent::Break => BREAK_MINUTES,
            StopEvent::Rest => REST_MINUTES,
            StopEvent::Reset => CYCLE_RESET_MINUTES,
            StopEvent::Fuel => FUEL_STOP_MINUTES,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            StopEvent::Break => "break",
            StopEvent::Rest => "rest",
            StopEvent::Reset => "reset",
            StopEvent::Fuel => "fuel",
        }
    }
}

/// Outcome of a duty-cycle simulation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationResult {
    /// Mandatory stops in the order they occur along the trip
    pub stops: Vec<StopEvent>,
    /// Total elapsed trip time: driving + fuel stops + mandatory stops
    pub total_trip_minutes: i64,
}

/// Rolling duty counters, stepped once per simulated hour and discarded
/// when the simulation ends
struct DutyState {
    cycle_minutes_used: i64,
    day_driving_minutes: i64,
    day_on_duty_minutes: i64,
    minutes_until_break: i64,
}

impl DutyState {
    fn new(starting_cycle_minutes: i64) -> Self {
        DutyState {
            cycle_minutes_used: starting_cycle_minutes,
            day_driving_minutes: 0,
            day_on_duty_minutes: 0,
            minutes_until_break: BREAK_AFTER_DRIVING_MINUTES,
        }
    }

    /// Zero the daily counters and restart the break timer, as a
    /// 10-hour rest or 34-hour restart does
    fn begin_new_day(&mut self) {
        self.day_driving_minutes = 0;
        self.day_on_duty_minutes = 0;
        self.minutes_until_break = BREAK_AFTER_DRIVING_MINUTES;
    }

    /// Account one driving step against every counter
    fn advance(&mut self, step: i64) {
        self.day_driving_minutes += step;
        self.day_on_duty_minutes += step;
        self.cycle_minutes_used += step;
        self.minutes_until_break -= step;
    }
}

/// Simulate a duty cycle over `driving_minutes` of wheel time
///
/// Advances in steps of at most one hour. Before each step, four limit
/// checks run in fixed priority order (break, daily driving, daily
/// on-duty, cycle), each firing at most once per step:
///
/// 1. 30-minute break once 8 hours of driving accumulate since the
///    last break or rest. Break time counts as on-duty.
/// 2. 10-hour rest once daily driving reaches 11 hours. Resets the
///    daily counters and the break timer.
/// 3. 10-hour rest once daily on-duty reaches 14 hours. Same resets.
/// 4. 34-hour restart once the rolling cycle reaches 70 hours. Zeroes
///    the cycle and daily counters.
///
/// `starting_cycle_minutes` seeds the cycle counter with hours already
/// used before this trip. Fuel time is added to the total up front and
/// does not participate in the limit checks.
pub fn simulate_duty_cycle(
    driving_minutes: i64,
    starting_cycle_minutes: i64,
    fuel_stops: u32,
) -> Result<SimulationResult, PlanError> {
    if driving_minutes > MAX_DRIVING_MINUTES {
        return Err(PlanError::InvariantViolation(format!(
            "driving time of {} minutes exceeds one simulated year",
            driving_minutes
        )));
    }

    let fuel_minutes = i64::from(fuel_stops) * StopEvent::Fuel.duration_minutes();

    if driving_minutes <= 0 {
        return Ok(SimulationResult {
            stops: Vec::new(),
            total_trip_minutes: fuel_minutes,
        });
    }

    let mut stops = Vec::new();
    let mut total_trip_minutes = fuel_minutes;

    let mut remaining = driving_minutes;
    let mut state = DutyState::new(starting_cycle_minutes);

    // Each iteration consumes at least one minute, so anything past
    // this bound means a counter stopped advancing.
    let max_iterations = driving_minutes + 8;
    let mut iterations = 0i64;

    while remaining > 0 {
        iterations += 1;
        if iterations > max_iterations {
            return Err(PlanError::InvariantViolation(format!(
                "duty-cycle simulation exceeded {} iterations with {} minutes left",
                max_iterations, remaining
            )));
        }

        if state.minutes_until_break <= 0 {
            stops.push(StopEvent::Break);
            state.minutes_until_break = BREAK_AFTER_DRIVING_MINUTES;
            state.day_on_duty_minutes += BREAK_MINUTES;
            total_trip_minutes += BREAK_MINUTES;
        }

        if state.day_driving_minutes >= MAX_DAY_DRIVING_MINUTES {
            stops.push(StopEvent::Rest);
            state.begin_new_day();
            total_trip_minutes += REST_MINUTES;
        }

        if state.day_on_duty_minutes >= MAX_DAY_ON_DUTY_MINUTES {
            stops.push(StopEvent::Rest);
            state.begin_new_day();
            total_trip_minutes += REST_MINUTES;
        }

        if state.cycle_minutes_used >= CYCLE_LIMIT_MINUTES {
            stops.push(StopEvent::Reset);
            state.cycle_minutes_used = 0;
            state.begin_new_day();
            total_trip_minutes += CYCLE_RESET_MINUTES;
        }

        let step = remaining.min(STEP_MINUTES);
        remaining -= step;
        state.advance(step);
        total_trip_minutes += step;
    }

    Ok(SimulationResult {
        stops,
        total_trip_minutes,
    })
}
