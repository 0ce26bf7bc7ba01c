use crate::consts;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// The schedule by which the time between ticks shrinks as the snake eats
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct SpeedCurve {
    initial: Duration,
    floor: Duration,
    /// Ordered from the highest threshold to the lowest
    steps: Vec<SpeedStep>,
}

/// While the tick interval is above `above`, each meal takes `decrement` off
/// of it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct SpeedStep {
    pub(crate) above: Duration,
    pub(crate) decrement: Duration,
}

impl SpeedStep {
    pub(crate) const fn from_millis(above: u64, decrement: u64) -> SpeedStep {
        SpeedStep {
            above: Duration::from_millis(above),
            decrement: Duration::from_millis(decrement),
        }
    }
}

impl SpeedCurve {
    /// Construct a custom speed curve.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the floor is zero, if `initial` is below the floor, if
    /// any step has a zero decrement, or if the steps are not in strictly
    /// descending order of threshold.
    pub(crate) fn new(
        initial: Duration,
        floor: Duration,
        steps: Vec<SpeedStep>,
    ) -> Result<SpeedCurve, SpeedCurveError> {
        if floor.is_zero() {
            return Err(SpeedCurveError::ZeroFloor);
        }
        if initial < floor {
            return Err(SpeedCurveError::InitialBelowFloor { initial, floor });
        }
        if let Some(step) = steps.iter().find(|st| st.decrement.is_zero()) {
            return Err(SpeedCurveError::ZeroDecrement { above: step.above });
        }
        if steps
            .windows(2)
            .any(|w| matches!(w, [hi, lo] if hi.above <= lo.above))
        {
            return Err(SpeedCurveError::Unordered);
        }
        Ok(SpeedCurve {
            initial,
            floor,
            steps,
        })
    }

    /// The curve of the classic interval-timer game: big steps while slow,
    /// smaller and smaller ones as the interval shrinks, stopping at 25 ms.
    pub(crate) fn classic() -> SpeedCurve {
        SpeedCurve {
            initial: consts::INITIAL_TICK_PERIOD,
            floor: Duration::from_millis(25),
            steps: vec![
                SpeedStep::from_millis(150, 5),
                SpeedStep::from_millis(100, 3),
                SpeedStep::from_millis(50, 2),
                SpeedStep::from_millis(25, 1),
            ],
        }
    }

    /// A steady 5 ms per meal down to a hard floor of 80 ms
    pub(crate) fn capped() -> SpeedCurve {
        SpeedCurve {
            initial: consts::INITIAL_TICK_PERIOD,
            floor: Duration::from_millis(80),
            steps: vec![SpeedStep::from_millis(80, 5)],
        }
    }

    pub(crate) fn initial(&self) -> Duration {
        self.initial
    }

    pub(crate) fn floor(&self) -> Duration {
        self.floor
    }

    pub(crate) fn steps(&self) -> &[SpeedStep] {
        &self.steps
    }

    /// Return the tick interval that follows `current` after the snake eats
    pub(crate) fn next(&self, current: Duration) -> Duration {
        match self.steps.iter().find(|st| current > st.above) {
            Some(step) => current.saturating_sub(step.decrement).max(self.floor),
            None => current,
        }
    }
}

impl Default for SpeedCurve {
    fn default() -> SpeedCurve {
        SpeedPreset::default().curve()
    }
}

/// The built-in speed curves, selectable by name
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum SpeedPreset {
    Classic,
    #[default]
    Capped,
}

impl SpeedPreset {
    pub(crate) fn curve(self) -> SpeedCurve {
        match self {
            SpeedPreset::Classic => SpeedCurve::classic(),
            SpeedPreset::Capped => SpeedCurve::capped(),
        }
    }

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            SpeedPreset::Classic => "classic",
            SpeedPreset::Capped => "capped",
        }
    }
}

impl fmt::Display for SpeedPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for SpeedPreset {
    type Err = ParsePresetError;

    fn from_str(s: &str) -> Result<SpeedPreset, ParsePresetError> {
        match s {
            "classic" => Ok(SpeedPreset::Classic),
            "capped" => Ok(SpeedPreset::Capped),
            _ => Err(ParsePresetError(s.to_owned())),
        }
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("unknown speed curve {0:?}; expected \"classic\" or \"capped\"")]
pub(crate) struct ParsePresetError(String);

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum SpeedCurveError {
    #[error("speed curve floor must be greater than zero")]
    ZeroFloor,
    #[error("initial tick interval ({initial:?}) is below the floor ({floor:?})")]
    InitialBelowFloor { initial: Duration, floor: Duration },
    #[error("speed step above {above:?} has a zero decrement")]
    ZeroDecrement { above: Duration },
    #[error("speed steps must be listed in strictly descending order of threshold")]
    Unordered,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn after_meals(curve: &SpeedCurve, meals: usize) -> Duration {
        std::iter::successors(Some(curve.initial()), |&d| Some(curve.next(d)))
            .nth(meals)
            .expect("successors() should be infinite")
    }

    #[rstest]
    #[case(0, 200)]
    #[case(1, 195)]
    #[case(10, 150)]
    #[case(24, 80)]
    #[case(25, 80)]
    #[case(100, 80)]
    fn capped_curve(#[case] meals: usize, #[case] millis: u64) {
        assert_eq!(
            after_meals(&SpeedCurve::capped(), meals),
            Duration::from_millis(millis)
        );
    }

    #[test]
    fn capped_curve_formula() {
        let curve = SpeedCurve::capped();
        for n in 0..60u64 {
            let expected = 200u64.saturating_sub(5 * n).max(80);
            assert_eq!(
                after_meals(&curve, usize::try_from(n).unwrap()),
                Duration::from_millis(expected)
            );
        }
    }

    #[rstest]
    #[case(0, 200)]
    #[case(10, 150)]
    #[case(11, 147)]
    #[case(27, 99)]
    #[case(52, 49)]
    #[case(76, 25)]
    #[case(200, 25)]
    fn classic_curve(#[case] meals: usize, #[case] millis: u64) {
        assert_eq!(
            after_meals(&SpeedCurve::classic(), meals),
            Duration::from_millis(millis)
        );
    }

    #[test]
    fn never_increases() {
        for curve in [SpeedCurve::classic(), SpeedCurve::capped()] {
            let mut d = curve.initial();
            for _ in 0..500 {
                let next = curve.next(d);
                assert!(next <= d);
                assert!(next >= curve.floor());
                d = next;
            }
        }
    }

    #[test]
    fn hard_floor_clamps_overshoot() {
        let curve = SpeedCurve::capped();
        assert_eq!(
            curve.next(Duration::from_millis(83)),
            Duration::from_millis(80)
        );
    }

    #[test]
    fn custom_curve() {
        let curve = SpeedCurve::new(
            Duration::from_millis(100),
            Duration::from_millis(40),
            vec![SpeedStep::from_millis(60, 10), SpeedStep::from_millis(40, 1)],
        )
        .unwrap();
        assert_eq!(after_meals(&curve, 4), Duration::from_millis(60));
        assert_eq!(after_meals(&curve, 5), Duration::from_millis(59));
        assert_eq!(after_meals(&curve, 24), Duration::from_millis(40));
        assert_eq!(after_meals(&curve, 30), Duration::from_millis(40));
    }

    #[rstest]
    #[case(200, 0, vec![SpeedStep::from_millis(80, 5)], SpeedCurveError::ZeroFloor)]
    #[case(
        50,
        80,
        vec![SpeedStep::from_millis(80, 5)],
        SpeedCurveError::InitialBelowFloor {
            initial: Duration::from_millis(50),
            floor: Duration::from_millis(80),
        }
    )]
    #[case(
        200,
        80,
        vec![SpeedStep::from_millis(80, 0)],
        SpeedCurveError::ZeroDecrement { above: Duration::from_millis(80) }
    )]
    #[case(
        200,
        25,
        vec![SpeedStep::from_millis(50, 2), SpeedStep::from_millis(150, 5)],
        SpeedCurveError::Unordered
    )]
    #[case(
        200,
        25,
        vec![SpeedStep::from_millis(50, 2), SpeedStep::from_millis(50, 1)],
        SpeedCurveError::Unordered
    )]
    fn invalid_curve(
        #[case] initial: u64,
        #[case] floor: u64,
        #[case] steps: Vec<SpeedStep>,
        #[case] err: SpeedCurveError,
    ) {
        assert_eq!(
            SpeedCurve::new(
                Duration::from_millis(initial),
                Duration::from_millis(floor),
                steps
            ),
            Err(err)
        );
    }

    #[rstest]
    #[case("classic", Ok(SpeedPreset::Classic))]
    #[case("capped", Ok(SpeedPreset::Capped))]
    #[case("fast", Err(ParsePresetError(String::from("fast"))))]
    fn parse_preset(#[case] s: &str, #[case] r: Result<SpeedPreset, ParsePresetError>) {
        assert_eq!(s.parse::<SpeedPreset>(), r);
    }
}
