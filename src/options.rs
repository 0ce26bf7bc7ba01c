use crate::game::SpeedCurve;

/// Gameplay settings fixed for the lifetime of a [`Session`][crate::game::Session]
/// (apart from wrap mode, which the player can toggle)
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Options {
    /// Whether wrap mode is on when the program starts
    pub(crate) wraparound: bool,

    pub(crate) speed_curve: SpeedCurve,
}
