//! Keyboard query contract consumed once per tick.

/// Logical keys the simulation and its adapters poll.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Move towards −Z.
    MoveForward,
    /// Move towards +Z.
    MoveBack,
    /// Move towards −X.
    StrafeLeft,
    /// Move towards +X.
    StrafeRight,
    /// Increase the player's yaw.
    RotateLeft,
    /// Decrease the player's yaw.
    RotateRight,
    /// Melee attack trigger.
    Attack,
    /// Leave the game loop.
    Exit,
    /// Orbit the camera left. Only the rendering adapter reads the camera keys.
    CameraLeft,
    /// Orbit the camera right.
    CameraRight,
    /// Tilt the camera up.
    CameraUp,
    /// Tilt the camera down.
    CameraDown,
}

/// Capability answering whether a key is currently held.
pub trait InputSource {
    /// Reports whether `key` is held during the current sample.
    fn is_pressed(&self, key: Key) -> bool;
}

/// Keys relevant to the simulation, sampled once at the top of a tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ControlState {
    /// Forward key held.
    pub move_forward: bool,
    /// Back key held.
    pub move_back: bool,
    /// Strafe-left key held.
    pub strafe_left: bool,
    /// Strafe-right key held.
    pub strafe_right: bool,
    /// Rotate-left key held.
    pub rotate_left: bool,
    /// Rotate-right key held.
    pub rotate_right: bool,
    /// Attack trigger held.
    pub attack: bool,
    /// Exit key held.
    pub exit: bool,
}

impl ControlState {
    /// Samples every simulation key from the provided source.
    #[must_use]
    pub fn sample<S>(source: &S) -> Self
    where
        S: InputSource + ?Sized,
    {
        Self {
            move_forward: source.is_pressed(Key::MoveForward),
            move_back: source.is_pressed(Key::MoveBack),
            strafe_left: source.is_pressed(Key::StrafeLeft),
            strafe_right: source.is_pressed(Key::StrafeRight),
            rotate_left: source.is_pressed(Key::RotateLeft),
            rotate_right: source.is_pressed(Key::RotateRight),
            attack: source.is_pressed(Key::Attack),
            exit: source.is_pressed(Key::Exit),
        }
    }

    /// Reports whether any movement key is held.
    #[must_use]
    pub const fn any_movement(&self) -> bool {
        self.move_forward || self.move_back || self.strafe_left || self.strafe_right
    }
}

impl InputSource for ControlState {
    fn is_pressed(&self, key: Key) -> bool {
        match key {
            Key::MoveForward => self.move_forward,
            Key::MoveBack => self.move_back,
            Key::StrafeLeft => self.strafe_left,
            Key::StrafeRight => self.strafe_right,
            Key::RotateLeft => self.rotate_left,
            Key::RotateRight => self.rotate_right,
            Key::Attack => self.attack,
            Key::Exit => self.exit,
            Key::CameraLeft | Key::CameraRight | Key::CameraUp | Key::CameraDown => false,
        }
    }
}
